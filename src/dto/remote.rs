//! Shapes exchanged with the remote list service.

use serde::{Deserialize, Serialize};

use crate::domain::query::{QueryState, SortOrder};

/// Request parameters understood by the remote list endpoint.
///
/// Always derived from a [`QueryState`], never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemoteQueryInput {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_by: Option<String>,
}

impl From<&QueryState> for RemoteQueryInput {
    fn from(state: &QueryState) -> Self {
        Self {
            page: state.page,
            page_size: state.page_size,
            sort_by: state.sort_by.clone(),
            sort_order: state.sort_order,
            search: state.search_term.clone(),
            search_by: state
                .search_term
                .as_ref()
                .map(|_| state.search_field.clone()),
        }
    }
}

/// One page of rows returned by the remote service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemotePage<T> {
    /// Total number of rows matching the filter, across all pages.
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> RemotePage<T> {
    pub fn new(total: usize, items: Vec<T>) -> Self {
        Self { total, items }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }
}
