//! Caller-facing view of a list controller.

use crate::domain::query::{ParamsUpdate, QueryState};
use crate::dto::remote::RemotePage;
use crate::pagination::Paginated;
use crate::remote::RemoteError;

/// Progress of the remote fetch backing a list view.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchStatus<T> {
    /// No request was issued because the state was incomplete.
    Idle,
    Loading,
    Loaded(RemotePage<T>),
    Failed(RemoteError),
}

impl<T> FetchStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchStatus::Failed(_))
    }

    pub fn error(&self) -> Option<&RemoteError> {
        match self {
            FetchStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&RemotePage<T>> {
        match self {
            FetchStatus::Loaded(page) => Some(page),
            _ => None,
        }
    }
}

/// Write access to the URL-encoded list state.
pub trait ParamWriter {
    fn update_params(&self, update: ParamsUpdate);

    fn go_to_page(&self, page: u32);
}

/// Snapshot of a list view handed to the renderer.
///
/// Built fresh on every render; mutations go straight to the URL through the
/// borrowed writer.
pub struct ViewModel<'a, T> {
    pub state: QueryState,
    pub status: FetchStatus<T>,
    writer: &'a dyn ParamWriter,
}

impl<'a, T> ViewModel<'a, T> {
    pub fn new(state: QueryState, status: FetchStatus<T>, writer: &'a dyn ParamWriter) -> Self {
        Self {
            state,
            status,
            writer,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }

    pub fn error(&self) -> Option<&RemoteError> {
        self.status.error()
    }

    pub fn data(&self) -> Option<&RemotePage<T>> {
        self.status.data()
    }

    /// Pager for the loaded rows; `None` until data is available.
    pub fn pagination(&self) -> Option<Paginated<'_, T>> {
        self.data().map(|page| {
            Paginated::new(
                &page.items,
                self.state.page as usize,
                page.total,
                self.state.page_size as usize,
            )
        })
    }

    pub fn go_to_page(&self, page: u32) {
        self.writer.go_to_page(page);
    }

    pub fn update_params(&self, update: ParamsUpdate) {
        self.writer.update_params(update);
    }
}
