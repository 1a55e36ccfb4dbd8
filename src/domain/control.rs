use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ControlId;

/// Checklist item an application is assessed against.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Control {
    pub id: ControlId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Whether every application must satisfy this control.
    pub required: bool,
    pub created_at: NaiveDateTime,
}
