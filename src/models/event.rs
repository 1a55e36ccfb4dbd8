//! Events emitted by list views towards the shared dashboard state.

use serde::Serialize;

use crate::domain::application::ReviewStatus;
use crate::domain::types::ApplicationId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListEvent {
    /// A page of results finished loading for the list under `entity`.
    ResultsLoaded { entity: String, total: usize },
    /// A row of the list under `entity` became the current selection.
    Selected { entity: String, id: i64 },
    /// An administrator moved an application to a new review status.
    StatusChanged {
        application: ApplicationId,
        status: ReviewStatus,
    },
}

/// Dispatch-like callback into whatever owns the shared dashboard state.
pub trait ListEventSink: Send + Sync {
    fn dispatch(&self, event: ListEvent);
}

impl<F> ListEventSink for F
where
    F: Fn(ListEvent) + Send + Sync,
{
    fn dispatch(&self, event: ListEvent) {
        self(event)
    }
}

/// Sink that drops every event, for views with no shared state to update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ListEventSink for NoopSink {
    fn dispatch(&self, _event: ListEvent) {}
}
