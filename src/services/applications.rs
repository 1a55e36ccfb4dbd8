//! Applications list (`app*` query parameters).

use std::sync::Arc;

use crate::controller::ListController;
use crate::domain::application::Application;
use crate::domain::types::ParamPrefix;
use crate::models::config::{ControllerOptions, EntityConfig};
use crate::models::event::ListEventSink;
use crate::navigation::Navigator;
use crate::remote::RemoteQuery;

pub const PREFIX: &str = "app";

pub fn entity_config() -> EntityConfig {
    EntityConfig::new(ParamPrefix::from_static(PREFIX), "created_at", "name")
        .sort_fields(&["created_at", "updated_at", "name", "company", "status"])
        .search_fields(&["name", "company", "email"])
}

/// Builds the applications list controller.
pub fn controller<N, R>(
    options: ControllerOptions,
    navigator: Arc<N>,
    remote: R,
    events: Arc<dyn ListEventSink>,
) -> ListController<N, R>
where
    N: Navigator + 'static,
    R: RemoteQuery<Item = Application>,
{
    ListController::new(entity_config(), options, navigator, remote, events)
}
