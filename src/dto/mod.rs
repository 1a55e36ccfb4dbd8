//! DTOs exchanged between list controllers, the remote service and renderers.

pub mod remote;
pub mod view;
