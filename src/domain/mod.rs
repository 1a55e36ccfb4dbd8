//! Domain types exposed by the review dashboard list views.

pub mod application;
pub mod auth;
pub mod control;
pub mod query;
pub mod types;
