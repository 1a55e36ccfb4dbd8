//! Configuration and event models shared across list views.

pub mod config;
pub mod event;
