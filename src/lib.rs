//! List views of the pre-assessment review dashboard.
//!
//! Each list (applications, controls) keeps its pagination, sort and search
//! state in the URL query string through a [`controller::ListController`].

pub mod controller;
pub mod debounce;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod remote;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "review";
pub const SERVICE_ADMIN_ROLE: &str = "review_admin";
