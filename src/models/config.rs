//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::types::ParamPrefix;
use crate::services::{applications, controls};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 600;

/// How the page parameter is rewritten when a search starts.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchPagePolicy {
    /// Write `page=1` so the first page of results is requested.
    #[default]
    ResetToFirst,
    /// Write `page=-1` for collaborators that expect the legacy marker.
    Sentinel,
}

/// Per-entity settings of one list view.
#[derive(Clone, Debug, Deserialize, Validate, PartialEq, Eq)]
#[validate(schema(function = "validate_entity_defaults"))]
pub struct EntityConfig {
    /// Namespace for the URL parameters of this list.
    pub prefix: ParamPrefix,
    #[validate(length(min = 1))]
    pub default_sort_by: String,
    #[validate(length(min = 1))]
    pub default_search_by: String,
    /// Allowed sort keys. An empty list accepts any non-empty key.
    #[serde(default)]
    pub sort_fields: Vec<String>,
    /// Allowed search keys. An empty list accepts any non-empty key.
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub default_page_size: u32,
}

impl EntityConfig {
    pub fn new(prefix: ParamPrefix, default_sort_by: &str, default_search_by: &str) -> Self {
        Self {
            prefix,
            default_sort_by: default_sort_by.to_string(),
            default_search_by: default_search_by.to_string(),
            sort_fields: Vec::new(),
            search_fields: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn sort_fields(mut self, fields: &[&str]) -> Self {
        self.sort_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn allows_sort(&self, key: &str) -> bool {
        allowed(&self.sort_fields, key)
    }

    pub fn allows_search(&self, key: &str) -> bool {
        allowed(&self.search_fields, key)
    }
}

fn allowed(fields: &[String], key: &str) -> bool {
    !key.is_empty() && (fields.is_empty() || fields.iter().any(|f| f == key))
}

fn validate_entity_defaults(config: &EntityConfig) -> Result<(), ValidationError> {
    if !config.allows_sort(&config.default_sort_by) {
        return Err(ValidationError::new("default_sort_by_not_allowed"));
    }
    if !config.allows_search(&config.default_search_by) {
        return Err(ValidationError::new("default_search_by_not_allowed"));
    }
    Ok(())
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_entities() -> Vec<EntityConfig> {
    vec![applications::entity_config(), controls::entity_config()]
}

/// Dashboard-wide settings shared by every list controller.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct DashboardConfig {
    #[serde(default = "default_debounce_ms")]
    #[validate(range(min = 1))]
    pub search_debounce_ms: u64,
    #[serde(default)]
    pub search_page_policy: SearchPagePolicy,
    #[serde(default = "default_entities")]
    #[validate(nested)]
    pub entities: Vec<EntityConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            search_page_policy: SearchPagePolicy::default(),
            entities: default_entities(),
        }
    }
}

impl DashboardConfig {
    /// Looks up the list settings registered under `prefix`.
    pub fn entity(&self, prefix: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.prefix.as_str() == prefix)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            debounce: Duration::from_millis(self.search_debounce_ms),
            search_page_policy: self.search_page_policy,
        }
    }
}

/// Timing and paging behaviour handed to a list controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOptions {
    pub debounce: Duration,
    pub search_page_policy: SearchPagePolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            search_page_policy: SearchPagePolicy::default(),
        }
    }
}
