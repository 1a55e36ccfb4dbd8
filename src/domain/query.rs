//! List-view state encoded in a URL query string.
//!
//! Every list view owns six parameters namespaced by its [`ParamPrefix`]
//! (`appPage`, `appSortBy`, ...). Reading never fails: anything malformed
//! falls back to the defaults configured for the entity.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::ParamPrefix;
use crate::models::config::EntityConfig;

pub const FIRST_PAGE: u32 = 1;
/// Page value written while a search has just started under the sentinel policy.
pub const SEARCH_SENTINEL_PAGE: i64 = -1;

/// Direction applied to the sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Case-insensitive parse; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the URL-encoded fields of [`QueryState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryField {
    Page,
    PageSize,
    SortBy,
    SortOrder,
    Search,
    SearchBy,
}

impl QueryField {
    pub const ALL: [QueryField; 6] = [
        QueryField::Page,
        QueryField::PageSize,
        QueryField::SortBy,
        QueryField::SortOrder,
        QueryField::Search,
        QueryField::SearchBy,
    ];

    fn suffix(self) -> &'static str {
        match self {
            QueryField::Page => "Page",
            QueryField::PageSize => "PageSize",
            QueryField::SortBy => "SortBy",
            QueryField::SortOrder => "SortOrder",
            QueryField::Search => "Search",
            QueryField::SearchBy => "SearchBy",
        }
    }

    /// Full parameter name, e.g. `appSortBy`.
    pub fn param_name(self, prefix: &ParamPrefix) -> String {
        format!("{}{}", prefix.as_str(), self.suffix())
    }
}

/// Pagination, sort and search parameters of a single list view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub search_term: Option<String>,
    pub search_field: String,
}

impl QueryState {
    /// State with every field at the entity default.
    pub fn defaults(config: &EntityConfig) -> Self {
        Self {
            page: FIRST_PAGE,
            page_size: config.default_page_size,
            sort_by: config.default_sort_by.clone(),
            sort_order: SortOrder::default(),
            search_term: None,
            search_field: config.default_search_by.clone(),
        }
    }

    /// Parses the list state out of `query`, tolerating any malformed input.
    pub fn read(config: &EntityConfig, query: &str) -> Self {
        let params = EntityParams::collect(config, query);
        let mut state = Self::defaults(config);

        if let Some(page) = params.get(QueryField::Page).and_then(parse_positive) {
            state.page = page;
        }
        if let Some(size) = params.get(QueryField::PageSize).and_then(parse_positive) {
            state.page_size = size;
        }
        if let Some(sort_by) = params
            .get(QueryField::SortBy)
            .map(str::trim)
            .filter(|key| config.allows_sort(key))
        {
            state.sort_by = sort_by.to_string();
        }
        if let Some(order) = params.get(QueryField::SortOrder).and_then(SortOrder::parse) {
            state.sort_order = order;
        }
        state.search_term = params
            .get(QueryField::Search)
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);
        if let Some(field) = params
            .get(QueryField::SearchBy)
            .map(str::trim)
            .filter(|key| config.allows_search(key))
        {
            state.search_field = field.to_string();
        }

        state
    }

    pub fn is_searching(&self) -> bool {
        self.search_term.is_some()
    }
}

/// Raw signed page value as written in the URL, if it is an integer at all.
pub fn raw_page(prefix: &ParamPrefix, query: &str) -> Option<i64> {
    let name = QueryField::Page.param_name(prefix);
    decode_pairs(query)
        .into_iter()
        .rev()
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| value.trim().parse::<i64>().ok())
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v >= 1)
}

/// The six values of one entity picked out of a query string, last one wins.
struct EntityParams {
    values: [Option<String>; 6],
}

impl EntityParams {
    fn collect(config: &EntityConfig, query: &str) -> Self {
        let names = QueryField::ALL.map(|field| field.param_name(&config.prefix));
        let mut values: [Option<String>; 6] = Default::default();
        for (key, value) in decode_pairs(query) {
            if let Some(idx) = names.iter().position(|name| *name == key) {
                values[idx] = Some(value);
            }
        }
        Self { values }
    }

    fn get(&self, field: QueryField) -> Option<&str> {
        let idx = QueryField::ALL.iter().position(|f| *f == field)?;
        self.values[idx].as_deref()
    }
}

/// Decodes a form-urlencoded query string; undecodable input reads as empty.
pub fn decode_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return Vec::new();
    }
    serde_html_form::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|err| {
        log::debug!("Ignoring undecodable query string `{query}`: {err}");
        Vec::new()
    })
}

/// Encodes pairs back into a form-urlencoded query string without a leading `?`.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    serde_html_form::to_string(pairs).unwrap_or_else(|err| {
        log::error!("Failed to encode query parameters: {err}");
        String::new()
    })
}

/// Partial set of parameter changes merged into a query string.
///
/// A field set to `None` is removed from the URL so the next read falls back
/// to its default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamsUpdate {
    entries: Vec<(QueryField, Option<String>)>,
}

impl ParamsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: QueryField, value: impl ToString) -> Self {
        self.entries.push((field, Some(value.to_string())));
        self
    }

    pub fn remove(mut self, field: QueryField) -> Self {
        self.entries.push((field, None));
        self
    }

    /// Sets the field when `value` is present, removes it otherwise.
    pub fn set_opt<V: ToString>(self, field: QueryField, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self.remove(field),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges the changes into `query`, keeping unrelated parameters in place.
    pub fn apply(&self, prefix: &ParamPrefix, query: &str) -> String {
        let mut pairs = decode_pairs(query);
        for (field, value) in &self.entries {
            let name = field.param_name(prefix);
            match value {
                None => pairs.retain(|(key, _)| *key != name),
                Some(value) => match pairs.iter().position(|(key, _)| *key == name) {
                    Some(first) => {
                        pairs[first].1 = value.clone();
                        let mut idx = 0;
                        pairs.retain(|(key, _)| {
                            let keep = idx <= first || *key != name;
                            idx += 1;
                            keep
                        });
                    }
                    None => pairs.push((name, value.clone())),
                },
            }
        }
        encode_pairs(&pairs)
    }
}
