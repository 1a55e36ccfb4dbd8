//! Access to the navigable URL that stores list state.

use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

/// Path and query string of the current navigation entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl Location {
    /// Splits `/path?query` into its parts. Fragments are dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        match url.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: url.to_string(),
                query: String::new(),
            },
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Read and rewrite access to the browser location.
pub trait Navigator: Send + Sync {
    fn location(&self) -> Location;

    /// Replaces the query of the current entry without adding a history entry.
    fn replace_query(&self, query: &str);
}

#[derive(Debug)]
struct History {
    entries: Vec<Location>,
    index: usize,
    replacements: usize,
}

/// In-process session history with browser-like push/replace/back semantics.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: Mutex<History>,
}

impl MemoryNavigator {
    pub fn new(url: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![Location::parse(url)],
                index: 0,
                replacements: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Navigates to `url`, discarding any forward entries.
    pub fn push(&self, url: &str) {
        let mut history = self.lock();
        let keep = history.index + 1;
        history.entries.truncate(keep);
        history.entries.push(Location::parse(url));
        history.index = keep;
    }

    /// Steps back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let mut history = self.lock();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    /// Steps forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    /// Number of entries in the session history.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// How many times the query of an entry was replaced in place.
    pub fn replacements(&self) -> usize {
        self.lock().replacements
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        let history = self.lock();
        history.entries[history.index].clone()
    }

    fn replace_query(&self, query: &str) {
        let mut history = self.lock();
        let index = history.index;
        history.entries[index].query = query.strip_prefix('?').unwrap_or(query).to_string();
        history.replacements += 1;
    }
}
