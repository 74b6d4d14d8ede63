//! Query state holder for one browse session.
//!
//! Holds the current search string and nothing else. The value is taken
//! verbatim: no trimming, no validation. Seeding from the page's `s`
//! parameter is the caller's job; pass it to [`QueryState::new`].

use serde::Serialize;

/// The current user-entered search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    current: String,
}

impl QueryState {
    /// Create a state seeded from an optional initial query.
    pub fn new(initial: Option<String>) -> Self {
        Self {
            current: initial.unwrap_or_default(),
        }
    }

    pub fn current_query(&self) -> &str {
        &self.current
    }

    /// Replace the current query.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.current = value.into();
    }

    pub fn is_active(&self) -> bool {
        !self.current.is_empty()
    }
}
