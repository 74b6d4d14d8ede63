//! One browse-page session: query state wired to executor and renderer.
//!
//! Data flows one way. Every query mutation (keystroke, tag click)
//! recomputes the result set, re-renders, and asks the host to scroll the
//! results region into view. Submitting the search box only scrolls.

use serde::Serialize;

use crate::index::SearchIndex;
use crate::query::QueryState;
use crate::render::{render, RenderOptions, RenderedResults};
use crate::search::execute;
use crate::store::RecordStore;

/// Side effects the host UI should perform after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Bring the results region into view.
    ScrollToResults,
}

/// What an event produced: the fresh render plus effects to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Update {
    pub view: RenderedResults,
    pub effects: Vec<Effect>,
}

/// Browse session over a loaded corpus.
pub struct BrowseSession<'a, I: SearchIndex + ?Sized> {
    index: &'a I,
    store: &'a RecordStore,
    query: QueryState,
    options: RenderOptions,
}

impl<'a, I: SearchIndex + ?Sized> BrowseSession<'a, I> {
    /// Start a session, seeding the query from the page's `s` parameter.
    pub fn new(
        index: &'a I,
        store: &'a RecordStore,
        initial_query: Option<String>,
        options: RenderOptions,
    ) -> Self {
        Self {
            index,
            store,
            query: QueryState::new(initial_query),
            options,
        }
    }

    pub fn query(&self) -> &str {
        self.query.current_query()
    }

    /// Render the current state without mutating anything.
    pub fn view(&self) -> RenderedResults {
        let q = self.query.current_query();
        let results = execute(q, self.index, self.store);
        render(&results, q, &self.options)
    }

    /// Replace the query (a keystroke in the search box).
    pub fn set_query(&mut self, value: impl Into<String>) -> Update {
        self.query.set_query(value);
        Update {
            view: self.view(),
            effects: vec![Effect::ScrollToResults],
        }
    }

    /// A tag pill was clicked: the tag text becomes the query.
    pub fn click_tag(&mut self, tag: &str) -> Update {
        self.set_query(tag)
    }

    /// The search form was submitted.
    pub fn submit(&self) -> Update {
        Update {
            view: self.view(),
            effects: vec![Effect::ScrollToResults],
        }
    }

    /// The viewport changed size; re-layout without a scroll.
    pub fn resize(&mut self, viewport_width: u32) -> RenderedResults {
        self.options.viewport_width = viewport_width;
        self.view()
    }
}
