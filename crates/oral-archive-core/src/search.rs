//! Search executor: query string → ordered result records.
//!
//! The executor works entirely through the [`SearchIndex`] trait and the
//! [`RecordStore`], with no I/O or configuration. Callers load the corpus
//! once and pass it in on every call.
//!
//! # Algorithm
//!
//! 1. Empty query: return every store record in store order. The index is
//!    not consulted.
//! 2. Otherwise tokenize the query with the index's own rule.
//! 3. Look up hits; the index decides relevance order.
//! 4. Unflatten each hit into its full record via the store. Hits whose id
//!    is missing from the store are dropped.
//!
//! A whitespace-only query is not empty: it goes through the index and,
//! having no tokens, matches nothing.

use serde::Serialize;

use crate::index::{IndexHit, SearchIndex};
use crate::models::ArchiveRecord;
use crate::store::RecordStore;

/// Ordered records produced for one query.
///
/// Borrowed from the store; each query change produces a fresh set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet<'a> {
    records: Vec<&'a ArchiveRecord>,
}

impl<'a> ResultSet<'a> {
    pub fn records(&self) -> &[&'a ArchiveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ArchiveRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Run `query` against `index` and `store`.
///
/// This is the function every surface (CLI, HTTP, browse session) calls.
/// It is pure: identical inputs give identical ordered output.
pub fn execute<'a, I>(query: &str, index: &I, store: &'a RecordStore) -> ResultSet<'a>
where
    I: SearchIndex + ?Sized,
{
    if query.is_empty() {
        return ResultSet {
            records: store.records().iter().collect(),
        };
    }

    let tokens = index.tokenize(query);
    let hits = index.lookup(&tokens);

    let records = hits
        .iter()
        .filter_map(|hit| {
            let rec = unflatten(hit, store);
            if rec.is_none() {
                tracing::debug!(id = %hit.id, "index hit missing from store, dropped");
            }
            rec
        })
        .collect();

    ResultSet { records }
}

/// Reshape a raw index hit into the full record it refers to.
pub fn unflatten<'a>(hit: &IndexHit, store: &'a RecordStore) -> Option<&'a ArchiveRecord> {
    store.get(&hit.id)
}
