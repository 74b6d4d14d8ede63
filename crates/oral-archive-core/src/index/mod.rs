//! Full-text index abstraction for the archive.
//!
//! The [`SearchIndex`] trait is the narrow seam between the search executor
//! and whatever indexing algorithm produced the index. The executor only
//! ever calls [`tokenize`](SearchIndex::tokenize) and
//! [`lookup`](SearchIndex::lookup), so an index can be swapped without
//! touching the executor contract.
//!
//! Indexes are built once at corpus-load time and are read-only afterwards.
//! Implementations must be `Send + Sync` so a loaded corpus can be shared
//! across server handlers without locking.

pub mod inverted;

pub use inverted::InvertedIndex;

use serde::Serialize;

/// A raw lookup hit, before it is resolved against the record store.
///
/// Hits carry only the identifier and the index's own relevance score;
/// the executor reshapes them into full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexHit {
    /// Record id as recorded in the index.
    pub id: String,
    /// Index-specific relevance. Higher is better.
    pub score: u32,
}

/// Read-only full-text index over archive records.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`tokenize`](SearchIndex::tokenize) | Split text with the same rule used at build time |
/// | [`lookup`](SearchIndex::lookup) | Resolve query tokens to hits in relevance order |
/// | [`document_ids`](SearchIndex::document_ids) | Ids the index was built over |
pub trait SearchIndex: Send + Sync {
    /// Tokenize text using the rule the index was built with.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Look up matching records for already-tokenized query terms.
    ///
    /// Results are in the index's relevance order. An empty token list
    /// yields no hits.
    fn lookup(&self, tokens: &[String]) -> Vec<IndexHit>;

    /// Every record id the index was built over, in build order.
    fn document_ids(&self) -> &[String];
}
