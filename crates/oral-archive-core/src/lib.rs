//! # Oral Archive Core
//!
//! The I/O-free browse pipeline for the oral archive: record models,
//! title slugs, the full-text index seam, the record store, the search
//! executor, query state, and result rendering.
//!
//! ```text
//!  QueryState ──▶ search::execute ──▶ render::render ──▶ cards + summary
//!                      │    │
//!               SearchIndex  RecordStore
//! ```
//!
//! This crate performs no filesystem or network access. Loading a corpus
//! and serving it belong to the `oral-archive` app crate.

pub mod detail;
pub mod index;
pub mod models;
pub mod query;
pub mod render;
pub mod search;
pub mod session;
pub mod slug;
pub mod store;
