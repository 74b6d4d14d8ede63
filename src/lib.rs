//! # Oral Archive
//!
//! Search and browse pipeline for a static oral-history archive.
//!
//! The CMS build step exports transcripts and collections as JSON. This
//! crate loads that export, builds (or reads) a full-text index over it,
//! and serves the archive's browse page, transcript details, collection
//! pages and recently added list through a CLI and an HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐
//! │ Content      │──▶│ Corpus       │──▶│ Query → Execute →    │
//! │ export JSON  │   │ store+index  │   │ Render (core crate)  │
//! └──────────────┘   └──────┬───────┘   └──────────┬───────────┘
//!                           │                      │
//!                     ┌─────┴─────┐          ┌─────┴─────┐
//!                     │  export   │          │ CLI / HTTP│
//!                     └───────────┘          └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! archive search                       # browse everything
//! archive search "Saigon" --width 1920 # search, three columns
//! archive tag vietnam                  # tag-click shortcut
//! archive get the-cold-war-1950-1991   # transcript detail
//! archive export --output public/      # prebuilt index + store
//! archive serve                        # HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`corpus`] | Content export loading, index build, consistency checks |
//! | [`search`] | Browse and search, tag-click shortcut |
//! | [`get`] | Transcript detail by slug |
//! | [`collections`] | Collection pages and recently added |
//! | [`export`] | Prebuilt index and store for static hosting |
//! | [`server`] | JSON HTTP API (Axum) with CORS |

pub mod collections;
pub mod config;
pub mod corpus;
pub mod export;
pub mod get;
pub mod search;
pub mod server;
