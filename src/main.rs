//! # Oral Archive CLI (`archive`)
//!
//! ## Usage
//!
//! ```bash
//! archive --config ./config/archive.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `archive search [QUERY]` | Browse the archive, or search it |
//! | `archive tag <TAG>` | Search by clicking a tag |
//! | `archive get <SLUG>` | Show a transcript's detail page |
//! | `archive collection <SLUG>` | Show a collection page |
//! | `archive recent` | List recently added transcripts |
//! | `archive export` | Write the prebuilt index and record store |
//! | `archive slug <TITLE>` | Print the route slug for a title |
//! | `archive serve` | Start the HTTP API |
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust
//! verbosity (default `warn`).

use clap::{Parser, Subcommand};
use oral_archive::{collections, config, export, get, search, server};
use oral_archive_core::slug::slugify;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Oral Archive CLI.
#[derive(Parser)]
#[command(
    name = "archive",
    about = "Oral Archive — search and browse a static oral-history archive",
    version,
    long_about = "Loads the CMS content export for an oral-history archive, builds a \
    full-text index over transcript titles, teasers and tags, and serves browse, search \
    and detail views via a CLI and JSON HTTP API."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/archive.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse or search the archive.
    ///
    /// Without a query every transcript is listed in corpus order. With a
    /// query, prints a result-count summary and the matching cards.
    Search {
        /// Search query. Omit to browse everything.
        query: Option<String>,

        /// Viewport width in pixels, used to pick the column count.
        #[arg(long)]
        width: Option<u32>,

        /// Print the rendered result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search by tag, as if its pill were clicked.
    Tag {
        tag: String,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Show a transcript's detail page by slug.
    Get {
        /// Slug, e.g. `the-cold-war-1950-1991`.
        slug: String,
    },

    /// Show a collection page by slug.
    Collection {
        slug: String,

        #[arg(long)]
        width: Option<u32>,
    },

    /// List recently added transcripts.
    Recent {
        #[arg(long)]
        width: Option<u32>,
    },

    /// Write `index.json` and `store.json` for static hosting.
    Export {
        /// Output directory.
        #[arg(long, default_value = "./public")]
        output: PathBuf,
    },

    /// Print the route slug for a title.
    Slug { title: String },

    /// Start the HTTP API.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Slug { title } = &cli.command {
        println!("{}", slugify(title));
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search { query, width, json } => {
            search::run_search(&cfg, query, width, json)?;
        }
        Commands::Tag { tag, width, json } => {
            search::run_tag(&cfg, &tag, width, json)?;
        }
        Commands::Get { slug } => {
            get::run_get(&cfg, &slug)?;
        }
        Commands::Collection { slug, width } => {
            collections::run_collection(&cfg, &slug, width)?;
        }
        Commands::Recent { width } => {
            collections::run_recent(&cfg, width)?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, &output)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Slug { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
