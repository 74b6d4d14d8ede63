//! Browse and search over a loaded corpus.
//!
//! Thin application layer over [`oral_archive_core::session`]: turns config
//! and request inputs into [`RenderOptions`], runs one browse session step,
//! and prints or returns the rendered results. Used by `archive search`,
//! `archive tag`, and `GET /browsearchives`.

use anyhow::Result;
use oral_archive_core::render::{RenderOptions, RenderedResults};
use oral_archive_core::session::{BrowseSession, Update};

use crate::config::Config;
use crate::corpus::{load_corpus, Corpus};

/// Render inputs from config, with an optional viewport width override.
pub fn render_options(config: &Config, viewport_width: Option<u32>) -> Result<RenderOptions> {
    Ok(RenderOptions {
        base_path: config.site.base_path.clone(),
        breakpoints: config.layout.breakpoints()?,
        viewport_width: viewport_width.unwrap_or(config.site.default_viewport_width),
    })
}

/// Render the browse page for an optional initial query (the `s` parameter).
pub fn browse(corpus: &Corpus, options: RenderOptions, query: Option<String>) -> RenderedResults {
    BrowseSession::new(&corpus.index, &corpus.store, query, options).view()
}

/// Apply a tag-click to a fresh session and return the update.
pub fn click_tag(corpus: &Corpus, options: RenderOptions, tag: &str) -> Update {
    let mut session = BrowseSession::new(&corpus.index, &corpus.store, None, options);
    session.click_tag(tag)
}

/// CLI entry point for `archive search`.
pub fn run_search(
    config: &Config,
    query: Option<String>,
    viewport_width: Option<u32>,
    json: bool,
) -> Result<()> {
    let corpus = load_corpus(config)?;
    let view = browse(&corpus, render_options(config, viewport_width)?, query);
    print_view(&view, json)
}

/// CLI entry point for `archive tag`.
pub fn run_tag(config: &Config, tag: &str, viewport_width: Option<u32>, json: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    let update = click_tag(&corpus, render_options(config, viewport_width)?, tag);
    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }
    print_view(&update.view, false)
}

fn print_view(view: &RenderedResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    if let Some(ref summary) = view.summary {
        println!("{}", summary);
        println!();
    }

    if view.count == 0 {
        println!("No results.");
        return Ok(());
    }

    for (c, column) in view.columns.iter().enumerate() {
        println!("--- Column {} ({}) ---", c + 1, column.len());
        for card in column {
            println!("{}", card.title);
            if !card.tags.is_empty() {
                println!("    tags: {}", card.tags.join(", "));
            }
            println!("    href: {}", card.href);
            println!("    id: {}", card.id);
        }
        println!();
    }

    Ok(())
}
