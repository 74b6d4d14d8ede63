//! Collection pages and the recently added list.
//!
//! Used by `archive collection`, `archive recent`, and the matching HTTP
//! routes.

use anyhow::{bail, Result};
use oral_archive_core::detail::{
    collection_page, find_collection, recently_added, CollectionPage, RecentEntry,
};

use crate::config::Config;
use crate::corpus::{load_corpus, Corpus};

/// Resolve and render a collection page by slug.
pub fn get_collection(
    corpus: &Corpus,
    config: &Config,
    slug: &str,
    viewport_width: Option<u32>,
) -> Result<CollectionPage> {
    let collection = match find_collection(&corpus.collections, slug) {
        Some(c) => c,
        None => bail!("collection not found: {}", slug),
    };
    Ok(collection_page(
        collection,
        &corpus.store,
        &config.site.base_path,
        &config.layout.breakpoints()?,
        viewport_width.unwrap_or(config.site.default_viewport_width),
    ))
}

/// Newest transcripts for the viewport.
pub fn recent(corpus: &Corpus, config: &Config, viewport_width: Option<u32>) -> Vec<RecentEntry> {
    recently_added(
        &corpus.transcripts,
        &config.site.base_path,
        &config.recent,
        viewport_width.unwrap_or(config.site.default_viewport_width),
    )
}

/// CLI entry point for `archive collection`.
pub fn run_collection(config: &Config, slug: &str, viewport_width: Option<u32>) -> Result<()> {
    let corpus = load_corpus(config)?;
    let page = get_collection(&corpus, config, slug, viewport_width)?;

    println!("--- Collection ---");
    println!("title: {}", page.title);
    println!("slug:  {}", page.slug);
    println!();
    println!("{}", page.blurb_html);
    println!();
    println!("--- Transcripts ({}) ---", page.count);
    if let Some(ref subtitle) = page.subtitle {
        println!("{}", subtitle);
    }
    for (c, column) in page.columns.iter().enumerate() {
        for card in column {
            println!("[col {}] {} -> {}", c + 1, card.title, card.href);
        }
    }
    Ok(())
}

/// CLI entry point for `archive recent`.
pub fn run_recent(config: &Config, viewport_width: Option<u32>) -> Result<()> {
    let corpus = load_corpus(config)?;
    let entries = recent(&corpus, config, viewport_width);
    if entries.is_empty() {
        println!("No transcripts.");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        let date = entry
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!("{}. {} ({})", i + 1, entry.title, date);
        println!("    href: {}", entry.href);
    }
    Ok(())
}
