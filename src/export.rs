//! Export the prebuilt search index and record store for static hosting.
//!
//! Writes two files into the output directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `index.json` | [`IndexFile`]: format version, store digest, inverted index |
//! | `store.json` | Every archive record's display fields, in corpus order |
//!
//! Pointing `[corpus].index_path` at the exported `index.json` skips the
//! index build on later loads.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::corpus::{load_corpus, Corpus, IndexFile};

/// Paths written by [`write_export`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub index: PathBuf,
    pub store: PathBuf,
}

/// Write `index.json` and `store.json` for `corpus` into `dir`.
pub fn write_export(corpus: &Corpus, dir: &Path) -> Result<ExportedFiles> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let index_file = IndexFile::new(corpus.index.clone(), &corpus.store);
    let index_path = dir.join("index.json");
    std::fs::write(&index_path, serde_json::to_string(&index_file)?)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    let store_path = dir.join("store.json");
    std::fs::write(&store_path, serde_json::to_string_pretty(&corpus.store)?)
        .with_context(|| format!("Failed to write {}", store_path.display()))?;

    Ok(ExportedFiles {
        index: index_path,
        store: store_path,
    })
}

/// CLI entry point for `archive export`.
pub fn run_export(config: &Config, output: &Path) -> Result<()> {
    let corpus = load_corpus(config)?;
    let files = write_export(&corpus, output)?;
    println!(
        "Exported {} records, {} index terms",
        corpus.store.len(),
        corpus.index.term_count()
    );
    println!("  index: {}", files.index.display());
    println!("  store: {}", files.store.display());
    Ok(())
}
