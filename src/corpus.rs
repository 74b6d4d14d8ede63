//! Corpus loader: content export + search index → in-memory corpus.
//!
//! The content export is the JSON the build step pulls from the CMS:
//!
//! ```json
//! {
//!   "transcripts": [ { "id": "…", "title": "…", "teaserHtml": "…", … } ],
//!   "collections": [ { "title": "…", "blurbHtml": "…", "transcriptIds": ["…"] } ]
//! }
//! ```
//!
//! The index is either built here from the store or read from a prebuilt
//! index file written by `archive export`. A prebuilt file records the
//! SHA-256 digest of the records it was built over (ids plus title, tags
//! and plain-text teaser); loading it against a different store is a
//! fatal error.
//!
//! Every failure in this module is a configuration error. The loader never
//! hands back a partial corpus.

use std::path::Path;

use anyhow::{bail, Context, Result};
use oral_archive_core::index::{InvertedIndex, SearchIndex};
use oral_archive_core::models::{Collection, Transcript};
use oral_archive_core::store::RecordStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::Config;

/// Index file format version written by [`IndexFile::new`].
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// The CMS content export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentExport {
    pub transcripts: Vec<Transcript>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

/// On-disk prebuilt index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    pub version: u32,
    pub store_digest: String,
    pub index: InvertedIndex,
}

impl IndexFile {
    pub fn new(index: InvertedIndex, store: &RecordStore) -> Self {
        Self {
            version: INDEX_FORMAT_VERSION,
            store_digest: store_digest(store),
            index,
        }
    }
}

/// A loaded, validated corpus. Immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub transcripts: Vec<Transcript>,
    pub collections: Vec<Collection>,
    pub store: RecordStore,
    pub index: InvertedIndex,
}

impl Corpus {
    /// Build a corpus from an export, building the index when none is given.
    pub fn from_export(export: ContentExport, prebuilt: Option<IndexFile>) -> Result<Self> {
        if export.transcripts.is_empty() {
            tracing::warn!("content export contains no transcripts");
        }
        if let Some(t) = export.transcripts.iter().find(|t| t.title.trim().is_empty()) {
            bail!("transcript {} has an empty title", t.id);
        }

        let records = export.transcripts.iter().map(Transcript::to_record).collect();
        let store = RecordStore::from_records(records).context("invalid record store")?;

        let index = match prebuilt {
            Some(file) => {
                verify_index(&file, &store)?;
                file.index
            }
            None => InvertedIndex::build(store.records()),
        };

        for col in &export.collections {
            let dangling = col
                .transcript_ids
                .iter()
                .filter(|id| store.get(id).is_none())
                .count();
            if dangling > 0 {
                tracing::warn!(
                    collection = %col.title,
                    dangling,
                    "collection references transcripts missing from the export"
                );
            }
        }

        tracing::info!(
            records = store.len(),
            terms = index.term_count(),
            collections = export.collections.len(),
            "corpus loaded"
        );

        Ok(Self {
            transcripts: export.transcripts,
            collections: export.collections,
            store,
            index,
        })
    }
}

/// Load the corpus named by `config`.
pub fn load_corpus(config: &Config) -> Result<Corpus> {
    let export = read_export(&config.corpus.path)?;
    let prebuilt = match &config.corpus.index_path {
        Some(path) => Some(read_index_file(path)?),
        None => None,
    };
    Corpus::from_export(export, prebuilt)
}

pub fn read_export(path: &Path) -> Result<ContentExport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read content export: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed content export: {}", path.display()))
}

pub fn read_index_file(path: &Path) -> Result<IndexFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read search index: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed search index: {}", path.display()))
}

/// SHA-256 over every record's id and indexed fields, in store order.
///
/// Fields are separated by `0x1f` and records by `0x1e`, so an edit to a
/// title, tag or plain-text teaser changes the digest even when the ids
/// stay the same.
pub fn store_digest(store: &RecordStore) -> String {
    let mut hasher = Sha256::new();
    for rec in store.records() {
        hasher.update(rec.id.as_bytes());
        hasher.update([FIELD_SEP]);
        hasher.update(rec.title.as_bytes());
        hasher.update([FIELD_SEP]);
        for tag in &rec.tags {
            hasher.update(tag.as_bytes());
            hasher.update([TAG_SEP]);
        }
        hasher.update([FIELD_SEP]);
        hasher.update(rec.teaser_plain_text.as_bytes());
        hasher.update([RECORD_SEP]);
    }
    hex::encode(hasher.finalize())
}

const FIELD_SEP: u8 = 0x1f;
const RECORD_SEP: u8 = 0x1e;
const TAG_SEP: u8 = 0x1d;

fn verify_index(file: &IndexFile, store: &RecordStore) -> Result<()> {
    if file.version != INDEX_FORMAT_VERSION {
        bail!(
            "unsupported search index version {} (expected {})",
            file.version,
            INDEX_FORMAT_VERSION
        );
    }
    let digest = store_digest(store);
    if file.store_digest != digest {
        bail!(
            "search index was built for a different corpus (index digest {}, corpus digest {}); rerun `archive export`",
            file.store_digest,
            digest
        );
    }
    let built_over: Vec<&str> = file.index.document_ids().iter().map(String::as_str).collect();
    let expected: Vec<&str> = store.ids().collect();
    if built_over != expected {
        bail!("search index document list does not match its recorded digest");
    }
    Ok(())
}
