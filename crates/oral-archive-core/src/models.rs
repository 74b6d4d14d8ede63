//! Core data models for the oral archive.
//!
//! [`ArchiveRecord`] is the shape every stage of the browse pipeline works
//! with. [`Transcript`] is the full content-export entry it is projected
//! from, and [`Collection`] groups transcripts into curated pages.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One oral-history transcript entry as seen by search and result cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    /// Opaque identifier, unique across the corpus and stable across builds.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub interviewee: Option<String>,
    /// Tag set. Ordered and deduplicated.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Pre-sanitized HTML summary. Passed through untouched.
    pub teaser_html: String,
    /// Plain-text teaser used only as index content. Never serialized.
    #[serde(default, skip_serializing)]
    pub teaser_plain_text: String,
}

/// A full transcript entry from the content export.
///
/// Optional content fields are explicit `Option`s; renderers substitute
/// a fallback (see [`crate::detail`]) instead of probing nested fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub interviewee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub teaser_html: String,
    #[serde(default)]
    pub teaser_plain_text: String,
    #[serde(default)]
    pub english_transcript_html: String,
    #[serde(default)]
    pub vernacular_transcript_html: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub endnotes_html: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transcript {
    /// Project the transcript onto the record shape used by search.
    pub fn to_record(&self) -> ArchiveRecord {
        ArchiveRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            interviewer: self.interviewer.clone(),
            interviewee: self.interviewee.clone(),
            tags: self.tags.iter().cloned().collect(),
            teaser_html: self.teaser_html.clone(),
            teaser_plain_text: self.teaser_plain_text.clone(),
        }
    }
}

/// A curated group of transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub title: String,
    #[serde(default)]
    pub blurb_html: String,
    /// Member transcript ids, in display order.
    #[serde(default)]
    pub transcript_ids: Vec<String>,
}
