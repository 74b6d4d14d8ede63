//! Built-in inverted [`SearchIndex`] over title, teaser text and tags.
//!
//! Tokens are lowercase alphanumeric runs. Each `(token, record)` posting
//! accumulates a field-weighted occurrence count:
//!
//! | Field | Weight |
//! |-------|--------|
//! | title | 3 |
//! | tags | 2 |
//! | teaser plain text | 1 |
//!
//! # Lookup
//!
//! 1. Each query token matches index terms equal to it (weight × 2) or
//!    starting with it (weight × 1), so partially typed words still hit.
//! 2. A record's score for one token is its best matching posting.
//! 3. A record must match every query token.
//! 4. Score is the sum over tokens; ties keep build order.
//!
//! The postings map is a `BTreeMap` so prefix matches are a range scan and
//! the serialized index is byte-stable across builds.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{IndexHit, SearchIndex};
use crate::models::ArchiveRecord;

const TITLE_WEIGHT: u32 = 3;
const TAG_WEIGHT: u32 = 2;
const TEASER_WEIGHT: u32 = 1;

/// One record's weight for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub id: String,
    pub weight: u32,
}

/// Token → postings map plus the build order of record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    documents: Vec<String>,
    postings: BTreeMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    /// Build an index over the indexed fields of `records`.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ArchiveRecord>,
    {
        let mut documents = Vec::new();
        let mut weights: BTreeMap<String, Vec<(String, u32)>> = BTreeMap::new();

        for rec in records {
            documents.push(rec.id.clone());

            let mut per_term: HashMap<String, u32> = HashMap::new();
            for tok in tokenize_text(&rec.title) {
                *per_term.entry(tok).or_default() += TITLE_WEIGHT;
            }
            for tag in &rec.tags {
                for tok in tokenize_text(tag) {
                    *per_term.entry(tok).or_default() += TAG_WEIGHT;
                }
            }
            for tok in tokenize_text(&rec.teaser_plain_text) {
                *per_term.entry(tok).or_default() += TEASER_WEIGHT;
            }

            for (term, weight) in per_term {
                weights
                    .entry(term)
                    .or_default()
                    .push((rec.id.clone(), weight));
            }
        }

        let position: HashMap<&str, usize> = documents
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let postings = weights
            .into_iter()
            .map(|(term, mut list)| {
                list.sort_by_key(|(id, _)| position.get(id.as_str()).copied());
                let list = list
                    .into_iter()
                    .map(|(id, weight)| Posting { id, weight })
                    .collect();
                (term, list)
            })
            .collect();

        Self {
            documents,
            postings,
        }
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Postings for an exact term, if indexed.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    fn matches_for(&self, token: &str) -> HashMap<&str, u32> {
        let mut best: HashMap<&str, u32> = HashMap::new();
        for (term, list) in self
            .postings
            .range(token.to_string()..)
            .take_while(|(term, _)| term.starts_with(token))
        {
            let factor = if term == token { 2 } else { 1 };
            for p in list {
                let score = p.weight * factor;
                let slot = best.entry(p.id.as_str()).or_insert(0);
                if score > *slot {
                    *slot = score;
                }
            }
        }
        best
    }
}

/// Lowercase alphanumeric runs of `text`.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

impl SearchIndex for InvertedIndex {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = tokenize_text(text);
        let mut seen = std::collections::HashSet::new();
        tokens.retain(|t| seen.insert(t.clone()));
        tokens
    }

    fn lookup(&self, tokens: &[String]) -> Vec<IndexHit> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut totals: HashMap<&str, u32> = HashMap::new();
        for (i, token) in tokens.iter().enumerate() {
            let matches = self.matches_for(token);
            if i == 0 {
                totals = matches;
            } else {
                totals.retain(|id, total| match matches.get(id) {
                    Some(s) => {
                        *total += s;
                        true
                    }
                    None => false,
                });
            }
            if totals.is_empty() {
                return Vec::new();
            }
        }

        let position: HashMap<&str, usize> = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut hits: Vec<(usize, IndexHit)> = totals
            .into_iter()
            .map(|(id, score)| {
                let pos = position.get(id).copied().unwrap_or(usize::MAX);
                (
                    pos,
                    IndexHit {
                        id: id.to_string(),
                        score,
                    },
                )
            })
            .collect();
        hits.sort_by(|a, b| {
            b.1.score
                .cmp(&a.1.score)
                .then(a.0.cmp(&b.0))
                .then_with(|| a.1.id.cmp(&b.1.id))
        });
        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    fn document_ids(&self) -> &[String] {
        &self.documents
    }
}
