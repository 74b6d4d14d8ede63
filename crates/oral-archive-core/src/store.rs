//! The record store: every [`ArchiveRecord`] of the corpus, keyed by id.
//!
//! Records keep their load order, which is the "browse everything" order
//! shown for an empty query. Construction rejects empty and duplicate ids;
//! a store that exists is always consistent.

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::models::ArchiveRecord;

/// Ordered, id-addressable set of archive records.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: Vec<ArchiveRecord>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// Build a store, failing on an empty or repeated id.
    pub fn from_records(records: Vec<ArchiveRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (i, rec) in records.iter().enumerate() {
            if rec.id.is_empty() {
                bail!("record at position {} has an empty id", i);
            }
            if by_id.insert(rec.id.clone(), i).is_some() {
                bail!("duplicate record id: {}", rec.id);
            }
        }
        Ok(Self { records, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&ArchiveRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[ArchiveRecord] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
