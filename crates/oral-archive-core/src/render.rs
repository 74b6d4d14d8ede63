//! Result rendering: records → cards, summary line and masonry columns.
//!
//! The renderer never touches teaser markup; it is copied into the card
//! as-is because the content pipeline sanitized it upstream.
//!
//! # Column layout
//!
//! The number of columns comes from a [`Breakpoints`] table keyed by
//! viewport width. Entries are `(max_width, columns)`; the first entry
//! whose `max_width` is at least the viewport width wins, otherwise
//! `default_columns` applies. Cards are then dealt round-robin, so card
//! `i` lands in column `i % n`.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::ArchiveRecord;
use crate::search::ResultSet;
use crate::slug::detail_href;

/// A display card for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub teaser_html: String,
    pub tags: Vec<String>,
    /// Detail route, `<base_path>/<slug>`.
    pub href: String,
}

impl Card {
    pub fn from_record(record: &ArchiveRecord, base_path: &str) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            teaser_html: record.teaser_html.clone(),
            tags: record.tags.iter().cloned().collect(),
            href: detail_href(base_path, &record.title),
        }
    }
}

/// One row of the breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: u32,
    pub columns: usize,
}

/// Viewport width → column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakpoints {
    steps: Vec<Breakpoint>,
    default_columns: usize,
}

impl Breakpoints {
    /// Build a table. Widths must be strictly increasing and every column
    /// count at least one.
    pub fn new(steps: Vec<Breakpoint>, default_columns: usize) -> Result<Self> {
        if default_columns == 0 {
            bail!("default column count must be >= 1");
        }
        for pair in steps.windows(2) {
            if pair[1].max_width <= pair[0].max_width {
                bail!(
                    "breakpoint widths must be strictly increasing ({} then {})",
                    pair[0].max_width,
                    pair[1].max_width
                );
            }
        }
        if let Some(bp) = steps.iter().find(|bp| bp.columns == 0) {
            bail!("breakpoint at {}px has zero columns", bp.max_width);
        }
        Ok(Self {
            steps,
            default_columns,
        })
    }

    /// Column count for a viewport width.
    pub fn columns_for(&self, viewport_width: u32) -> usize {
        self.steps
            .iter()
            .find(|bp| viewport_width <= bp.max_width)
            .map(|bp| bp.columns)
            .unwrap_or(self.default_columns)
    }
}

impl Default for Breakpoints {
    /// 1 column up to 992px, 2 up to 1280px, 3 beyond.
    fn default() -> Self {
        Self {
            steps: vec![
                Breakpoint {
                    max_width: 992,
                    columns: 1,
                },
                Breakpoint {
                    max_width: 1280,
                    columns: 2,
                },
                Breakpoint {
                    max_width: 2560,
                    columns: 3,
                },
            ],
            default_columns: 3,
        }
    }
}

/// Presentation inputs that used to be read from the environment.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub base_path: String,
    pub breakpoints: Breakpoints,
    pub viewport_width: u32,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResults {
    /// Present only while a query is active.
    pub summary: Option<String>,
    pub count: usize,
    pub columns: Vec<Vec<Card>>,
}

impl RenderedResults {
    /// Cards in result order, reassembled from the columns.
    pub fn cards_in_order(&self) -> Vec<&Card> {
        let n = self.columns.len();
        (0..self.count)
            .filter_map(|i| self.columns.get(i % n.max(1))?.get(i / n.max(1)))
            .collect()
    }
}

/// Render a result set for display.
pub fn render(
    results: &ResultSet<'_>,
    query_for_display: &str,
    opts: &RenderOptions,
) -> RenderedResults {
    let cards: Vec<Card> = results
        .iter()
        .map(|rec| Card::from_record(rec, &opts.base_path))
        .collect();
    let count = cards.len();
    RenderedResults {
        summary: summary_line(query_for_display, count),
        count,
        columns: masonry(cards, opts.breakpoints.columns_for(opts.viewport_width)),
    }
}

/// `'<query>' returned <k> search results.`, or nothing for an empty query.
pub fn summary_line(query: &str, count: usize) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(format!("'{}' returned {} search results.", query, count))
    }
}

/// Deal items round-robin into `columns` columns.
///
/// Always returns exactly `max(columns, 1)` columns, some possibly empty.
pub fn masonry<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    let n = columns.max(1);
    let mut out: Vec<Vec<T>> = (0..n).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        out[i % n].push(item);
    }
    out
}
