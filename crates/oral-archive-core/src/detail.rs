//! Detail projections: transcript pages, collection pages, recently added.
//!
//! Detail routes carry only a slug. Resolution slugifies each candidate's
//! title and takes the first match in corpus order.
//!
//! Optional content renders as the literal [`MISSING`] text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Collection, Transcript};
use crate::render::{masonry, Breakpoints, Card};
use crate::slug::{detail_href, slugify};
use crate::store::RecordStore;

/// Fallback text for absent optional content.
pub const MISSING: &str = "None";

/// A transcript's full-detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub teaser_html: String,
    pub interviewer: String,
    pub interviewee: String,
    pub tags: Vec<String>,
    pub english_transcript_html: String,
    /// Present only when a vernacular transcript exists.
    pub vernacular_transcript_html: Option<String>,
    pub original_language: Option<String>,
    pub endnotes_html: String,
}

impl TranscriptPage {
    pub fn from_transcript(t: &Transcript) -> Self {
        Self {
            id: t.id.clone(),
            title: t.title.clone(),
            slug: slugify(&t.title),
            teaser_html: t.teaser_html.clone(),
            interviewer: or_missing(t.interviewer.as_deref()),
            interviewee: or_missing(t.interviewee.as_deref()),
            tags: t.tags.clone(),
            english_transcript_html: t.english_transcript_html.clone(),
            vernacular_transcript_html: t.vernacular_transcript_html.clone(),
            // Only labels the vernacular text.
            original_language: t
                .vernacular_transcript_html
                .as_ref()
                .and(t.original_language.clone()),
            endnotes_html: or_missing(t.endnotes_html.as_deref()),
        }
    }

    pub fn has_vernacular(&self) -> bool {
        self.vernacular_transcript_html.is_some()
    }
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// First transcript whose title slugifies to `slug`.
pub fn find_transcript<'a>(transcripts: &'a [Transcript], slug: &str) -> Option<&'a Transcript> {
    let wanted = slugify(slug);
    transcripts.iter().find(|t| slugify(&t.title) == wanted)
}

/// First collection whose title slugifies to `slug`.
pub fn find_collection<'a>(collections: &'a [Collection], slug: &str) -> Option<&'a Collection> {
    let wanted = slugify(slug);
    collections.iter().find(|c| slugify(&c.title) == wanted)
}

/// A collection page: blurb plus its transcripts as cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionPage {
    pub title: String,
    pub slug: String,
    pub blurb_html: String,
    /// "These transcripts were interviewed by …", from the first member.
    pub subtitle: Option<String>,
    pub count: usize,
    pub columns: Vec<Vec<Card>>,
}

/// Build a collection page. Member ids missing from the store are skipped.
///
/// The blurb comes from the CMS as raw HTML and is sanitized here; scripts,
/// event handlers and other unsafe markup are removed.
pub fn collection_page(
    collection: &Collection,
    store: &RecordStore,
    base_path: &str,
    breakpoints: &Breakpoints,
    viewport_width: u32,
) -> CollectionPage {
    let members: Vec<_> = collection
        .transcript_ids
        .iter()
        .filter_map(|id| store.get(id))
        .collect();

    let subtitle = members
        .first()
        .and_then(|r| r.interviewer.as_deref())
        .map(|who| format!("These transcripts were interviewed by {}", who));

    let cards: Vec<Card> = members
        .iter()
        .map(|r| Card::from_record(r, base_path))
        .collect();
    let count = cards.len();

    CollectionPage {
        title: collection.title.clone(),
        slug: slugify(&collection.title),
        blurb_html: ammonia::clean(&collection.blurb_html),
        subtitle,
        count,
        columns: masonry(cards, breakpoints.columns_for(viewport_width)),
    }
}

/// How many recently added transcripts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentLimits {
    pub limit: usize,
    pub wide_limit: usize,
    pub wide_min_width: u32,
}

impl Default for RecentLimits {
    fn default() -> Self {
        Self {
            limit: 8,
            wide_limit: 10,
            wide_min_width: 2500,
        }
    }
}

impl RecentLimits {
    pub fn for_width(&self, viewport_width: u32) -> usize {
        if viewport_width >= self.wide_min_width {
            self.wide_limit
        } else {
            self.limit
        }
    }
}

/// A recently added entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentEntry {
    pub title: String,
    pub teaser_html: String,
    pub href: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Newest transcripts first, sliced for the viewport.
///
/// Undated transcripts sort after dated ones; ties keep corpus order.
pub fn recently_added(
    transcripts: &[Transcript],
    base_path: &str,
    limits: &RecentLimits,
    viewport_width: u32,
) -> Vec<RecentEntry> {
    // Stable sort: equal dates keep corpus order, undated entries go last.
    let mut sorted: Vec<&Transcript> = transcripts.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .take(limits.for_width(viewport_width))
        .map(|t| RecentEntry {
            title: t.title.clone(),
            teaser_html: t.teaser_html.clone(),
            href: detail_href(base_path, &t.title),
            created_at: t.created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn transcript(id: &str, title: &str, day: Option<u32>) -> Transcript {
        Transcript {
            id: id.to_string(),
            title: title.to_string(),
            interviewer: Some("Masuda Hajimu".to_string()),
            interviewee: None,
            tags: vec!["cold war".to_string()],
            teaser_html: format!("<p>{}</p>", title),
            teaser_plain_text: title.to_string(),
            english_transcript_html: "<p>Full text.</p>".to_string(),
            vernacular_transcript_html: None,
            original_language: Some("Thai".to_string()),
            endnotes_html: None,
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_transcript_page_fallbacks() {
        let page = TranscriptPage::from_transcript(&transcript("t1", "Saigon Voices", None));
        assert_eq!(page.endnotes_html, MISSING);
        assert_eq!(page.interviewee, MISSING);
        assert_eq!(page.interviewer, "Masuda Hajimu");
        assert!(!page.has_vernacular());
        assert!(page.original_language.is_none());
        assert_eq!(page.slug, "saigon-voices");
    }

    #[test]
    fn test_transcript_page_with_vernacular() {
        let mut t = transcript("t1", "Saigon Voices", None);
        t.vernacular_transcript_html = Some("<p>Tiếng Việt</p>".to_string());
        t.endnotes_html = Some("<ol><li>Note</li></ol>".to_string());
        let page = TranscriptPage::from_transcript(&t);
        assert!(page.has_vernacular());
        assert_eq!(page.original_language.as_deref(), Some("Thai"));
        assert_eq!(page.endnotes_html, "<ol><li>Note</li></ol>");
    }

    #[test]
    fn test_find_transcript_by_slug() {
        let ts = vec![
            transcript("a", "The Cold War (1950-1991).", None),
            transcript("b", "the cold war 1950 1991", None),
        ];
        assert_eq!(find_transcript(&ts, "the-cold-war-1950-1991").unwrap().id, "a");
        assert!(find_transcript(&ts, "nothing-here").is_none());
    }

    #[test]
    fn test_collection_page() {
        let ts = vec![
            transcript("a", "First Voice", None),
            transcript("b", "Second Voice", None),
        ];
        let store = RecordStore::from_records(ts.iter().map(|t| t.to_record()).collect()).unwrap();
        let col = Collection {
            title: "Southeast Asia".to_string(),
            blurb_html: "<p>Blurb</p>".to_string(),
            transcript_ids: vec!["b".to_string(), "ghost".to_string(), "a".to_string()],
        };
        let page = collection_page(&col, &store, "/browsearchives", &Breakpoints::default(), 400);
        assert_eq!(page.count, 2);
        assert_eq!(page.columns.len(), 1);
        assert_eq!(page.columns[0][0].title, "Second Voice");
        assert_eq!(page.columns[0][0].href, "/browsearchives/second-voice");
        assert_eq!(
            page.subtitle.as_deref(),
            Some("These transcripts were interviewed by Masuda Hajimu")
        );
        assert_eq!(find_collection(&[col], "southeast-asia").unwrap().title, "Southeast Asia");
    }

    #[test]
    fn test_collection_blurb_is_sanitized() {
        let store = RecordStore::from_records(vec![transcript("a", "First Voice", None).to_record()])
            .unwrap();
        let col = Collection {
            title: "Unsafe".to_string(),
            blurb_html: "<p onclick=\"steal()\">Voices<script>alert(1)</script></p>".to_string(),
            transcript_ids: vec!["a".to_string()],
        };
        let page = collection_page(&col, &store, "/b", &Breakpoints::default(), 400);
        assert!(!page.blurb_html.contains("<script"));
        assert!(!page.blurb_html.contains("alert(1)"));
        assert!(!page.blurb_html.contains("onclick"));
        assert!(page.blurb_html.contains("Voices"));
    }

    #[test]
    fn test_recently_added_ties_keep_corpus_order() {
        let ts = vec![
            transcript("x", "X", Some(3)),
            transcript("y", "Y", Some(3)),
            transcript("z", "Z", None),
            transcript("w", "W", None),
        ];
        let titles: Vec<String> = recently_added(&ts, "/b", &RecentLimits::default(), 1280)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["X", "Y", "Z", "W"]);
    }

    #[test]
    fn test_recently_added_order_and_limit() {
        let ts = vec![
            transcript("old", "Old", Some(1)),
            transcript("undated", "Undated", None),
            transcript("new", "New", Some(9)),
            transcript("mid", "Mid", Some(5)),
        ];
        let limits = RecentLimits {
            limit: 2,
            wide_limit: 3,
            wide_min_width: 2500,
        };
        let narrow: Vec<String> = recently_added(&ts, "/b", &limits, 1280)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(narrow, vec!["New", "Mid"]);
        let wide = recently_added(&ts, "/b", &limits, 2560);
        assert_eq!(wide.len(), 3);
        assert_eq!(wide[2].title, "Old");
        assert_eq!(wide[0].href, "/b/new");
    }
}
