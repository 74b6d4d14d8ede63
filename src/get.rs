//! Transcript retrieval by slug.
//!
//! Detail routes carry a slug, not an id. Used by the `archive get` CLI
//! command and `GET /browsearchives/archives/{slug}`.

use anyhow::{bail, Result};
use oral_archive_core::detail::{find_transcript, TranscriptPage};

use crate::config::Config;
use crate::corpus::{load_corpus, Corpus};

/// Core get function returning structured data (used by CLI and server).
pub fn get_transcript(corpus: &Corpus, slug: &str) -> Result<TranscriptPage> {
    match find_transcript(&corpus.transcripts, slug) {
        Some(t) => Ok(TranscriptPage::from_transcript(t)),
        None => bail!("transcript not found: {}", slug),
    }
}

/// CLI entry point for `archive get`.
pub fn run_get(config: &Config, slug: &str) -> Result<()> {
    let corpus = load_corpus(config)?;
    let page = get_transcript(&corpus, slug)?;

    println!("--- Transcript ---");
    println!("id:            {}", page.id);
    println!("title:         {}", page.title);
    println!("slug:          {}", page.slug);
    println!("interviewer:   {}", page.interviewer);
    println!("interviewee:   {}", page.interviewee);
    if let Some(ref lang) = page.original_language {
        println!("language:      {}", lang);
    }
    println!("tags:          {}", page.tags.join(", "));
    println!();

    println!("--- Teaser ---");
    println!("{}", page.teaser_html);
    println!();

    println!("--- English Transcript ---");
    println!("{}", page.english_transcript_html);
    println!();

    if let Some(ref vernacular) = page.vernacular_transcript_html {
        println!("--- Vernacular Transcript ---");
        println!("{}", vernacular);
        println!();
    }

    println!("--- Endnotes ---");
    println!("{}", page.endnotes_html);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::ContentExport;

    fn corpus() -> Corpus {
        let export: ContentExport = serde_json::from_value(serde_json::json!({
            "transcripts": [
                {
                    "id": "cw",
                    "title": "The Cold War (1950-1991).",
                    "teaserHtml": "<p>Decades</p>",
                    "endnotesHtml": "<p>1. Archive box 4</p>"
                }
            ]
        }))
        .unwrap();
        Corpus::from_export(export, None).unwrap()
    }

    #[test]
    fn test_get_by_slug() {
        let page = get_transcript(&corpus(), "the-cold-war-1950-1991").unwrap();
        assert_eq!(page.id, "cw");
        assert_eq!(page.endnotes_html, "<p>1. Archive box 4</p>");
        assert_eq!(page.interviewer, "None");
    }

    #[test]
    fn test_get_missing() {
        let err = get_transcript(&corpus(), "no-such-thing").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
