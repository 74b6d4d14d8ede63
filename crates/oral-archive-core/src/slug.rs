//! Title slugification for detail-page routing.
//!
//! A slug is derived from a record's title and is never stored. Detail
//! routes resolve a slug back to a record by slugifying titles and
//! comparing, so two titles with the same slug both resolve to the first
//! record in store order.
//!
//! # Rules
//!
//! 1. The title is transliterated to ASCII (`Đà Nẵng` → `Da Nang`).
//! 2. `&` becomes the word `and`.
//! 3. Letters are lowercased; ASCII alphanumerics are kept.
//! 4. Every run of other characters (spaces, punctuation, symbols, and
//!    anything without a transliteration) collapses into a single `-`.
//! 5. Leading and trailing separators are dropped.
//!
//! The output contains only `[a-z0-9]` and single interior dashes, so it
//! is URL-safe and slugifying a slug returns it unchanged.
//!
//! ```rust
//! use oral_archive_core::slug::slugify;
//!
//! assert_eq!(slugify("The Cold War (1950-1991)."), "the-cold-war-1950-1991");
//! assert_eq!(slugify("Trade & Empire"), "trade-and-empire");
//! assert_eq!(slugify("Đà Nẵng & Huế"), "da-nang-and-hue");
//! ```

use deunicode::deunicode;

/// Produce the URL slug for a title.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;

    for ch in ascii.chars() {
        if ch == '&' {
            push_word(&mut slug, &mut pending_sep, "and");
            pending_sep = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

fn push_word(slug: &mut String, pending_sep: &mut bool, word: &str) {
    if !slug.is_empty() {
        slug.push('-');
    }
    *pending_sep = false;
    slug.push_str(word);
}

/// Join a base path and a slug into a detail route.
///
/// Trailing slashes on `base_path` are ignored; an empty base yields a
/// relative route (`<slug>`).
pub fn detail_href(base_path: &str, title: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let slug = slugify(title);
    if base.is_empty() {
        slug
    } else {
        format!("{}/{}", base, slug)
    }
}
