//! Table of contents extraction
//!
//! Headings are read straight from the markdown source so the entries exist
//! before the body is rendered. The markdown renderer derives heading ids
//! with the same functions, keeping anchors and links in sync.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref TOC_HEADING: Regex = Regex::new(r"^(#{2,3})\s+(.+?)\s*$").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref CLOSING_HASHES: Regex = Regex::new(r"\s+#+$").unwrap();
}

/// A single table of contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 2 or 3
    pub level: u8,
    pub text: String,
    /// Anchor id of the rendered heading
    pub id: String,
}

/// Extract level 2 and 3 headings from a markdown body. Returns None when
/// fewer than `min_headings` are found.
pub fn extract_toc(markdown: &str, min_headings: usize) -> Option<Vec<TocEntry>> {
    let mut entries = Vec::new();
    let mut fence: Option<&str> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if trimmed.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }

        // Four spaces of indent make an indented code block
        let unindented = line.trim_start_matches(' ');
        if line.len() - unindented.len() > 3 {
            continue;
        }
        if let Some(caps) = TOC_HEADING.captures(unindented) {
            let text = heading_text(&caps[2]);
            if text.is_empty() {
                continue;
            }
            entries.push(TocEntry {
                level: caps[1].len() as u8,
                id: slugify(&text),
                text,
            });
        }
    }

    if entries.len() >= min_headings.max(1) {
        Some(entries)
    } else {
        None
    }
}

/// Display text of a heading: optional closing hashes and inline emphasis
/// markers removed.
pub fn heading_text(raw: &str) -> String {
    let raw = raw.trim();
    if raw.chars().all(|c| c == '#') {
        return String::new();
    }
    let raw = CLOSING_HASHES.replace(raw, "");
    raw.chars()
        .filter(|c| *c != '*' && *c != '`')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Anchor id for a heading: lowercase, non-word characters stripped,
/// whitespace runs collapsed to single hyphens.
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), "-").into_owned()
}
