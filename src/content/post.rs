//! Post models

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Post metadata, everything except the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    /// Slug (source filename without extension)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary used in listings, feeds and meta tags
    pub description: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Last updated date
    pub updated: Option<DateTime<Utc>>,

    /// Post author
    pub author: String,

    /// Cover image path
    pub image: Option<String>,

    /// Estimated reading time in minutes
    pub reading_time: usize,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl PostMeta {
    /// Update date if present, publish date otherwise
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated.unwrap_or(self.date)
    }
}

/// A blog post with its raw markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw markdown content
    pub body: String,
}

impl std::ops::Deref for Post {
    type Target = PostMeta;

    fn deref(&self) -> &PostMeta {
        &self.meta
    }
}

/// Reading time in minutes for a markdown body: whitespace separated words
/// divided by `words_per_minute`, rounded up, at least one minute.
pub fn reading_time(body: &str, words_per_minute: usize) -> usize {
    let words = body.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1)).max(1)
}
