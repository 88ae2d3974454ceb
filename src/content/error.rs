//! Content errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the post repository
#[derive(Debug, Error)]
pub enum ContentError {
    /// No post could be loaded for the slug. Missing files, unreadable files
    /// and malformed slugs all end up here.
    #[error("post not found: {0}")]
    NotFound(String),

    /// Two content files resolve to the same slug
    #[error("duplicate slug {slug:?}: {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
