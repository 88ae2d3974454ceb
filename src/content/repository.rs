//! Post repository - loads posts from the content directory
//!
//! A repository is a thin, stateless view over the content directory. Every
//! call reads the files again; nothing is cached between calls, so callers
//! construct one per build or per request.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{reading_time, ContentError, Field, FrontMatter, Post, PostMeta};
use crate::Site;

/// Extensions recognised as markdown content
const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Loads posts from the content directory
#[derive(Debug, Clone)]
pub struct PostRepository {
    content_dir: PathBuf,
    default_author: String,
    words_per_minute: usize,
}

impl PostRepository {
    /// Create a repository over the site's content directory
    pub fn new(site: &Site) -> Self {
        Self {
            content_dir: site.content_dir.clone(),
            default_author: site.config.author.clone(),
            words_per_minute: site.config.words_per_minute,
        }
    }

    /// All posts without their bodies, newest first. Posts sharing a publish
    /// date keep filename order. Unreadable files are skipped.
    pub fn list_posts(&self) -> Vec<PostMeta> {
        let mut posts: Vec<PostMeta> = self
            .content_files()
            .into_iter()
            .filter_map(|(slug, path)| match self.load_post(&slug, &path) {
                Ok(post) => Some(post.meta),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                    None
                }
            })
            .collect();

        // Stable sort: ties stay in enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Load a single post. Every failure is reported as not found.
    pub fn get_post(&self, slug: &str) -> Result<Post, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::NotFound(slug.to_string()));
        }

        let path = MARKDOWN_EXTENSIONS
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        self.load_post(slug, &path).map_err(|e| {
            tracing::debug!("Failed to load post {:?}: {:#}", path, e);
            ContentError::NotFound(slug.to_string())
        })
    }

    /// Slugs of every content file
    pub fn list_slugs(&self) -> BTreeSet<String> {
        self.content_files()
            .into_iter()
            .map(|(slug, _)| slug)
            .collect()
    }

    /// Check that no two files resolve to the same slug
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for (slug, path) in self.content_files() {
            if let Some(first) = seen.get(&slug) {
                return Err(ContentError::DuplicateSlug {
                    slug,
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(slug, path);
        }

        Ok(())
    }

    /// Markdown files directly inside the content directory, by filename
    fn content_files(&self) -> Vec<(String, PathBuf)> {
        if !self.content_dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.into_path();
                let slug = slug_for_path(&path)?;
                Some((slug, path))
            })
            .collect()
    }

    /// Read and resolve a single post file
    fn load_post(&self, slug: &str, path: &Path) -> Result<Post> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content);

        let file_modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
            .unwrap_or_default();

        let title = fm.title(slug);
        let description = fm.description();
        let author = fm.author(&self.default_author);
        let image = fm.image();
        let date = fm.date(file_modified);
        let updated = fm.updated();

        for (name, invalid) in [
            ("title", title.is_invalid()),
            ("description", description.is_invalid()),
            ("author", author.is_invalid()),
            ("image", image.is_invalid()),
            ("date", date.is_invalid()),
            ("updatedDate", updated.is_invalid()),
        ] {
            if invalid {
                tracing::warn!("Invalid front-matter field {:?} in {:?}, using default", name, path);
            }
        }
        if let Field::Defaulted(_) = date {
            tracing::debug!("No date in {:?}, using file modification time", path);
        }

        let meta = PostMeta {
            slug: slug.to_string(),
            title: title.into_inner(),
            description: description.into_inner(),
            date: date.into_inner(),
            updated: updated.into_inner(),
            author: author.into_inner(),
            image: image.into_inner(),
            reading_time: reading_time(body, self.words_per_minute),
            source: path.to_path_buf(),
        };

        Ok(Post {
            meta,
            body: body.to_string(),
        })
    }
}

/// Slug for a content file, or None if it is not markdown
fn slug_for_path(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !MARKDOWN_EXTENSIONS.contains(&ext) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if !is_valid_slug(stem) {
        if !stem.starts_with('.') {
            tracing::warn!("Skipping {:?}: file name is not a usable slug", path);
        }
        return None;
    }
    Some(stem.to_string())
}

/// A slug may only name a file directly inside the content directory.
/// Listing and lookup share this check.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
}
