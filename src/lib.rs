//! polaris-site: static site generator for the Polaris Protocol website
//!
//! Builds the marketing home page and a markdown-backed blog (listing, post
//! pages, RSS feed, sitemap) from a directory of front-matter annotated
//! markdown files, and serves the same routes from a local preview server.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The site being built
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Blog content directory
    pub content_dir: std::path::PathBuf,
    /// Static asset directory, copied verbatim into the output
    pub static_dir: std::path::PathBuf,
    /// Output directory
    pub output_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            output_dir,
        }
    }

    /// A fresh repository over the content directory
    pub fn posts(&self) -> content::PostRepository {
        content::PostRepository::new(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title)
    }
}
