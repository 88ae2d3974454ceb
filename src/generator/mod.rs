//! Generator module - renders every page of the site with the built-in Tera
//! templates and writes the static output
//!
//! The `render_*` methods are shared with the preview server, so a page
//! served locally is byte-for-byte what `generate` writes.

mod feed;
mod schema;
mod sitemap;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Datelike, Utc};
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post, PostMeta};
use crate::helpers::{extract_toc, full_url_for, json_ld, post_path, url_for};
use crate::templates::{
    ConfigData, NotFoundData, PageMeta, PostCard, PostData, TemplateRenderer, HOME,
};
use crate::Site;

pub use feed::{render_feed, FEED_PATH};
pub use sitemap::{render_robots, render_sitemap, sitemap_entries, SitemapEntry};

/// Suffix of every post page title
const POST_TITLE_SUFFIX: &str = "Polaris Blog";

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    build_time: DateTime<Utc>,
}

impl Generator {
    /// Create a new generator; the build time is now
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new(&site.config)?,
            markdown: MarkdownRenderer::from_config(&site.config),
            build_time: Utc::now(),
        })
    }

    /// Use a fixed build time for `lastBuildDate`, sitemap dates and the
    /// copyright year
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = build_time;
        self
    }

    /// Generate the entire site. Every page is rendered in memory first, then
    /// written to a staging directory that replaces the output directory.
    /// A failed build leaves the previous output untouched.
    pub fn generate(&self) -> Result<()> {
        let repo = self.site.posts();
        repo.validate()?;

        let posts = repo.list_posts();
        let slugs: Vec<String> = repo.list_slugs().into_iter().collect();

        // Post pages
        let mut pages = slugs
            .par_iter()
            .map(|slug| -> Result<(String, String)> {
                let post = repo
                    .get_post(slug)
                    .with_context(|| format!("Failed to load post {:?}", slug))?;
                let html = self
                    .render_post(&post)
                    .with_context(|| format!("Failed to render post {:?}", slug))?;
                Ok((format!("blog/{}/index.html", slug), html))
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::info!("Rendered {} post pages", slugs.len());

        let config = &self.site.config;
        pages.push(("index.html".to_string(), self.render_home()?));
        pages.push(("blog/index.html".to_string(), self.render_blog_index(&posts)?));
        pages.push(("404.html".to_string(), self.render_not_found()?));
        pages.push(("blog/404.html".to_string(), self.render_post_not_found()?));
        pages.push((
            FEED_PATH.trim_start_matches('/').to_string(),
            render_feed(config, &posts, self.build_time),
        ));
        pages.push((
            "sitemap.xml".to_string(),
            render_sitemap(config, &posts, self.build_time),
        ));
        pages.push(("robots.txt".to_string(), render_robots(config)));

        let staging = self.staging_dir()?;
        if let Err(e) = self.write_site(&staging, &pages) {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
        self.publish(&staging)?;
        tracing::info!("Wrote {} pages to {:?}", pages.len(), self.site.output_dir);

        Ok(())
    }

    /// Render the home page
    pub fn render_home(&self) -> Result<String> {
        let config = &self.site.config;
        let title = format!("{} - {}", config.title, config.tagline);
        let page = self.page_meta(
            title.clone(),
            config.description.clone(),
            Some("/"),
            vec![schema::organization(config), schema::website(config)],
        )?;

        let mut context = self.base_context(&page);
        context.insert("home", &HOME);
        self.renderer.render("home.html", &context)
    }

    /// Render the blog listing for posts already in display order
    pub fn render_blog_index(&self, posts: &[PostMeta]) -> Result<String> {
        let config = &self.site.config;
        let mut page = self.page_meta(
            format!("Blog | {}", config.title),
            config.blog_description.clone(),
            Some("/blog"),
            vec![schema::collection_page(config, posts)],
        )?;
        page.og_image_alt = config.blog_title.clone();

        let cards: Vec<PostCard> = posts
            .iter()
            .map(|post| PostCard {
                title: post.title.clone(),
                description: post.description.clone(),
                date: post.date.to_rfc3339(),
                url: url_for(config, &post_path(&post.slug)),
                reading_time: post.reading_time,
            })
            .collect();

        let mut context = self.base_context(&page);
        context.insert("posts", &cards);
        self.renderer.render("blog_index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let config = &self.site.config;
        let path = post_path(&post.slug);

        let mut page = self.page_meta(
            format!("{} | {}", post.title, POST_TITLE_SUFFIX),
            post.description.clone(),
            Some(path.as_str()),
            vec![
                schema::article(config, post),
                schema::breadcrumbs(config, post),
            ],
        )?;
        page.social_title = post.title.clone();
        page.og_type = "article".to_string();
        page.og_image_alt = post.title.clone();
        page.published_time = Some(post.date.to_rfc3339());
        page.modified_time = post.updated.map(|d| d.to_rfc3339());
        page.author = Some(post.author.clone());
        if let Some(image) = &post.image {
            page.og_image = schema::absolute_url(config, image);
        }

        let data = PostData {
            title: post.title.clone(),
            description: post.description.clone(),
            author: post.author.clone(),
            date: post.date.to_rfc3339(),
            updated: post.updated.map(|d| d.to_rfc3339()),
            reading_time: post.reading_time,
            image: post.image.as_deref().map(|image| self.asset_url(image)),
            content: self.markdown.render(&post.body),
            toc: extract_toc(&post.body, config.toc_min_headings),
        };

        let mut context = self.base_context(&page);
        context.insert("post", &data);
        self.renderer.render("post.html", &context)
    }

    /// Render the site-wide not found page
    pub fn render_not_found(&self) -> Result<String> {
        self.render_not_found_page(NotFoundData {
            title: "Page not found".to_string(),
            message: "The page you're looking for doesn't exist or has been moved.".to_string(),
            blog_link: false,
        })
    }

    /// Render the not found page for unknown post slugs
    pub fn render_post_not_found(&self) -> Result<String> {
        self.render_not_found_page(NotFoundData {
            title: "Post not found".to_string(),
            message: "The blog post you're looking for doesn't exist or has been moved."
                .to_string(),
            blog_link: true,
        })
    }

    /// RSS feed for posts in display order
    pub fn render_feed(&self, posts: &[PostMeta]) -> String {
        render_feed(&self.site.config, posts, self.build_time)
    }

    /// Sitemap for posts in display order
    pub fn render_sitemap(&self, posts: &[PostMeta]) -> String {
        render_sitemap(&self.site.config, posts, self.build_time)
    }

    /// robots.txt
    pub fn render_robots(&self) -> String {
        render_robots(&self.site.config)
    }

    fn render_not_found_page(&self, data: NotFoundData) -> Result<String> {
        let mut page = self.page_meta(
            format!("{} | {}", data.title, self.site.config.title),
            data.message.clone(),
            None,
            Vec::new(),
        )?;
        page.noindex = true;

        let mut context = self.base_context(&page);
        context.insert("not_found", &data);
        self.renderer.render("not_found.html", &context)
    }

    /// Head metadata with site defaults for everything page specific
    fn page_meta(
        &self,
        title: String,
        description: String,
        canonical_path: Option<&str>,
        documents: Vec<Value>,
    ) -> Result<PageMeta> {
        let config = &self.site.config;
        let json_ld = documents
            .iter()
            .map(json_ld)
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(PageMeta {
            social_title: title.clone(),
            title,
            description,
            canonical: canonical_path.map(|path| full_url_for(config, path)),
            og_type: "website".to_string(),
            og_image: schema::absolute_url(config, &config.og_image),
            og_image_alt: config.title.clone(),
            published_time: None,
            modified_time: None,
            author: None,
            json_ld,
            noindex: false,
        })
    }

    /// Create a base context with common variables
    fn base_context(&self, page: &PageMeta) -> Context {
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData::new(&self.site.config, self.build_time.year()),
        );
        context.insert("page", page);
        context
    }

    /// Site-relative assets get the root prefix, absolute URLs stay as is
    fn asset_url(&self, src: &str) -> String {
        if src.starts_with('/') && !src.starts_with("//") {
            url_for(&self.site.config, src)
        } else {
            src.to_string()
        }
    }

    /// Sibling of the output directory that a build is written into
    fn staging_dir(&self) -> Result<PathBuf> {
        let output = &self.site.output_dir;
        for source in [&self.site.content_dir, &self.site.static_dir] {
            if source.starts_with(output) {
                anyhow::bail!(
                    "Output directory {:?} must not contain {:?}; it is replaced on every build",
                    output,
                    source
                );
            }
        }
        let name = output
            .file_name()
            .with_context(|| format!("Output directory {:?} has no name", output))?;
        let staging = output.with_file_name(format!(".{}.staging", name.to_string_lossy()));
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .with_context(|| format!("Failed to remove {:?}", staging))?;
        }
        Ok(staging)
    }

    /// Write the static assets and every rendered page below `root`
    fn write_site(&self, root: &Path, pages: &[(String, String)]) -> Result<()> {
        fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;
        self.copy_static_assets(root)?;
        for (relative, contents) in pages {
            write_output(root, relative, contents)?;
        }
        Ok(())
    }

    /// Replace the output directory with a finished staging directory, so
    /// pages of deleted posts do not outlive them
    fn publish(&self, staging: &Path) -> Result<()> {
        let output = &self.site.output_dir;
        if output.exists() {
            fs::remove_dir_all(output)
                .with_context(|| format!("Failed to remove old output {:?}", output))?;
        }
        fs::rename(staging, output)
            .with_context(|| format!("Failed to move {:?} to {:?}", staging, output))?;
        Ok(())
    }

    /// Copy the static asset directory below `root`
    fn copy_static_assets(&self, root: &Path) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            copy_file(path, &root.join(relative))?;
            copied += 1;
        }

        tracing::info!("Copied {} static files", copied);
        Ok(())
    }
}

/// Write a file below `root`
fn write_output(root: &Path, relative: &str, contents: &str) -> Result<()> {
    let output_path = root.join(relative);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(&output_path, contents)
        .with_context(|| format!("Failed to write {:?}", output_path))?;
    tracing::debug!("Generated: {:?}", output_path);
    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    Ok(())
}
