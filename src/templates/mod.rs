//! Built-in site templates using the Tera template engine
//!
//! Every template is embedded in the binary. Autoescaping is off; text
//! coming from content or configuration goes through the `html` filter,
//! while rendered markdown and JSON-LD are inserted as is.

mod home;

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{SiteConfig, SocialConfig};
use crate::helpers::{self, TocEntry};

pub use home::{HomeData, HOME};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded. Site-relative
    /// paths passed through the `url_for` filter are prefixed with the
    /// configured root.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("html", html_filter);
        tera.register_filter("date_format", date_format_filter);

        let root = config.root.clone();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(helpers::url_for_root(&root, &path)))
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for HTML element content and attribute values
fn html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html", "value", String, value);
    Ok(tera::Value::String(helpers::html_escape(&s)))
}

/// Tera filter: format an RFC 3339 date string
///
/// `format="LL"` gives "January 5, 2024", anything else the calendar date.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    let date = chrono::DateTime::parse_from_rfc3339(&s)
        .map_err(|e| tera::Error::msg(format!("date_format: invalid date {:?}: {}", s, e)))?;

    let formatted = match format.as_str() {
        "LL" => helpers::full_date(&date),
        _ => helpers::date_ymd(&date),
    };
    Ok(tera::Value::String(formatted))
}

/// Data structures for template context

/// Site-wide values available to every page as `config`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub language: String,
    pub theme_color: String,
    pub twitter_handle: String,
    pub email: String,
    pub blog_title: String,
    pub home_url: String,
    pub blog_url: String,
    pub feed_url: String,
    pub logo_url: String,
    pub emblem_url: String,
    pub current_year: String,
    pub social: SocialConfig,
}

impl ConfigData {
    /// Build from the site configuration; `year` is the copyright year
    pub fn new(config: &SiteConfig, year: i32) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            theme_color: config.theme_color.clone(),
            twitter_handle: config.twitter_handle.clone(),
            email: config.email.clone(),
            blog_title: config.blog_title.clone(),
            home_url: helpers::url_for(config, "/"),
            blog_url: helpers::url_for(config, "/blog"),
            feed_url: helpers::url_for(config, "/blog/feed.xml"),
            logo_url: helpers::url_for(config, "/full-logo.svg"),
            emblem_url: helpers::url_for(config, "/emblem.svg"),
            current_year: year.to_string(),
            social: config.social.clone(),
        }
    }
}

/// Head metadata of a single page as `page`
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    /// Full `<title>` text
    pub title: String,
    pub description: String,
    /// Absolute canonical URL, if the page has one
    pub canonical: Option<String>,
    /// Title used for Open Graph and Twitter cards
    pub social_title: String,
    /// Open Graph type: `website` or `article`
    pub og_type: String,
    /// Absolute URL of the share image
    pub og_image: String,
    pub og_image_alt: String,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub author: Option<String>,
    /// Serialized JSON-LD documents, already escaped for inline scripts
    pub json_ld: Vec<String>,
    /// Pages that must not be indexed, such as 404 pages
    pub noindex: bool,
}

/// A post as shown in the blog listing
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub description: String,
    /// RFC 3339 publish date
    pub date: String,
    pub url: String,
    pub reading_time: usize,
}

/// A fully rendered post
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub description: String,
    pub author: String,
    /// RFC 3339 publish date
    pub date: String,
    /// RFC 3339 update date
    pub updated: Option<String>,
    pub reading_time: usize,
    /// Cover image URL
    pub image: Option<String>,
    /// Rendered HTML body
    pub content: String,
    pub toc: Option<Vec<TocEntry>>,
}

/// Copy of a not found page
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundData {
    pub title: String,
    pub message: String,
    /// Whether to offer a link back to the blog listing
    pub blog_link: bool,
}
