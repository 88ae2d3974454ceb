//! sitemap.xml and robots.txt

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{date_xml, escape_xml, full_url_for, post_path};

/// A single `<url>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Entries for the home page, the blog listing and every post
pub fn sitemap_entries(
    config: &SiteConfig,
    posts: &[PostMeta],
    build_time: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            loc: full_url_for(config, "/"),
            last_modified: build_time,
            change_frequency: "weekly",
            priority: 1.0,
        },
        SitemapEntry {
            loc: full_url_for(config, "/blog"),
            last_modified: build_time,
            change_frequency: "weekly",
            priority: 0.8,
        },
    ];

    entries.extend(posts.iter().map(|post| SitemapEntry {
        loc: full_url_for(config, &post_path(&post.slug)),
        last_modified: post.last_modified(),
        change_frequency: "monthly",
        priority: 0.7,
    }));

    entries
}

/// Render the sitemap document
pub fn render_sitemap(config: &SiteConfig, posts: &[PostMeta], build_time: DateTime<Utc>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in sitemap_entries(config, posts, build_time) {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            date_xml(&entry.last_modified)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Allow everything and point crawlers at the sitemap
pub fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        full_url_for(config, "/sitemap.xml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta(slug: &str, updated: Option<DateTime<Utc>>) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated,
            author: "Polaris Team".to_string(),
            image: None,
            reading_time: 1,
            source: Default::default(),
        }
    }

    fn build_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_store_keeps_fixed_entries() {
        let config = SiteConfig::default();
        let entries = sitemap_entries(&config, &[], build_time());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].loc, "https://polarisfinance.io");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].loc, "https://polarisfinance.io/blog");
        assert_eq!(entries[1].priority, 0.8);
        assert!(entries.iter().all(|e| e.last_modified == build_time()));
    }

    #[test]
    fn test_post_entries_use_update_date() {
        let config = SiteConfig::default();
        let updated = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap();
        let posts = vec![meta("fresh", Some(updated)), meta("plain", None)];
        let entries = sitemap_entries(&config, &posts, build_time());

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].loc, "https://polarisfinance.io/blog/fresh");
        assert_eq!(entries[2].last_modified, updated);
        assert_eq!(entries[3].last_modified, posts[1].date);
        assert!(entries[2..]
            .iter()
            .all(|e| e.change_frequency == "monthly" && e.priority < entries[1].priority));
    }

    #[test]
    fn test_render_sitemap() {
        let config = SiteConfig::default();
        let xml = render_sitemap(&config, &[meta("hello", None)], build_time());

        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<loc>https://polarisfinance.io/blog/hello</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01T00:00:00.000+00:00</lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_render_robots() {
        let robots = render_robots(&SiteConfig::default());
        assert!(robots.contains("Sitemap: https://polarisfinance.io/sitemap.xml"));
    }
}
