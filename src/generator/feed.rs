//! RSS 2.0 feed of blog posts

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{date_rfc2822, escape_xml, full_url_for, post_path};

/// Site-relative path of the feed
pub const FEED_PATH: &str = "/blog/feed.xml";

/// Render the feed. Every post is listed, newest first as given.
pub fn render_feed(config: &SiteConfig, posts: &[PostMeta], build_time: DateTime<Utc>) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&config.blog_title)
    ));
    feed.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(&full_url_for(config, "/blog"))
    ));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.blog_description)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&config.language)
    ));
    feed.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        date_rfc2822(&build_time)
    ));
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&full_url_for(config, FEED_PATH))
    ));

    for post in posts {
        let link = escape_xml(&full_url_for(config, &post_path(&post.slug)));
        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&post.description)
        ));
        feed.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            date_rfc2822(&post.date)
        ));
        feed.push_str(&format!(
            "      <author>{} ({})</author>\n",
            escape_xml(&config.email),
            escape_xml(&post.author)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}
