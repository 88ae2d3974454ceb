//! schema.org structured data embedded in pages

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{full_url_for, post_path};

fn site_url(config: &SiteConfig) -> String {
    full_url_for(config, "/")
}

fn logo_url(config: &SiteConfig) -> String {
    full_url_for(config, "/emblem.svg")
}

fn publisher(config: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": config.title,
        "url": site_url(config),
    })
}

pub fn organization(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.title,
        "url": site_url(config),
        "logo": logo_url(config),
        "sameAs": [config.social.x, config.social.github, config.social.telegram],
        "description": config.description,
    })
}

pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.title,
        "url": site_url(config),
        "description": config.description,
        "publisher": publisher(config),
    })
}

pub fn collection_page(config: &SiteConfig, posts: &[PostMeta]) -> Value {
    let items: Vec<Value> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": full_url_for(config, &post_path(&post.slug)),
                "name": post.title,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": config.blog_title,
        "description": config.blog_description,
        "url": full_url_for(config, "/blog"),
        "isPartOf": {
            "@type": "WebSite",
            "name": config.title,
            "url": site_url(config),
        },
        "mainEntity": {
            "@type": "ItemList",
            "numberOfItems": posts.len(),
            "itemListElement": items,
        },
    })
}

pub fn article(config: &SiteConfig, post: &PostMeta) -> Value {
    let mut publisher = publisher(config);
    publisher["logo"] = json!({
        "@type": "ImageObject",
        "url": logo_url(config),
    });

    let mut article = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": post.title,
        "description": post.description,
        "datePublished": post.date.to_rfc3339(),
        "dateModified": post.last_modified().to_rfc3339(),
        "author": {
            "@type": "Organization",
            "name": post.author,
        },
        "publisher": publisher,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": full_url_for(config, &post_path(&post.slug)),
        },
    });
    if let Some(image) = &post.image {
        article["image"] = json!(absolute_url(config, image));
    }
    article
}

/// Breadcrumb trail Home > Blog > post
pub fn breadcrumbs(config: &SiteConfig, post: &PostMeta) -> Value {
    let trail = [
        ("Home", site_url(config)),
        ("Blog", full_url_for(config, "/blog")),
        (post.title.as_str(), full_url_for(config, &post_path(&post.slug))),
    ];
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// Absolute URL for a possibly site-relative path
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        full_url_for(config, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meta(slug: &str, title: &str) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: title.to_string(),
            description: "About it".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated: None,
            author: "Polaris Team".to_string(),
            image: None,
            reading_time: 1,
            source: Default::default(),
        }
    }

    #[test]
    fn test_article_modified_falls_back_to_published() {
        let config = SiteConfig::default();
        let mut post = meta("hello", "Hello");
        let doc = article(&config, &post);
        assert_eq!(doc["dateModified"], doc["datePublished"]);
        assert_eq!(doc["mainEntityOfPage"]["@id"], "https://polarisfinance.io/blog/hello");

        post.updated = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let doc = article(&config, &post);
        assert_eq!(doc["dateModified"], "2024-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_breadcrumbs() {
        let config = SiteConfig::default();
        let doc = breadcrumbs(&config, &meta("hello", "Hello"));
        let items = doc["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["item"], "https://polarisfinance.io");
        assert_eq!(items[2]["position"], 3);
        assert_eq!(items[2]["name"], "Hello");
    }

    #[test]
    fn test_collection_page_lists_posts_in_order() {
        let config = SiteConfig::default();
        let posts = vec![meta("b", "B"), meta("a", "A")];
        let doc = collection_page(&config, &posts);
        assert_eq!(doc["mainEntity"]["numberOfItems"], 2);
        assert_eq!(doc["mainEntity"]["itemListElement"][0]["name"], "B");

        let empty = collection_page(&config, &[]);
        assert_eq!(empty["mainEntity"]["numberOfItems"], 0);
    }

    #[test]
    fn test_absolute_url() {
        let config = SiteConfig::default();
        assert_eq!(
            absolute_url(&config, "/polaris-og.png"),
            "https://polarisfinance.io/polaris-og.png"
        );
        assert_eq!(
            absolute_url(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
