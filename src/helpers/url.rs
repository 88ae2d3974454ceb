//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Prefix a path with a root path
///
/// # Examples
/// ```ignore
/// url_for_root("/site/", "/blog/") // -> "/site/blog/"
/// ```
pub fn url_for_root(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a URL with the site root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/feed.xml") // -> "/blog/feed.xml"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    url_for_root(&config.root, path)
}

/// Generate a full URL including the domain. The site root itself has no
/// trailing slash, matching the canonical form of the home page.
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://polarisfinance.io/blog"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = url_for(config, path);
    format!("{}{}", base, path.trim_end_matches('/'))
}

/// Site-relative path of a post page
pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", encode_segment(slug))
}

/// Percent-encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
