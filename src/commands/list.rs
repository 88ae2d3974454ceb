//! List blog posts

use anyhow::Result;

use crate::content::PostMeta;
use crate::Site;

/// Print every post, newest first
pub fn run(site: &Site) -> Result<()> {
    let repo = site.posts();
    repo.validate()?;

    let posts = repo.list_posts();
    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_line(post));
    }

    Ok(())
}

fn format_line(post: &PostMeta) -> String {
    format!(
        "{} - {} [{}] ({} min read)",
        post.date.format("%Y-%m-%d"),
        post.title,
        post.slug,
        post.reading_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_line() {
        let post = PostMeta {
            slug: "why-polaris".to_string(),
            title: "Why Polaris".to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            updated: None,
            author: "Polaris Team".to_string(),
            image: None,
            reading_time: 4,
            source: Default::default(),
        };
        assert_eq!(
            format_line(&post),
            "2024-03-05 - Why Polaris [why-polaris] (4 min read)"
        );
    }
}
