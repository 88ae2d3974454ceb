//! Create a new post

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `{content_dir}/{slug}.md` with a front-matter scaffold and return
/// its path. Never overwrites an existing post.
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let repo = site.posts();
    if repo.list_slugs().contains(&slug) {
        anyhow::bail!("A post with slug {:?} already exists", slug);
    }

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Failed to create {:?}", site.content_dir))?;
    let file_path = site.content_dir.join(format!("{}.md", slug));

    let content = format!(
        "---\ntitle: {}\ndescription: \"\"\ndate: {}\nauthor: {}\n---\n\n",
        yaml_string(title),
        Utc::now().format("%Y-%m-%d"),
        yaml_string(&site.config.author),
    );

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar for YAML
fn yaml_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_is_loadable() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&site, "Hello: \"Polaris\" World").unwrap();
        assert_eq!(path, site.content_dir.join("hello-polaris-world.md"));

        let post = site.posts().get_post("hello-polaris-world").unwrap();
        assert_eq!(post.title, "Hello: \"Polaris\" World");
        assert_eq!(post.author, "Polaris Team");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        create_post(&site, "Same Title").unwrap();
        assert!(create_post(&site, "Same Title").is_err());
        assert!(create_post(&site, "!!!").is_err());
    }
}
