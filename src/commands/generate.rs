//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Validate the content and build the whole site into the output directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let slugs = site.posts().list_slugs();
    tracing::info!("Found {} posts in {:?}", slugs.len(), site.content_dir);

    let generator = Generator::new(site)?;
    generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {:?} in {:.2}s",
        site.output_dir,
        duration.as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_builds_into_output_dir() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(
            site.content_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\nHi.\n",
        )
        .unwrap();

        run(&site).unwrap();
        assert!(site.output_dir.join("blog/hello/index.html").is_file());
        assert!(site.output_dir.join("blog/feed.xml").is_file());
    }
}
