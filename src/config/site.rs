//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub language: String,
    pub theme_color: String,
    pub og_image: String,
    pub twitter_handle: String,

    // Blog
    pub blog_title: String,
    pub blog_description: String,
    /// Author used when a post does not name one
    pub author: String,
    /// Contact address used in feed `<author>` elements
    pub email: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub output_dir: String,

    // Writing
    pub words_per_minute: usize,
    pub toc_min_headings: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub social: SocialConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Polaris Protocol".to_string(),
            tagline: "Self-Scaling Stablecoin Operating System".to_string(),
            description: "Polaris re-architects onchain activity to generate uncorrelated, scalable returns, without T-Bills, without CEXs, without compromises.".to_string(),
            language: "en".to_string(),
            theme_color: "#0a1628".to_string(),
            og_image: "/polaris-og.png".to_string(),
            twitter_handle: "@polarisfinance_".to_string(),

            blog_title: "Polaris Protocol Blog".to_string(),
            blog_description: "Updates, insights, and deep dives into the Self-Scaling Stablecoin Operating System.".to_string(),
            author: "Polaris Team".to_string(),
            email: "hello@polarisfinance.io".to_string(),

            url: "https://polarisfinance.io".to_string(),
            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            static_dir: "public".to_string(),
            output_dir: "out".to_string(),

            words_per_minute: 230,
            toc_min_headings: 3,
            highlight: HighlightConfig::default(),

            social: SocialConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Social profile links shown in navigation, footer and structured data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub x: String,
    pub telegram: String,
    pub github: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            x: "https://x.com/polarisfinance_".to_string(),
            telegram: "https://t.me/polaris_ann".to_string(),
            github: "https://github.com/Polaris-Finance".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.author, "Polaris Team");
        assert_eq!(config.words_per_minute, 230);
        assert_eq!(config.toc_min_headings, 3);
        assert_eq!(config.content_dir, "content/blog");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Test Site
url: https://example.com
author: Someone
words_per_minute: 200
social:
  x: https://x.com/example
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Test Site");
        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.author, "Someone");
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.social.x, "https://x.com/example");
        // Unset nested fields keep their defaults
        assert_eq!(config.social.telegram, "https://t.me/polaris_ann");
        assert_eq!(config.output_dir, "out");
    }
}
