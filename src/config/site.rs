//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub index_file: String,
    pub public_dir: String,

    // Indexing
    pub default_category: String,
    pub extensions: Vec<String>,
    pub slug_collision: SlugCollision,

    // Date / Time format
    pub timezone: String,
    pub date_format: String,

    // Generated files
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            url: "https://my-blog-example.com".to_string(),

            content_dir: "posts".to_string(),
            index_file: "src/lib/posts-map.json".to_string(),
            public_dir: "public".to_string(),

            default_category: "etc".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            slug_collision: SlugCollision::default(),

            timezone: String::new(),
            date_format: "YYYY-MM-DD".to_string(),

            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a file extension (without the dot) is indexed
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// What the index builder does when two files share a slug
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugCollision {
    /// Keep the file visited last and log a warning
    #[default]
    Warn,
    /// Abort the build
    Error,
}

/// sitemap.xml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    pub path: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".to_string(),
        }
    }
}

/// robots.txt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    pub enable: bool,
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            user_agent: "*".to_string(),
            allow: vec!["/".to_string()],
            disallow: vec!["/private/".to_string()],
        }
    }
}
