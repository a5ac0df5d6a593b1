//! postmap: builds a date-sorted posts index from a Markdown/MDX content tree
//!
//! The index builder walks the content directory once and writes a JSON lookup
//! structure. The post store loads that structure and answers listing, category
//! and single-post queries, reading a post's file only when its body is needed.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A blog site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory; index entry paths are relative to it
    pub base_dir: PathBuf,
    /// Content root holding the category directories
    pub content_dir: PathBuf,
    /// Persisted index file
    pub index_path: PathBuf,
    /// Output directory for sitemap.xml and robots.txt
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let index_path = base_dir.join(&config.index_file);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            index_path,
            public_dir,
        })
    }

    /// Build the index and write it to `index_path`
    pub async fn build_index(&self) -> Result<content::PostIndex> {
        commands::build::run(self).await
    }

    /// Open a store over the persisted index
    pub fn store(&self) -> Result<store::PostStore<store::FileSource>> {
        let source = store::FileSource::new(&self.index_path, &self.base_dir);
        Ok(store::PostStore::open(source)?)
    }
}
