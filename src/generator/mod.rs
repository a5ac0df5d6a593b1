//! Generator module - writes sitemap.xml and robots.txt from the posts index

mod robots;
mod sitemap;

pub use sitemap::{ChangeFrequency, Sitemap, UrlEntry};

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;

use crate::helpers::Helpers;
use crate::store::{PostSource, PostStore};
use crate::Site;

/// Writes the crawler-facing files into the public directory
pub struct Generator<'a, S> {
    site: &'a Site,
    store: &'a PostStore<S>,
    helpers: Helpers,
}

impl<'a, S: PostSource> Generator<'a, S> {
    /// Create a new generator
    pub fn new(site: &'a Site, store: &'a PostStore<S>) -> Self {
        Self {
            site,
            store,
            helpers: Helpers::new(site.config.clone()),
        }
    }

    /// Generate every enabled file
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir).with_context(|| {
            format!("Failed to create {}", self.site.public_dir.display())
        })?;

        if self.site.config.sitemap.enable {
            self.generate_sitemap()?;
        }
        if self.site.config.robots.enable {
            self.generate_robots()?;
        }
        Ok(())
    }

    fn generate_sitemap(&self) -> Result<()> {
        let sitemap = Sitemap::from_store(self.store, &self.helpers, Utc::now());
        let path = self.site.public_dir.join(&self.site.config.sitemap.path);
        fs::write(&path, sitemap.to_xml())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;
        tracing::info!("Generated {} ({} urls)", path.display(), sitemap.urls.len());
        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        let sitemap_url = self
            .site
            .config
            .sitemap
            .enable
            .then(|| self.helpers.full_url_for(&self.site.config.sitemap.path));
        let text = robots::render(&self.site.config.robots, sitemap_url.as_deref());
        let path = self.site.public_dir.join("robots.txt");
        fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Generated {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::entry;
    use crate::content::PostIndex;
    use crate::store::MemorySource;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "url: https://example.com\npublic_dir: out\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        let index = PostIndex::from_entries([entry("hello", "dev", (2024, 6, 1))]);
        let store = PostStore::open(MemorySource::new(index)).unwrap();

        Generator::new(&site, &store).generate().unwrap();

        let sitemap = fs::read_to_string(dir.path().join("out/sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/posts/hello</loc>"));
        let robots = fs::read_to_string(dir.path().join("out/robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml\n"));
    }

    #[test]
    fn test_disabled_outputs_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "sitemap:\n  enable: false\nrobots:\n  enable: true\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        let store = PostStore::open(MemorySource::default()).unwrap();

        Generator::new(&site, &store).generate().unwrap();

        assert!(!site.public_dir.join("sitemap.xml").exists());
        let robots = fs::read_to_string(site.public_dir.join("robots.txt")).unwrap();
        assert!(!robots.contains("Sitemap:"));
    }
}
