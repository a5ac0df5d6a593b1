//! Index builder - walks the content directory and produces the posts index

use chrono::{DateTime, SubsecRound, Utc};
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use super::frontmatter::{FrontMatter, FrontMatterError};
use super::{PostIndex, PostIndexEntry};
use crate::config::{SiteConfig, SlugCollision};
use crate::Site;

/// Errors that abort an index build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },

    #[error("slug `{slug}` is used by both {first} and {second}")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },

    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("index task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a [`PostIndex`] from the content directory
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    base_dir: PathBuf,
    content_dir: PathBuf,
    config: SiteConfig,
}

impl IndexBuilder {
    /// Create a builder for a site's configured content directory
    pub fn new(site: &Site) -> Self {
        Self {
            base_dir: site.base_dir.clone(),
            content_dir: site.content_dir.clone(),
            config: site.config.clone(),
        }
    }

    /// Every accepted content file under the content directory, at any depth.
    ///
    /// Directory entries are visited in file-name order, which is also the order
    /// slug collisions are resolved in.
    pub fn enumerate(&self) -> Result<Vec<PathBuf>, BuildError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && self.is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Read one content file and derive its index entry
    pub async fn parse_entry(&self, path: &Path) -> Result<PostIndexEntry, BuildError> {
        let io_err = |source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        };

        let raw = tokio::fs::read_to_string(path).await.map_err(io_err)?;
        let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;

        let fm_err = |source| BuildError::FrontMatter {
            path: path.to_path_buf(),
            source,
        };
        let (fm, _body) = FrontMatter::parse(&raw).map_err(fm_err)?;

        // The index keeps millisecond precision
        let modified =
            DateTime::<Utc>::from(metadata.modified().map_err(io_err)?).trunc_subsecs(3);
        // Not every filesystem records a birth time
        let created = metadata
            .created()
            .map(|t| DateTime::<Utc>::from(t).trunc_subsecs(3))
            .unwrap_or(modified);

        let date = fm
            .parse_date()
            .map_err(fm_err)?
            .map(|d| d.trunc_subsecs(3))
            .unwrap_or(created);
        let last_modified = fm
            .parse_last_modified()
            .map_err(fm_err)?
            .map(|d| d.trunc_subsecs(3))
            .unwrap_or(modified);

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.clone());

        tracing::debug!("Indexed {:?} as `{}`", path, slug);

        Ok(PostIndexEntry {
            path: self.relative_path(path),
            category: self.category_for(path),
            title,
            date,
            last_modified,
            description: fm.description.unwrap_or_default(),
            tags: fm.tags,
            thumbnail: fm.thumbnail,
            slug,
        })
    }

    /// Enumerate, parse every file concurrently, and sort by date (newest first)
    pub async fn build(&self) -> Result<PostIndex, BuildError> {
        let walker = self.clone();
        let files = tokio::task::spawn_blocking(move || walker.enumerate()).await??;
        tracing::debug!("Found {} content files", files.len());

        let this = Arc::new(self.clone());
        let mut tasks = JoinSet::new();
        for (position, path) in files.into_iter().enumerate() {
            let this = Arc::clone(&this);
            tasks.spawn(async move { (position, this.parse_entry(&path).await) });
        }

        let mut parsed = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (position, entry) = joined?;
            // Dropping the set aborts the remaining reads
            parsed.push((position, entry?));
        }
        parsed.sort_by_key(|(position, _)| *position);

        let mut by_slug: IndexMap<String, PostIndexEntry> = IndexMap::with_capacity(parsed.len());
        for (_, entry) in parsed {
            let slug = entry.slug.clone();
            if let Some(previous) = by_slug.get(&slug) {
                match self.config.slug_collision {
                    SlugCollision::Error => {
                        return Err(BuildError::SlugCollision {
                            slug,
                            first: previous.path.clone(),
                            second: entry.path,
                        });
                    }
                    SlugCollision::Warn => {
                        tracing::warn!(
                            "Slug `{}` is used by {} and {}, keeping the latter",
                            slug,
                            previous.path,
                            entry.path
                        );
                    }
                }
            }
            by_slug.insert(slug, entry);
        }

        let mut entries: Vec<_> = by_slug.into_values().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(PostIndex::from_entries(entries))
    }

    /// Write the index as JSON, creating the parent directory if needed
    pub async fn persist(index: &PostIndex, output: &Path) -> Result<(), BuildError> {
        let io_err = |source| BuildError::Io {
            path: output.to_path_buf(),
            source,
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
        }

        let json = index.to_json()?;
        tokio::fs::write(output, json).await.map_err(io_err)?;
        Ok(())
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.config.accepts_extension(ext))
            .unwrap_or(false)
    }

    /// First directory under the content root, or the default category for top-level files
    fn category_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(dir)), Some(_)) => dir.to_string_lossy().into_owned(),
            _ => self.config.default_category.clone(),
        }
    }

    /// Path relative to the site base directory, with forward slashes
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
