//! Read-only queries over a loaded posts index

mod source;
mod tags;

pub use source::{FileSource, MemorySource, PostSource, StoreError};
pub use tags::{CacheTag, CacheTagSink, TagRecorder, TracingSink};

use indexmap::IndexMap;
use serde::Serialize;
use std::io;

use crate::content::{frontmatter, Post, PostIndex, PostIndexEntry};

/// Result of looking up a single post
#[derive(Debug)]
pub enum Lookup {
    Found(Post),
    /// No entry with this slug
    NotIndexed,
    /// Indexed, but the file could not be read
    Unreadable { path: String, error: io::Error },
}

impl Lookup {
    /// Collapse both failure cases into `None`
    pub fn into_post(self) -> Option<Post> {
        match self {
            Lookup::Found(post) => Some(post),
            Lookup::NotIndexed | Lookup::Unreadable { .. } => None,
        }
    }
}

/// Posts in one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing<'a> {
    pub posts: Vec<&'a PostIndexEntry>,
    pub total: usize,
}

/// A category and how many posts it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Query surface over an index loaded once from a [`PostSource`]
pub struct PostStore<S> {
    source: S,
    index: PostIndex,
    sink: Box<dyn CacheTagSink>,
}

impl<S: PostSource> PostStore<S> {
    /// Load the index from `source`
    pub fn open(source: S) -> Result<Self, StoreError> {
        let index = source.load()?;
        Ok(Self {
            source,
            index,
            sink: Box::new(TracingSink),
        })
    }

    /// Report cache tags to `sink` instead of the log
    pub fn with_sink(mut self, sink: impl CacheTagSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn index(&self) -> &PostIndex {
        &self.index
    }

    /// All entries, newest first
    pub fn list_all(&self) -> Vec<&PostIndexEntry> {
        self.sink.tag(&CacheTag::Posts);
        self.index.iter().collect()
    }

    /// Look up a post and read its body, keeping the reason for a miss
    pub fn lookup(&self, slug: &str) -> Lookup {
        self.sink.tag(&CacheTag::Post(slug.to_string()));

        let Some(entry) = self.index.get(slug) else {
            return Lookup::NotIndexed;
        };

        match self.source.read_content(&entry.path) {
            Ok(raw) => {
                let body = frontmatter::strip(&raw).to_string();
                Lookup::Found(Post::new(entry.clone(), body))
            }
            Err(error) => {
                tracing::error!("Error reading post file {}: {}", entry.path, error);
                Lookup::Unreadable {
                    path: entry.path.clone(),
                    error,
                }
            }
        }
    }

    /// A post with its body, or `None` if it is not indexed or cannot be read
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.lookup(slug).into_post()
    }

    /// Entries whose category equals `category`, newest first
    pub fn list_by_category(&self, category: &str) -> CategoryListing<'_> {
        let posts: Vec<_> = self
            .list_all()
            .into_iter()
            .filter(|entry| entry.category == category)
            .collect();
        self.sink.tag(&CacheTag::Category(category.to_string()));

        CategoryListing {
            total: posts.len(),
            posts,
        }
    }

    /// Post count per category, largest first.
    ///
    /// Equal counts keep the order in which each category first appears in the index.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        self.sink.tag(&CacheTag::CategoryCounts);

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for entry in self.index.iter().filter(|e| !e.category.is_empty()) {
            *counts.entry(entry.category.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<_> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Distinct categories in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        self.sink.tag(&CacheTag::Categories);

        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for entry in self.index.iter().filter(|e| !e.category.is_empty()) {
            seen.insert(entry.category.as_str(), ());
        }
        seen.into_keys().collect()
    }
}
