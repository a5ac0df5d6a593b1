//! Cache tags emitted by store queries
//!
//! The store keeps no cached results itself. Each query reports the tag its result
//! depends on so a host cache can invalidate it when content changes.

use std::fmt;
use std::sync::Mutex;

/// Invalidation key for one query shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheTag {
    /// Every post listing
    Posts,
    /// A single post
    Post(String),
    /// Posts in one category
    Category(String),
    /// Category counts
    CategoryCounts,
    /// Distinct category names
    Categories,
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheTag::Posts => f.write_str("posts"),
            // slugs and categories share the `posts/` namespace
            CacheTag::Post(slug) => write!(f, "posts/{}", slug),
            CacheTag::Category(category) => write!(f, "posts/{}", category),
            CacheTag::CategoryCounts => f.write_str("categoriesCounts"),
            CacheTag::Categories => f.write_str("categories"),
        }
    }
}

/// Receives the tag of every query the store answers
pub trait CacheTagSink: Send + Sync {
    fn tag(&self, tag: &CacheTag);
}

/// Logs tags at debug level
#[derive(Debug, Default)]
pub struct TracingSink;

impl CacheTagSink for TracingSink {
    fn tag(&self, tag: &CacheTag) {
        tracing::debug!("cache tag: {}", tag);
    }
}

/// Collects tags in emission order
#[derive(Debug, Default)]
pub struct TagRecorder {
    tags: Mutex<Vec<CacheTag>>,
}

impl TagRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded tags
    pub fn take(&self) -> Vec<CacheTag> {
        match self.tags.lock() {
            Ok(mut tags) => std::mem::take(&mut *tags),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl CacheTagSink for TagRecorder {
    fn tag(&self, tag: &CacheTag) {
        match self.tags.lock() {
            Ok(mut tags) => tags.push(tag.clone()),
            Err(poisoned) => poisoned.into_inner().push(tag.clone()),
        }
    }
}

impl<T: CacheTagSink + ?Sized> CacheTagSink for std::sync::Arc<T> {
    fn tag(&self, tag: &CacheTag) {
        (**self).tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(CacheTag::Posts.to_string(), "posts");
        assert_eq!(CacheTag::Post("hello".into()).to_string(), "posts/hello");
        assert_eq!(CacheTag::Category("rust".into()).to_string(), "posts/rust");
        assert_eq!(CacheTag::CategoryCounts.to_string(), "categoriesCounts");
        assert_eq!(CacheTag::Categories.to_string(), "categories");
    }

    #[test]
    fn test_recorder_drains() {
        let recorder = TagRecorder::new();
        recorder.tag(&CacheTag::Posts);
        recorder.tag(&CacheTag::Categories);
        assert_eq!(recorder.take(), vec![CacheTag::Posts, CacheTag::Categories]);
        assert!(recorder.take().is_empty());
    }
}
