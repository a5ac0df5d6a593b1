//! Post index models

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamps in the index file use the `2024-01-01T00:00:00.000Z` form
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

/// Metadata for one content file, as stored in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIndexEntry {
    /// File basename without extension. Stored as the map key, not in the entry body.
    #[serde(skip)]
    pub slug: String,

    /// Source path relative to the site base directory
    pub path: String,

    /// First directory under the content root, or the default category
    pub category: String,

    pub title: String,

    /// Publication date
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub last_modified: DateTime<Utc>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl PostIndexEntry {
    /// Publication date in index form
    pub fn date_iso(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Whether the post was edited after publication
    pub fn is_modified(&self) -> bool {
        self.last_modified != self.date
    }
}

/// A single post with its body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub slug: String,

    #[serde(flatten)]
    pub meta: PostIndexEntry,

    /// Raw Markdown/MDX body without front-matter
    pub content: String,
}

impl Post {
    pub fn new(meta: PostIndexEntry, content: String) -> Self {
        Self {
            slug: meta.slug.clone(),
            meta,
            content,
        }
    }
}

/// Slug -> entry mapping, ordered by descending date
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostIndex {
    entries: IndexMap<String, PostIndexEntry>,
}

impl PostIndex {
    /// Build an index from entries already in their final order.
    ///
    /// A later entry replaces an earlier one with the same slug but keeps the earlier position.
    pub fn from_entries(entries: impl IntoIterator<Item = PostIndexEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.slug.clone(), entry))
            .collect();
        Self { entries }
    }

    pub fn get(&self, slug: &str) -> Option<&PostIndexEntry> {
        self.entries.get(slug)
    }

    /// Entries in stored order
    pub fn iter(&self) -> impl Iterator<Item = &PostIndexEntry> {
        self.entries.values()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the persisted JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'de> Deserialize<'de> for PostIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut entries = IndexMap::<String, PostIndexEntry>::deserialize(deserializer)?;
        for (slug, entry) in entries.iter_mut() {
            entry.slug = slug.clone();
        }
        Ok(Self { entries })
    }
}
