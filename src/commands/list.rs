//! List indexed content

use anyhow::Result;
use indexmap::IndexMap;
use std::io::Write;

use crate::helpers::Helpers;
use crate::store::{PostSource, PostStore};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.store()?;
    let helpers = Helpers::new(site.config.clone());
    let stdout = std::io::stdout();
    render(&store, &helpers, content_type, &mut stdout.lock())
}

/// Write a listing of `content_type` to `out`
pub fn render<S: PostSource>(
    store: &PostStore<S>,
    helpers: &Helpers,
    content_type: &str,
    out: &mut impl Write,
) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = store.list_all();
            if posts.is_empty() {
                writeln!(out, "No posts published.")?;
                return Ok(());
            }
            writeln!(out, "Posts in {} ({}):", helpers.site_title(), posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}] ({})",
                    helpers.date(&post.date),
                    post.title,
                    post.category,
                    post.slug
                )?;
            }
        }
        "category" | "categories" => {
            let categories = store.category_counts();
            writeln!(out, "Categories ({}):", categories.len())?;
            for entry in categories {
                writeln!(out, "  {} ({})", entry.category, entry.count)?;
            }
        }
        "tag" | "tags" => {
            let mut tags: IndexMap<&str, usize> = IndexMap::new();
            for post in store.list_all() {
                for tag in &post.tags {
                    *tags.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            writeln!(out, "Tags ({}):", tags.len())?;
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::fixtures::entry;
    use crate::content::PostIndex;
    use crate::store::MemorySource;

    fn listing(store: &PostStore<MemorySource>, content_type: &str) -> String {
        let helpers = Helpers::new(SiteConfig::default());
        let mut out = Vec::new();
        render(store, &helpers, content_type, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn store() -> PostStore<MemorySource> {
        let mut tagged = entry("tagged", "dev", (2024, 3, 1));
        tagged.tags = vec!["rust".to_string(), "cli".to_string()];
        let mut also = entry("also", "dev", (2024, 2, 1));
        also.tags = vec!["rust".to_string()];
        let index = PostIndex::from_entries([tagged, also, entry("note", "etc", (2024, 1, 1))]);
        PostStore::open(MemorySource::new(index)).unwrap()
    }

    #[test]
    fn test_list_posts() {
        let text = listing(&store(), "posts");
        assert_eq!(
            text,
            "Posts in My Blog (3):\n  2024-03-01 - tagged [dev] (tagged)\n  2024-02-01 - also [dev] (also)\n  2024-01-01 - note [etc] (note)\n"
        );
    }

    #[test]
    fn test_list_categories_and_tags() {
        assert_eq!(
            listing(&store(), "category"),
            "Categories (2):\n  dev (2)\n  etc (1)\n"
        );
        assert_eq!(listing(&store(), "tag"), "Tags (2):\n  rust (2)\n  cli (1)\n");
    }

    #[test]
    fn test_posts_header_uses_site_title() {
        let helpers = Helpers::new(SiteConfig {
            title: "Dev Notes".to_string(),
            ..SiteConfig::default()
        });
        let mut out = Vec::new();
        render(&store(), &helpers, "post", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Posts in Dev Notes (3):\n"));
    }

    #[test]
    fn test_empty_listing_message() {
        let store = PostStore::open(MemorySource::default()).unwrap();
        assert_eq!(listing(&store, "post"), "No posts published.\n");
    }

    #[test]
    fn test_unknown_type() {
        let helpers = Helpers::new(SiteConfig::default());
        let mut out = Vec::new();
        assert!(render(&store(), &helpers, "pages", &mut out).is_err());
    }
}
