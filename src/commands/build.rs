//! Build the posts index

use anyhow::{Context, Result};

use crate::content::{IndexBuilder, PostIndex};
use crate::Site;

/// Walk the content directory and write the index file
pub async fn run(site: &Site) -> Result<PostIndex> {
    let start = std::time::Instant::now();
    tracing::info!("Generating posts map from {:?}", site.content_dir);

    let index = IndexBuilder::new(site)
        .build()
        .await
        .with_context(|| format!("Failed to index {}", site.content_dir.display()))?;

    IndexBuilder::persist(&index, &site.index_path).await?;

    tracing::info!(
        "Successfully generated posts map at {:?} with {} posts in {:.2}s",
        site.index_path,
        index.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_writes_index_that_store_reads() {
        let dir = TempDir::new().unwrap();
        let post = dir.path().join("posts/dev/first.md");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "---\ntitle: First\ndate: 2024-01-01\n---\nHello\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        let built = run(&site).await.unwrap();
        assert!(dir.path().join("src/lib/posts-map.json").exists());

        let store = site.store().unwrap();
        assert_eq!(store.index(), &built);
        assert_eq!(
            store.index().slugs().collect::<Vec<_>>(),
            built.slugs().collect::<Vec<_>>()
        );
        let first = store.get_by_slug("first").unwrap();
        assert_eq!(first.meta.title, "First");
        assert_eq!(first.content, "Hello\n");
    }

    #[tokio::test]
    async fn test_build_failure_leaves_no_index() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site).await.is_err());
        assert!(!site.index_path.exists());
    }
}
