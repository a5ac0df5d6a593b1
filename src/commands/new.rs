//! Create a new post

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `content_dir/<category>/<slug>.md` with a front-matter scaffold.
///
/// Without a category the post lands directly in the content root.
pub fn create_post(site: &Site, title: &str, category: Option<&str>) -> Result<PathBuf> {
    create_post_at(site, title, category, Utc::now())
}

fn create_post_at(
    site: &Site,
    title: &str,
    category: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = match category {
        Some(category) if !category.trim().is_empty() => site.content_dir.join(category),
        _ => site.content_dir.clone(),
    };
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndescription: \"\"\ndate: {}\ntags: []\n---\n",
        serde_json::to_string(title)?,
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
