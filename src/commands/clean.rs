//! Remove generated files

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the index file and the generated sitemap/robots files
pub fn run(site: &Site) -> Result<()> {
    let generated = [
        site.index_path.clone(),
        site.public_dir.join(&site.config.sitemap.path),
        site.public_dir.join("robots.txt"),
    ];

    for path in generated {
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}
