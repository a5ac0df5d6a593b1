//! Generate sitemap.xml and robots.txt

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Generate crawler files from the persisted index
pub fn run(site: &Site) -> Result<()> {
    let store = site.store()?;
    tracing::info!("Loaded {} posts", store.index().len());
    Generator::new(site, &store).generate()
}
