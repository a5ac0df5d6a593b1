//! Show a single post

use anyhow::Result;
use std::io::Write;

use crate::helpers::Helpers;
use crate::store::{Lookup, PostSource, PostStore};
use crate::Site;

/// Print one post's metadata and body
pub fn run(site: &Site, slug: &str, json: bool) -> Result<()> {
    let store = site.store()?;
    let helpers = Helpers::new(site.config.clone());
    let stdout = std::io::stdout();
    render(&store, &helpers, slug, json, &mut stdout.lock())
}

pub fn render<S: PostSource>(
    store: &PostStore<S>,
    helpers: &Helpers,
    slug: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let post = match store.lookup(slug) {
        Lookup::Found(post) => post,
        Lookup::NotIndexed => anyhow::bail!("Post not found: {}", slug),
        // the store already logged the read error
        Lookup::Unreadable { path, .. } => {
            anyhow::bail!("Post not found: {} ({} is unreadable)", slug, path)
        }
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &post)?;
        writeln!(out)?;
        return Ok(());
    }

    let meta = &post.meta;
    writeln!(out, "{}", meta.title)?;
    writeln!(out, "category: {}", meta.category)?;
    writeln!(out, "published: {}", helpers.long_date(&meta.date))?;
    if meta.is_modified() {
        writeln!(out, "modified: {}", helpers.long_date(&meta.last_modified))?;
    }
    if !meta.tags.is_empty() {
        writeln!(out, "tags: {}", meta.tags.join(", "))?;
    }
    if let Some(thumbnail) = &meta.thumbnail {
        writeln!(out, "thumbnail: {}", thumbnail)?;
    }
    if !meta.description.is_empty() {
        writeln!(out, "\n{}", meta.description)?;
    }
    writeln!(out, "\n{}", post.content.trim_end())?;

    Ok(())
}
