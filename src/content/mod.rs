//! Content module - front-matter, the posts index model, and the index builder

pub mod builder;
pub mod frontmatter;
mod post;

pub use builder::{BuildError, IndexBuilder};
pub use frontmatter::FrontMatter;
pub use post::{Post, PostIndex, PostIndexEntry};

#[cfg(test)]
pub(crate) use post::fixtures;
