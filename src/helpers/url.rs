//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment (same set as `encodeURIComponent`)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/") // -> "https://example.com/posts/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Path of a post page
pub fn post_path(slug: &str) -> String {
    format!("/posts/{}", encode_segment(slug))
}

/// Path of a category listing page
pub fn category_path(category: &str) -> String {
    format!("/categories/{}", encode_segment(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/"), "https://example.com");
        assert_eq!(full_url_for(&config, "/posts"), "https://example.com/posts");
        assert_eq!(
            full_url_for(&config, "sitemap.xml"),
            "https://example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_encoded_paths() {
        assert_eq!(post_path("hello-world"), "/posts/hello-world");
        assert_eq!(category_path("dev notes"), "/categories/dev%20notes");
        assert_eq!(category_path("일상"), "/categories/%EC%9D%BC%EC%83%81");
    }
}
