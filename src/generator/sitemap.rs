//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello</loc>
//!     <lastmod>2025-01-01T00:00:00.000Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::helpers::Helpers;
use crate::store::{PostSource, PostStore};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFrequency::Daily => f.write_str("daily"),
            ChangeFrequency::Weekly => f.write_str("weekly"),
        }
    }
}

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Sitemap data structure
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Home page, post list, one URL per category, then one per post.
    ///
    /// Listing pages use `now` as their last modification; posts use their publication date.
    pub fn from_store<S: PostSource>(
        store: &PostStore<S>,
        helpers: &Helpers,
        now: DateTime<Utc>,
    ) -> Self {
        let mut urls = vec![
            UrlEntry {
                loc: helpers.full_url_for("/"),
                lastmod: now,
                changefreq: ChangeFrequency::Daily,
                priority: 1.0,
            },
            UrlEntry {
                loc: helpers.full_url_for("/posts"),
                lastmod: now,
                changefreq: ChangeFrequency::Daily,
                priority: 0.8,
            },
        ];

        urls.extend(store.categories().into_iter().map(|category| UrlEntry {
            loc: helpers.category_url(category),
            lastmod: now,
            changefreq: ChangeFrequency::Weekly,
            priority: 0.5,
        }));

        urls.extend(store.list_all().into_iter().map(|post| UrlEntry {
            loc: helpers.post_url(&post.slug),
            lastmod: post.date,
            changefreq: ChangeFrequency::Weekly,
            priority: 0.8,
        }));

        Self { urls }
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
            ));
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::fixtures::entry;
    use crate::content::PostIndex;
    use crate::store::MemorySource;
    use chrono::TimeZone;

    fn store() -> PostStore<MemorySource> {
        let index = PostIndex::from_entries([
            entry("newest", "dev", (2024, 6, 1)),
            entry("older", "life & travel", (2024, 1, 1)),
        ]);
        PostStore::open(MemorySource::new(index)).unwrap()
    }

    fn helpers() -> Helpers {
        Helpers::new(SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        })
    }

    #[test]
    fn test_sitemap_order_and_priorities() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let sitemap = Sitemap::from_store(&store(), &helpers(), now);
        let locs: Vec<_> = sitemap.urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://example.com",
                "https://example.com/posts",
                "https://example.com/categories/dev",
                "https://example.com/categories/life%20%26%20travel",
                "https://example.com/posts/newest",
                "https://example.com/posts/older",
            ]
        );
        assert_eq!(sitemap.urls[0].priority, 1.0);
        assert_eq!(sitemap.urls[2].changefreq, ChangeFrequency::Weekly);
        assert_eq!(
            sitemap.urls[4].lastmod,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_sitemap_xml() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let xml = Sitemap::from_store(&store(), &helpers(), now).to_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/posts/newest</loc>"));
        assert!(xml.contains("<lastmod>2024-06-01T00:00:00.000Z</lastmod>"));
        assert!(xml.contains("<priority>0.5</priority>"));
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
