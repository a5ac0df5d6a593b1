//! Helper functions for dates and URLs
//!
//! These back the CLI listings and the generated sitemap.

mod date;
mod url;

pub use date::*;
pub use url::*;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::SiteConfig;

/// Helpers bound to one site's configuration
pub struct Helpers {
    config: SiteConfig,
    timezone: Tz,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: SiteConfig) -> Self {
        let timezone = resolve_timezone(&config.timezone);
        Self { config, timezone }
    }

    /// Format a date with the configured format and timezone
    pub fn date(&self, date: &DateTime<Utc>) -> String {
        format_in(date, self.timezone, &self.config.date_format)
    }

    /// Long form, like "January 15, 2024", in the configured timezone
    pub fn long_date(&self, date: &DateTime<Utc>) -> String {
        full_date(&date.with_timezone(&self.timezone))
    }

    /// Configured site title
    pub fn site_title(&self) -> &str {
        &self.config.title
    }

    /// Get full_url_for helper
    pub fn full_url_for(&self, path: &str) -> String {
        full_url_for(&self.config, path)
    }

    /// Absolute URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        self.full_url_for(&post_path(slug))
    }

    /// Absolute URL of a category page
    pub fn category_url(&self, category: &str) -> String {
        self.full_url_for(&category_path(category))
    }
}
