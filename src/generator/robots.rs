//! robots.txt generation

use crate::config::RobotsConfig;

/// Render robots.txt rules followed by the sitemap location
pub fn render(robots: &RobotsConfig, sitemap_url: Option<&str>) -> String {
    let mut out = format!("User-Agent: {}\n", robots.user_agent);
    for path in &robots.allow {
        out.push_str(&format!("Allow: {}\n", path));
    }
    for path in &robots.disallow {
        out.push_str(&format!("Disallow: {}\n", path));
    }
    if let Some(url) = sitemap_url {
        out.push_str(&format!("\nSitemap: {}\n", url));
    }
    out
}
