//! Configuration module

mod site;

pub use site::RobotsConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::SlugCollision;
