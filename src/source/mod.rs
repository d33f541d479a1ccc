//! Document sources for leaderboard pages.
//!
//! The pipeline only needs "give me the HTML behind this URL". Production
//! runs go through [`HttpSource`]; anything else that can produce page text
//! (fixtures, caches) implements [`DocumentSource`] directly.

pub mod http;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use http::HttpSource;

/// Trait for anything that can retrieve a page's document text.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw document behind `url`.
    ///
    /// Network failures and non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}
