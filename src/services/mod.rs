//! Service layer for the leaderboard scraper.
//!
//! This module contains the business logic for:
//! - Row parsing (`RawRow`)
//! - Page fetching and row fan-out (`PageFetcher`)
//! - Row filtering (`RowFilter`)

mod filter;
mod pages;
mod rows;

use scraper::Selector;

use crate::error::{AppError, Result};

pub use filter::RowFilter;
pub use pages::PageFetcher;
pub use rows::{RawRow, RowSelectors};

/// Parse a CSS selector, keeping the selector text in the error.
pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
