// src/error.rs

//! Unified error handling for the leaderboard scraper.
//!
//! Errors come in three scopes:
//! - [`AppError`]: aborts the run (bad CLI input, bad config, client setup).
//! - [`PageError`]: recorded on a single page, other pages keep going.
//! - [`RowParseError`]: recorded on a single row, the rest of the page is kept.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client setup or request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Search pattern did not compile
    #[error("Invalid search pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Failure that prevents a whole page from producing rows.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageError {
    /// The document could not be retrieved
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// The document was retrieved but has no usable results table
    #[error("Structure error: no {missing} found")]
    Structure { missing: String },

    /// The run was cancelled before this page completed
    #[error("Cancelled before page completed")]
    Cancelled,
}

impl PageError {
    /// Create a fetch error for a URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a structure error naming the missing element.
    pub fn structure(missing: impl Into<String>) -> Self {
        Self::Structure {
            missing: missing.into(),
        }
    }
}

/// Failure to turn one table row into a leaderboard entry.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowParseError {
    /// One or more fields were empty after cleanup
    #[error("Row {row}: missing {}", .fields.join(", "))]
    Missing {
        row: usize,
        fields: Vec<&'static str>,
    },

    /// A numeric field did not parse as an integer
    #[error("Row {row}: {field} is not a number: '{value}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl RowParseError {
    /// Index of the offending row within its page's table.
    pub fn row(&self) -> usize {
        match self {
            Self::Missing { row, .. } | Self::InvalidNumber { row, .. } => *row,
        }
    }
}
