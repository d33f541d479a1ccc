//! Row filter deciding which parsed rows make it into the output.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::LeaderboardRow;
use crate::utils::strip_stray;

/// Per-row inclusion rule, decided once when the row is parsed.
#[derive(Debug, Clone)]
pub enum RowFilter {
    /// Keep every complete row
    DisplayAll,
    /// Keep rows whose player name matches the pattern (unanchored)
    Search(Regex),
}

impl RowFilter {
    /// Compile a search pattern, after dropping stray `|`, `"` and `,`.
    pub fn search(pattern: &str) -> Result<Self> {
        let cleaned = strip_stray(pattern);
        Regex::new(&cleaned)
            .map(Self::Search)
            .map_err(|e| AppError::pattern(cleaned, e))
    }

    /// Whether `row` belongs in the output.
    pub fn include(&self, row: &LeaderboardRow) -> bool {
        match self {
            Self::DisplayAll => true,
            Self::Search(pattern) => pattern.is_match(&row.player),
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }
}
