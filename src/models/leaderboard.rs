//! Leaderboard rows, pages and the result of a pipeline run.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::{PageError, RowParseError};

/// One ranked player's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    /// Rank on the leaderboard
    pub position: u32,

    /// Player display name
    pub player: String,

    /// Link to the player's profile, as it appears on the page
    pub player_url: String,

    /// Skill rating
    pub rating: i64,

    /// Number of games played in the playlist
    pub games_played: u32,

    /// Index of the row within its page's table
    #[serde(skip)]
    pub source_row_index: usize,
}

impl fmt::Display for LeaderboardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.position, self.player, self.player_url, self.rating, self.games_played
        )
    }
}

/// Terminal state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Fetched,
    FetchFailed,
    StructureFailed,
    Cancelled,
}

/// Rows gathered from one leaderboard page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardPage {
    /// 1-based page number
    pub page_number: usize,

    /// URL the page was fetched from
    pub url: String,

    /// Accepted rows, ordered by their position in the table
    pub rows: Vec<LeaderboardRow>,

    /// Set when the page produced no rows at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PageError>,

    /// Rows that could not be parsed, ordered by row index
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub row_errors: Vec<RowParseError>,

    /// Complete rows left out by the filter
    pub filtered_out: usize,
}

impl LeaderboardPage {
    /// A page whose table was read.
    pub fn fetched(
        page_number: usize,
        url: impl Into<String>,
        rows: Vec<LeaderboardRow>,
        row_errors: Vec<RowParseError>,
        filtered_out: usize,
    ) -> Self {
        Self {
            page_number,
            url: url.into(),
            rows,
            error: None,
            row_errors,
            filtered_out,
        }
    }

    /// A page that failed as a whole.
    pub fn failed(page_number: usize, url: impl Into<String>, error: PageError) -> Self {
        Self {
            page_number,
            url: url.into(),
            rows: Vec::new(),
            error: Some(error),
            row_errors: Vec::new(),
            filtered_out: 0,
        }
    }

    /// Terminal state, derived from the recorded error.
    pub fn status(&self) -> PageStatus {
        match &self.error {
            None => PageStatus::Fetched,
            Some(PageError::Fetch { .. }) => PageStatus::FetchFailed,
            Some(PageError::Structure { .. }) => PageStatus::StructureFailed,
            Some(PageError::Cancelled) => PageStatus::Cancelled,
        }
    }
}

/// Ordered outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// One entry per requested page, in page order
    pub pages: Vec<LeaderboardPage>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl PipelineResult {
    /// All accepted rows, page by page.
    pub fn rows(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }

    /// Number of pages that ended with an error.
    pub fn failed_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| page.status() != PageStatus::Fetched)
            .count()
    }

    /// Number of pages that ended in `status`.
    pub fn pages_with(&self, status: PageStatus) -> usize {
        self.pages.iter().filter(|page| page.status() == status).count()
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> LeaderboardRow {
        LeaderboardRow {
            position: 1,
            player: "Nick".to_string(),
            player_url: "/profile/steam/nick".to_string(),
            rating: 1850,
            games_played: 412,
            source_row_index: 0,
        }
    }

    #[test]
    fn test_row_display() {
        assert_eq!(
            sample_row().to_string(),
            "1 | Nick | /profile/steam/nick | 1850 | 412"
        );
    }

    #[test]
    fn test_page_status() {
        let ok = LeaderboardPage::fetched(1, "u", vec![sample_row()], Vec::new(), 0);
        assert_eq!(ok.status(), PageStatus::Fetched);

        let fetch = LeaderboardPage::failed(2, "u", PageError::fetch("u", "timed out"));
        assert_eq!(fetch.status(), PageStatus::FetchFailed);
        assert!(fetch.rows.is_empty());

        let structure = LeaderboardPage::failed(3, "u", PageError::structure("table"));
        assert_eq!(structure.status(), PageStatus::StructureFailed);

        let cancelled = LeaderboardPage::failed(4, "u", PageError::Cancelled);
        assert_eq!(cancelled.status(), PageStatus::Cancelled);
    }

    #[test]
    fn test_pages_counted_by_status() {
        let result = PipelineResult {
            pages: vec![
                LeaderboardPage::fetched(1, "u1", vec![sample_row()], Vec::new(), 0),
                LeaderboardPage::failed(2, "u2", PageError::fetch("u2", "refused")),
                LeaderboardPage::failed(3, "u3", PageError::Cancelled),
                LeaderboardPage::failed(4, "u4", PageError::Cancelled),
            ],
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        };

        assert_eq!(result.failed_pages(), 3);
        assert_eq!(result.pages_with(PageStatus::Cancelled), 2);
        assert_eq!(result.pages_with(PageStatus::FetchFailed), 1);
        assert_eq!(result.pages_with(PageStatus::StructureFailed), 0);
    }

    #[test]
    fn test_result_json_shape() {
        let result = PipelineResult {
            pages: vec![LeaderboardPage::fetched(1, "u", vec![sample_row()], Vec::new(), 2)],
            started_at: Utc::now(),
            elapsed: Duration::from_millis(1500),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["elapsed_secs"], 1.5);
        assert_eq!(json["pages"][0]["rows"][0]["player"], "Nick");
        assert_eq!(json["pages"][0]["filtered_out"], 2);
        assert!(json["pages"][0].get("error").is_none());
        assert_eq!(result.rows().count(), 1);
        assert_eq!(result.failed_pages(), 0);
    }
}
