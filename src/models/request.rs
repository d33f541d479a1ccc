//! Leaderboard selection and the immutable pipeline request.

use std::fmt;

use url::Url;

use crate::error::{AppError, Result};
use crate::services::RowFilter;

/// Gaming platform a leaderboard is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    All,
    Steam,
    Xbox,
    Ps,
}

impl Platform {
    /// Resolve a platform name, case-insensitively. Unknown names fall back to `All`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "steam" => Self::Steam,
            "xbox" => Self::Xbox,
            "ps" => Self::Ps,
            _ => Self::All,
        }
    }

    /// Path segment used by the leaderboard site.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Steam => "steam",
            Self::Xbox => "xbox",
            Self::Ps => "ps",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked playlist, identified on the site by a numeric leaderboard ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playlist {
    Unranked,
    Duel,
    Doubles,
    SoloStandard,
    #[default]
    Standard,
}

impl Playlist {
    /// Resolve a playlist name. Unknown names fall back to ranked standard 3v3.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "unranked" => Self::Unranked,
            "1v1" => Self::Duel,
            "2v2" => Self::Doubles,
            "solo" => Self::SoloStandard,
            _ => Self::Standard,
        }
    }

    /// Numeric leaderboard ID.
    pub fn id(&self) -> u32 {
        match self {
            Self::Unranked => 0,
            Self::Duel => 10,
            Self::Doubles => 11,
            Self::SoloStandard => 12,
            Self::Standard => 13,
        }
    }
}

/// Everything the pipeline needs for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    base_url: Url,
    page_count: usize,
    filter: RowFilter,
}

impl PipelineRequest {
    /// Build a request for `<site>/<platform>/<playlist id>`.
    pub fn new(
        site: &str,
        platform: Platform,
        playlist: Playlist,
        page_count: usize,
        filter: RowFilter,
    ) -> Result<Self> {
        let base = format!(
            "{}/{}/{}",
            site.trim_end_matches('/'),
            platform.as_str(),
            playlist.id()
        );
        Self::from_base_url(Url::parse(&base)?, page_count, filter)
    }

    /// Build a request from an already resolved leaderboard URL.
    pub fn from_base_url(base_url: Url, page_count: usize, filter: RowFilter) -> Result<Self> {
        if page_count == 0 {
            return Err(AppError::validation("page count must be at least 1"));
        }
        Ok(Self {
            base_url,
            page_count,
            filter,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn filter(&self) -> &RowFilter {
        &self.filter
    }

    /// URL of a 1-based page.
    pub fn page_url(&self, page: usize) -> String {
        let mut url = self.base_url.clone();
        url.set_query(Some(&format!("page={page}")));
        url.to_string()
    }

    /// All page numbers with their URLs, in launch order.
    pub fn page_urls(&self) -> Vec<(usize, String)> {
        (1..=self.page_count)
            .map(|page| (page, self.page_url(page)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "https://rocketleague.tracker.network/ranked-leaderboards";

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::from_name("STEAM"), Platform::Steam);
        assert_eq!(Platform::from_name("ps"), Platform::Ps);
        assert_eq!(Platform::from_name("switch"), Platform::All);
    }

    #[test]
    fn test_playlist_ids() {
        assert_eq!(Playlist::from_name("unranked").id(), 0);
        assert_eq!(Playlist::from_name("1v1").id(), 10);
        assert_eq!(Playlist::from_name("2v2").id(), 11);
        assert_eq!(Playlist::from_name("solo").id(), 12);
        assert_eq!(Playlist::from_name("3v3").id(), 13);
        assert_eq!(Playlist::from_name("hoops").id(), 13);
    }

    #[test]
    fn test_page_urls() {
        let request = PipelineRequest::new(
            SITE,
            Platform::Xbox,
            Playlist::Doubles,
            2,
            RowFilter::DisplayAll,
        )
        .unwrap();

        assert_eq!(
            request.page_urls(),
            vec![
                (1, format!("{SITE}/xbox/11?page=1")),
                (2, format!("{SITE}/xbox/11?page=2")),
            ]
        );
    }

    #[test]
    fn test_trailing_slash_on_site() {
        let site = format!("{SITE}/");
        let request =
            PipelineRequest::new(&site, Platform::All, Playlist::Standard, 1, RowFilter::DisplayAll)
                .unwrap();
        assert_eq!(request.page_url(1), format!("{SITE}/all/13?page=1"));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let result =
            PipelineRequest::new(SITE, Platform::All, Playlist::Standard, 0, RowFilter::DisplayAll);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
