// src/report.rs

//! Text and JSON rendering of pipeline results.

use std::time::Duration;

use crate::error::Result;
use crate::models::{LeaderboardPage, PipelineResult};
use crate::services::RowFilter;
use crate::utils::columns::columnize;

/// Render one page: a progress header followed by its rows or its error.
///
/// Display mode aligns the rows into columns and ends with a blank line;
/// search mode prints one `|` separated line per matched row.
pub fn render_page(page: &LeaderboardPage, filter: &RowFilter) -> String {
    let mut out = format!("Page {}\nURL  {}\n", page.page_number, page.url);

    if let Some(error) = &page.error {
        out.push_str(&format!("{error}\n"));
        return out;
    }

    let lines: Vec<String> = page.rows.iter().map(ToString::to_string).collect();
    let lines = if filter.is_search() {
        lines
    } else {
        columnize(&lines)
    };
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    if !filter.is_search() {
        out.push('\n');
    }
    out
}

/// Render every page in page order.
pub fn render_text(result: &PipelineResult, filter: &RowFilter) -> String {
    result
        .pages
        .iter()
        .map(|page| render_page(page, filter))
        .collect()
}

/// Closing summary line.
pub fn render_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s elapsed", elapsed.as_secs_f64())
}

/// Pretty-printed JSON of the whole result.
pub fn render_json(result: &PipelineResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::error::PageError;
    use crate::models::LeaderboardRow;

    fn row(position: u32, player: &str, index: usize) -> LeaderboardRow {
        LeaderboardRow {
            position,
            player: player.to_string(),
            player_url: format!("/p/{player}"),
            rating: 1500,
            games_played: 7,
            source_row_index: index,
        }
    }

    #[test]
    fn test_search_page_lines() {
        let page = LeaderboardPage::fetched(1, "https://x/1", vec![row(1, "Nick", 0)], Vec::new(), 1);
        let filter = RowFilter::search("Nick").unwrap();

        assert_eq!(
            render_page(&page, &filter),
            "Page 1\nURL  https://x/1\n1 | Nick | /p/Nick | 1500 | 7\n"
        );
    }

    #[test]
    fn test_display_page_is_columnized() {
        let rows = vec![row(1, "Nick", 0), row(10, "Bo", 1)];
        let page = LeaderboardPage::fetched(2, "u", rows, Vec::new(), 0);

        assert_eq!(
            render_page(&page, &RowFilter::DisplayAll),
            "Page 2\nURL  u\n1   Nick  /p/Nick  1500  7\n10  Bo    /p/Bo    1500  7\n\n"
        );
    }

    #[test]
    fn test_failed_page_prints_error() {
        let page = LeaderboardPage::failed(3, "u", PageError::structure("tbody"));
        assert_eq!(
            render_page(&page, &RowFilter::DisplayAll),
            "Page 3\nURL  u\nStructure error: no tbody found\n"
        );
    }

    #[test]
    fn test_text_keeps_page_order_and_elapsed() {
        let result = PipelineResult {
            pages: vec![
                LeaderboardPage::fetched(1, "u1", vec![row(1, "Nick", 0)], Vec::new(), 1),
                LeaderboardPage::fetched(2, "u2", vec![row(101, "Nicky", 0)], Vec::new(), 0),
            ],
            started_at: Utc::now(),
            elapsed: Duration::from_millis(1234),
        };
        let filter = RowFilter::search("Nick").unwrap();

        let text = render_text(&result, &filter);
        let nick = text.find("1 | Nick |").unwrap();
        let nicky = text.find("101 | Nicky |").unwrap();
        assert!(nick < nicky);
        assert_eq!(render_elapsed(result.elapsed), "1.23s elapsed");
        assert!(render_json(&result).unwrap().contains("\"Nicky\""));
    }
}
