// src/services/rows.rs

//! Row parser.
//!
//! Splits row handling in two: [`RawRow::from_element`] pulls the cleaned
//! cell strings out of the DOM (synchronous, the document is not `Send`),
//! then [`RawRow::parse`] turns them into a typed [`LeaderboardRow`] on any
//! task.

use std::str::FromStr;

use scraper::{ElementRef, Selector};

use crate::error::{Result, RowParseError};
use crate::models::LeaderboardRow;
use crate::services::parse_selector;
use crate::utils::clean_text;

/// Selectors for the cells of one leaderboard row.
#[derive(Debug)]
pub struct RowSelectors {
    cell: Selector,
    anchor: Selector,
    rating: Selector,
}

impl RowSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cell: parse_selector("td")?,
            anchor: parse_selector("td a")?,
            // The rating cell shows two numbers; the right-aligned one is the rating.
            rating: parse_selector("div .pull-right")?,
        })
    }
}

/// Cleaned cell text of one table row, before numeric parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub index: usize,
    pub position: String,
    pub player: String,
    pub player_url: String,
    pub rating: String,
    pub games_played: String,
}

impl RawRow {
    /// Extract the raw fields of `row`, the `index`-th data row of its table.
    ///
    /// Missing cells produce empty strings; [`RawRow::parse`] reports them.
    pub fn from_element(index: usize, row: ElementRef<'_>, selectors: &RowSelectors) -> Self {
        let cells: Vec<ElementRef<'_>> = row.select(&selectors.cell).collect();
        let cell_text = |i: usize| {
            cells
                .get(i)
                .map(|cell| clean_text(&cell.text().collect::<String>()))
                .unwrap_or_default()
        };

        // First anchor is the avatar link, the second one is the profile.
        let player_url = row
            .select(&selectors.anchor)
            .nth(1)
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .unwrap_or_default();

        let rating = cells
            .get(2)
            .and_then(|cell| cell.select(&selectors.rating).next())
            .map(|el| clean_text(&el.text().collect::<String>()))
            .unwrap_or_default();

        Self {
            index,
            position: cell_text(0),
            player: cell_text(1),
            player_url,
            rating,
            games_played: cell_text(3),
        }
    }

    /// Turn the raw strings into a complete row, or say which fields are bad.
    pub fn parse(self) -> std::result::Result<LeaderboardRow, RowParseError> {
        let fields = [
            ("position", &self.position),
            ("player", &self.player),
            ("player_url", &self.player_url),
            ("rating", &self.rating),
            ("games_played", &self.games_played),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(RowParseError::Missing {
                row: self.index,
                fields: missing,
            });
        }

        let position: u32 = parse_number(self.index, "position", &self.position)?;
        if position == 0 {
            return Err(RowParseError::InvalidNumber {
                row: self.index,
                field: "position",
                value: self.position,
            });
        }
        let rating = parse_number(self.index, "rating", &self.rating)?;
        let games_played = parse_number(self.index, "games_played", &self.games_played)?;

        Ok(LeaderboardRow {
            position,
            player: self.player,
            player_url: self.player_url,
            rating,
            games_played,
            source_row_index: self.index,
        })
    }
}

fn parse_number<T: FromStr>(
    row: usize,
    field: &'static str,
    value: &str,
) -> std::result::Result<T, RowParseError> {
    value.parse().map_err(|_| RowParseError::InvalidNumber {
        row,
        field,
        value: value.to_string(),
    })
}
