// src/services/pages.rs

//! Page fetcher service.
//!
//! Retrieves one leaderboard page, finds its results table and parses every
//! data row on its own task. Results come back over a channel in whatever
//! order the tasks finish and are put back in table order before the page is
//! returned.

use std::sync::Arc;

use scraper::{Html, Selector};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{PageError, Result, RowParseError};
use crate::models::{LeaderboardPage, LeaderboardRow};
use crate::services::parse_selector;
use crate::services::rows::{RawRow, RowSelectors};
use crate::services::RowFilter;
use crate::source::DocumentSource;

/// Selectors locating the results table.
#[derive(Debug)]
struct TableSelectors {
    table: Selector,
    tbody: Selector,
    tr: Selector,
    row: RowSelectors,
}

/// What became of one dispatched row.
#[derive(Debug)]
enum RowOutcome {
    Accepted(LeaderboardRow),
    Rejected(RowParseError),
    FilteredOut,
}

/// Rows of a page, gathered from the row tasks.
#[derive(Debug, Default)]
struct RowBatch {
    rows: Vec<LeaderboardRow>,
    errors: Vec<RowParseError>,
    filtered_out: usize,
}

impl RowBatch {
    /// Gather outcomes received in any order into table order.
    fn from_outcomes(outcomes: impl IntoIterator<Item = RowOutcome>) -> Self {
        let mut batch = Self::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Accepted(row) => batch.rows.push(row),
                RowOutcome::Rejected(error) => batch.errors.push(error),
                RowOutcome::FilteredOut => batch.filtered_out += 1,
            }
        }
        batch.rows.sort_by_key(|row| row.source_row_index);
        batch.errors.sort_by_key(RowParseError::row);
        batch
    }
}

/// Service turning a page URL into a [`LeaderboardPage`].
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn DocumentSource>,
    selectors: Arc<TableSelectors>,
}

impl PageFetcher {
    /// Create a fetcher reading documents from `source`.
    pub fn new(source: Arc<dyn DocumentSource>) -> Result<Self> {
        let selectors = TableSelectors {
            table: parse_selector("table")?,
            tbody: parse_selector("tbody")?,
            tr: parse_selector("tr")?,
            row: RowSelectors::new()?,
        };
        Ok(Self {
            source,
            selectors: Arc::new(selectors),
        })
    }

    /// Fetch and parse one page. Never fails as a whole: errors are recorded
    /// on the returned page.
    pub async fn fetch(
        &self,
        page_number: usize,
        url: String,
        filter: Arc<RowFilter>,
        cancel: CancellationToken,
    ) -> LeaderboardPage {
        let fetched = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                log::debug!("Page {page_number} cancelled while fetching");
                return LeaderboardPage::failed(page_number, url, PageError::Cancelled);
            }
            result = self.source.fetch(&url) => result,
        };

        let html = match fetched {
            Ok(html) => html,
            Err(e) => {
                let error = PageError::fetch(&url, e);
                log::warn!("Page {page_number}: {error}");
                return LeaderboardPage::failed(page_number, url, error);
            }
        };

        let raw_rows = match self.extract_rows(&html) {
            Ok(rows) => rows,
            Err(error) => {
                log::warn!("Page {page_number}: {error}");
                return LeaderboardPage::failed(page_number, url, error);
            }
        };

        let batch = parse_rows(raw_rows, filter).await;
        for error in &batch.errors {
            log::debug!("Page {page_number}: dropped {error}");
        }
        log::debug!(
            "Page {page_number}: {} rows kept, {} rejected, {} filtered out",
            batch.rows.len(),
            batch.errors.len(),
            batch.filtered_out
        );

        LeaderboardPage::fetched(
            page_number,
            url,
            batch.rows,
            batch.errors,
            batch.filtered_out,
        )
    }

    /// Locate table, tbody and data rows; row 0 is the header and is skipped.
    fn extract_rows(&self, html: &str) -> std::result::Result<Vec<RawRow>, PageError> {
        let document = Html::parse_document(html);
        let selectors = &self.selectors;

        let table = document
            .select(&selectors.table)
            .next()
            .ok_or_else(|| PageError::structure("table"))?;
        let tbody = table
            .select(&selectors.tbody)
            .next()
            .ok_or_else(|| PageError::structure("tbody"))?;

        let rows: Vec<RawRow> = tbody
            .select(&selectors.tr)
            .skip(1)
            .enumerate()
            .map(|(index, tr)| RawRow::from_element(index, tr, &selectors.row))
            .collect();

        if rows.is_empty() {
            return Err(PageError::structure("table rows"));
        }
        Ok(rows)
    }
}

/// Parse every row on its own task and wait for exactly as many results as
/// were dispatched.
async fn parse_rows(raw_rows: Vec<RawRow>, filter: Arc<RowFilter>) -> RowBatch {
    let dispatched = raw_rows.len();
    let (tx, mut rx) = mpsc::channel(dispatched.max(1));

    for raw in raw_rows {
        let tx = tx.clone();
        let filter = Arc::clone(&filter);
        tokio::spawn(async move {
            let outcome = match raw.parse() {
                Ok(row) if filter.include(&row) => RowOutcome::Accepted(row),
                Ok(_) => RowOutcome::FilteredOut,
                Err(error) => RowOutcome::Rejected(error),
            };
            // The collector outlives every row task.
            let _ = tx.send(outcome).await;
        });
    }
    drop(tx);

    let mut outcomes = Vec::with_capacity(dispatched);
    for _ in 0..dispatched {
        let Some(outcome) = rx.recv().await else {
            log::error!("Row task ended without reporting a result");
            break;
        };
        outcomes.push(outcome);
    }

    RowBatch::from_outcomes(outcomes)
}
