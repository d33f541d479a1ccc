// src/pipeline/leaderboard.rs

//! Leaderboard pipeline coordinator.
//!
//! Launches one page task per requested page, pausing between launches, and
//! reassembles the pages in page order however they finish.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{PageError, Result};
use crate::models::{CrawlerConfig, LeaderboardPage, PipelineRequest, PipelineResult};
use crate::services::{PageFetcher, RowFilter};
use crate::source::DocumentSource;

/// Fetches every page of a request and merges them into one ordered result.
pub struct LeaderboardPipeline {
    fetcher: PageFetcher,
    request_delay: Duration,
    deadline: Option<Duration>,
    cancel: CancellationToken,
}

impl LeaderboardPipeline {
    /// Create a pipeline reading pages from `source`.
    pub fn new(source: Arc<dyn DocumentSource>, config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(source)?,
            request_delay: config.request_delay(),
            deadline: config.deadline(),
            cancel: CancellationToken::new(),
        })
    }

    /// Token that stops the pipeline: no further launches, in-flight fetches
    /// end as cancelled pages. Cancelling it affects every later run too.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the request and return the pages in page order.
    pub async fn run(&self, request: &PipelineRequest) -> PipelineResult {
        self.run_with(request, |_| {}).await
    }

    /// Run the request, handing each page to `on_page` as soon as it arrives.
    ///
    /// Arrival order is completion order; the returned result is in page order
    /// and always holds one entry per requested page.
    pub async fn run_with<F>(&self, request: &PipelineRequest, mut on_page: F) -> PipelineResult
    where
        F: FnMut(&LeaderboardPage),
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let page_count = request.page_count();
        let cancel = self.cancel.child_token();

        let deadline_timer = self.deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                log::warn!("Deadline of {deadline:?} reached, cancelling outstanding pages");
                cancel.cancel();
            })
        });

        let (tx, mut rx) = mpsc::channel(page_count);
        let launcher = tokio::spawn(launch_pages(
            self.fetcher.clone(),
            request.page_urls(),
            Arc::new(request.filter().clone()),
            self.request_delay,
            cancel.clone(),
            tx,
        ));

        let mut slots: Vec<Option<LeaderboardPage>> = (0..page_count).map(|_| None).collect();
        for _ in 0..page_count {
            let Some(page) = rx.recv().await else {
                log::error!("Page task ended without reporting a result");
                break;
            };
            on_page(&page);
            match slots.get_mut(page.page_number.wrapping_sub(1)) {
                Some(slot) => *slot = Some(page),
                None => log::error!("Discarding result for unknown page {}", page.page_number),
            }
        }

        if let Some(timer) = deadline_timer {
            timer.abort();
        }
        if let Err(e) = launcher.await {
            log::error!("Page launcher failed: {e}");
        }

        let pages = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| {
                    let page_number = i + 1;
                    let url = request.page_url(page_number);
                    let error = PageError::fetch(&url, "page task ended without a result");
                    LeaderboardPage::failed(page_number, url, error)
                })
            })
            .collect();

        let elapsed = start.elapsed();
        log::info!("Fetched {page_count} pages in {:.2}s", elapsed.as_secs_f64());

        PipelineResult {
            pages,
            started_at,
            elapsed,
        }
    }
}

/// Spawn one page task per URL, in page order, waiting `delay` after each
/// launch. Once cancelled, the remaining pages are reported as cancelled
/// without being fetched.
async fn launch_pages(
    fetcher: PageFetcher,
    urls: Vec<(usize, String)>,
    filter: Arc<RowFilter>,
    delay: Duration,
    cancel: CancellationToken,
    tx: mpsc::Sender<LeaderboardPage>,
) {
    let total = urls.len();
    for (page_number, url) in urls {
        if cancel.is_cancelled() {
            let _ = tx
                .send(LeaderboardPage::failed(page_number, url, PageError::Cancelled))
                .await;
            continue;
        }

        log::info!("Page {page_number}/{total}: {url}");
        let fetcher = fetcher.clone();
        let filter = Arc::clone(&filter);
        let page_cancel = cancel.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let page = fetcher.fetch(page_number, url, filter, page_cancel).await;
            // The coordinator waits for every page.
            let _ = tx.send(page).await;
        });

        if page_number < total {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
