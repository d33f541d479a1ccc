//! rlboard CLI
//!
//! Fetches ranked leaderboard pages and prints them, or searches them for a
//! player name.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rlboard::{
    error::Result,
    models::{Config, PageStatus, PipelineRequest, Platform, Playlist},
    pipeline::LeaderboardPipeline,
    report,
    services::RowFilter,
    source::HttpSource,
};

/// rlboard - Rocket League ranked leaderboard scraper
#[derive(Parser, Debug)]
#[command(name = "rlboard", version, about = "Rocket League ranked leaderboard scraper")]

struct Cli {
    /// Platform to search: all, steam, xbox, ps
    #[arg(short, long, default_value = "all")]
    platform: String,

    /// Playlist leaderboard: unranked, 1v1, 2v2, solo, 3v3
    #[arg(short = 'q', long, default_value = "3v3")]
    playlist: String,

    /// Number of pages to fetch
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pages: u64,

    /// Display the whole leaderboard instead of searching it
    #[arg(short, long)]
    display: bool,

    /// Regular expression matched against player names
    #[arg(short, long, default_value = "Squishy")]
    search: String,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "rlboard.toml")]
    config: PathBuf,

    /// Print pages as they arrive instead of in page order
    #[arg(long, conflicts_with = "json")]
    stream: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;
    config.validate()?;

    // Everything that can reject user input happens before the first request.
    let filter = if cli.display {
        RowFilter::DisplayAll
    } else {
        RowFilter::search(&cli.search)?
    };
    let pages = usize::try_from(cli.pages)
        .map_err(|_| rlboard::error::AppError::validation("page count is too large"))?;
    let request = PipelineRequest::new(
        &config.leaderboard.base_url,
        Platform::from_name(&cli.platform),
        Playlist::from_name(&cli.playlist),
        pages,
        filter,
    )?;

    let source = HttpSource::new(&config.crawler)?;
    let pipeline = LeaderboardPipeline::new(Arc::new(source), &config.crawler)?;

    let cancel = pipeline.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling outstanding pages");
            cancel.cancel();
        }
    });

    let result = if cli.stream {
        pipeline
            .run_with(&request, |page| {
                print!("{}", report::render_page(page, request.filter()))
            })
            .await
    } else {
        pipeline.run(&request).await
    };

    if cli.json {
        println!("{}", report::render_json(&result)?);
    } else if !cli.stream {
        print!("{}", report::render_text(&result, request.filter()));
    }

    let failed = result.failed_pages();
    if failed > 0 {
        log::warn!(
            "{failed} of {} pages failed ({} fetch, {} structure, {} cancelled)",
            result.pages.len(),
            result.pages_with(PageStatus::FetchFailed),
            result.pages_with(PageStatus::StructureFailed),
            result.pages_with(PageStatus::Cancelled)
        );
    }
    println!("{}", report::render_elapsed(result.elapsed));

    Ok(())
}
