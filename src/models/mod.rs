// src/models/mod.rs

//! Domain models for the leaderboard scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod leaderboard;
mod request;

// Re-export all public types
pub use config::{Config, CrawlerConfig, LeaderboardConfig};
pub use leaderboard::{LeaderboardPage, LeaderboardRow, PageStatus, PipelineResult};
pub use request::{PipelineRequest, Platform, Playlist};
