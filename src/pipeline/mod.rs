//! Pipeline entry points.
//!
//! - `LeaderboardPipeline`: fetch every requested page and merge them in order

pub mod leaderboard;

pub use leaderboard::LeaderboardPipeline;
