// src/lib.rs

//! Ranked leaderboard scraper library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod services;
pub mod source;
pub mod utils;
