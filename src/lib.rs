//! price-watch - product price extraction and round-robin option scraping
//!
//! Extracts the trustworthy selling price from product pages, detects
//! sold-out and bot-block states, and walks option combinations in
//! batches so every variant is eventually covered.

pub mod adapter;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod models;
pub mod page;
pub mod scrape;
pub mod variants;

pub use adapter::{CompiledAdapter, SiteAdapter};
pub use config::Config;
pub use error::ScrapeError;
pub use models::{
    Combination, OptionGroup, PageScrapeOutcome, PageStatus, PriceResult, ScrapeResult, StatusCode,
};
pub use scrape::{run_jobs, OutcomeSink, PageScraper, RunSummary, ScrapeJob, ScrapeSettings};
