//! Page visits and the worker pool that drives them.

pub mod pool;
pub mod scraper;

pub use pool::{run_jobs, CollectingSink, OutcomeSink, RunSummary, ScrapeJob};
pub use scraper::{Inspection, PageAnalysis, PageScraper, ScrapeSettings};
