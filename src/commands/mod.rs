//! CLI command implementations.

pub mod inspect;
pub mod scrape;

pub use inspect::InspectCommand;
pub use scrape::ScrapeCommand;
