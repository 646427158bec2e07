//! Page capabilities consumed by the scraper: navigation, markup snapshots
//! and option activation.

pub mod document;
pub mod http;
pub mod static_page;

pub use document::{element_text, normalize_whitespace, Document, TextIndex, TextSpan};
pub use http::HttpNavigator;
pub use static_page::{StaticPage, StaticSite};

use crate::error::ScrapeError;
use async_trait::async_trait;

/// A loaded product page, exclusively owned by one visit.
#[async_trait]
pub trait Page: Send + Sync {
    /// Serialized markup of the page as currently rendered.
    async fn content(&self) -> Result<String, ScrapeError>;

    /// Activates the first element matching `selector` whose normalized text
    /// equals `label`. Returns `false` when no such element exists.
    async fn click_matching(&self, selector: &str, label: &str) -> Result<bool, ScrapeError>;

    /// Releases the page.
    async fn close(&self) -> Result<(), ScrapeError> {
        Ok(())
    }
}

/// Opens product pages - enables swapping transports and mocking for tests.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigates to `url` and returns the loaded page.
    async fn open(&self, url: &str) -> Result<Box<dyn Page>, ScrapeError>;
}
