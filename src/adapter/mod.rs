//! Site adapter: every site-specific selector, marker and phrase the
//! extraction logic consults.
//!
//! Extraction, detection and combination code only ever sees a
//! [`CompiledAdapter`]; swapping sites means swapping this configuration.

pub mod coupang;

use crate::error::ScrapeError;
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Site-specific configuration, deserializable from a TOML `[adapter]` table.
///
/// Missing fields fall back to the Coupang preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAdapter {
    /// Adapter name (e.g. "coupang")
    pub name: String,

    /// Explicit final/sale price elements, highest priority first
    pub final_price_selectors: Vec<String>,

    /// Text of the seller's own price label (e.g. "쿠팡판매가")
    pub seller_price_label: Option<String>,

    /// Marker for the block that contains a labeled price
    pub price_container_selector: String,

    /// Prominent price element inside a labeled price block
    pub labeled_price_selector: String,

    /// Visually emphasized price text (site convention: bold/strong)
    pub emphasis_selector: String,

    /// Fallback price selectors, highest priority first
    pub price_selectors: Vec<String>,

    /// Labels marking coupon discount amounts
    pub coupon_labels: Vec<String>,

    /// Smallest amount accepted by the page-wide scan strategies
    pub min_scan_price: u64,

    /// Product name selectors, highest priority first
    pub name_selectors: Vec<String>,

    /// Suffixes stripped from the document title when used as product name
    pub title_suffixes: Vec<String>,

    pub sold_out: SoldOutMarkers,

    pub block: BlockMarkers,

    pub options: OptionMarkers,

    /// Present once the product page has rendered
    pub load_complete_selector: String,
}

/// Sold-out detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoldOutMarkers {
    /// Elements whose presence alone means sold out
    pub selectors: Vec<String>,
    /// Purchase button(s) whose text is checked for phrases
    pub button_selector: String,
    /// Case-insensitive phrases in the purchase button text
    pub phrases: Vec<String>,
}

/// Bot-block / CAPTCHA detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMarkers {
    pub selectors: Vec<String>,
    /// Case-insensitive phrases in the page body text
    pub phrases: Vec<String>,
}

/// Option group detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionMarkers {
    pub container_selector: String,
    pub title_selector: String,
    pub item_selector: String,
    /// Longest accepted option label, in characters
    pub max_label_len: usize,
    /// Prefix for groups without a title ("옵션" gives "옵션1", "옵션2", ...)
    pub fallback_name_prefix: String,
}

impl Default for SiteAdapter {
    fn default() -> Self {
        coupang::adapter()
    }
}

impl Default for SoldOutMarkers {
    fn default() -> Self {
        coupang::sold_out_markers()
    }
}

impl Default for BlockMarkers {
    fn default() -> Self {
        coupang::block_markers()
    }
}

impl Default for OptionMarkers {
    fn default() -> Self {
        coupang::option_markers()
    }
}

impl SiteAdapter {
    /// Compiles every selector, failing on the first invalid one.
    pub fn compile(&self) -> Result<CompiledAdapter, ScrapeError> {
        CompiledAdapter::new(self)
    }
}

/// A [`SiteAdapter`] with its selectors parsed.
#[derive(Debug, Clone)]
pub struct CompiledAdapter {
    pub config: SiteAdapter,
    pub final_price: Vec<Selector>,
    pub price_container: Selector,
    pub labeled_price: Selector,
    pub emphasis: Selector,
    pub price: Vec<Selector>,
    pub names: Vec<Selector>,
    pub sold_out: Vec<Selector>,
    pub buy_button: Selector,
    pub block: Vec<Selector>,
    pub option_container: Selector,
    pub option_title: Selector,
    pub option_item: Selector,
    pub load_complete: Selector,
}

impl CompiledAdapter {
    pub fn new(config: &SiteAdapter) -> Result<Self, ScrapeError> {
        Ok(Self {
            final_price: parse_all(&config.final_price_selectors)?,
            price_container: parse(&config.price_container_selector)?,
            labeled_price: parse(&config.labeled_price_selector)?,
            emphasis: parse(&config.emphasis_selector)?,
            price: parse_all(&config.price_selectors)?,
            names: parse_all(&config.name_selectors)?,
            sold_out: parse_all(&config.sold_out.selectors)?,
            buy_button: parse(&config.sold_out.button_selector)?,
            block: parse_all(&config.block.selectors)?,
            option_container: parse(&config.options.container_selector)?,
            option_title: parse(&config.options.title_selector)?,
            option_item: parse(&config.options.item_selector)?,
            load_complete: parse(&config.load_complete_selector)?,
            config: config.clone(),
        })
    }

    /// Item selector source text, as handed to live pages for clicking.
    pub fn option_item_selector(&self) -> &str {
        &self.config.options.item_selector
    }
}

fn parse(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn parse_all(selectors: &[String]) -> Result<Vec<Selector>, ScrapeError> {
    selectors.iter().map(|s| parse(s)).collect()
}
