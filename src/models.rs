//! Data model for a single page visit: price results, option groups and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one price extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// Price found and trusted
    Ok,
    /// Stock explicitly absent, price intentionally empty
    SoldOut,
    /// No strategy could locate a price
    FailSelector,
    /// Page or extraction exceeded its time budget
    Timeout,
    /// Bot or CAPTCHA signal detected
    Blocked,
}

impl StatusCode {
    /// Returns the wire name used by the uploader.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::SoldOut => "SOLD_OUT",
            StatusCode::FailSelector => "FAIL_SELECTOR",
            StatusCode::Timeout => "TIMEOUT",
            StatusCode::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page-level status: a variant status, or `Partial` for mixed outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageStatus {
    Ok,
    Partial,
    SoldOut,
    FailSelector,
    Timeout,
    Blocked,
}

impl PageStatus {
    /// Aggregates variant statuses into one page status.
    ///
    /// All `Ok` is `Ok`; some `Ok` is `Partial`; otherwise the first present of
    /// `SoldOut`, `Blocked`, `Timeout` wins, falling back to `FailSelector`.
    /// An empty slice has nothing trusted and reports `FailSelector`.
    pub fn aggregate(statuses: &[StatusCode]) -> Self {
        let ok = statuses.iter().filter(|s| **s == StatusCode::Ok).count();

        if !statuses.is_empty() && ok == statuses.len() {
            return PageStatus::Ok;
        }
        if ok > 0 {
            return PageStatus::Partial;
        }

        let has = |code: StatusCode| statuses.contains(&code);
        if has(StatusCode::SoldOut) {
            PageStatus::SoldOut
        } else if has(StatusCode::Blocked) {
            PageStatus::Blocked
        } else if has(StatusCode::Timeout) {
            PageStatus::Timeout
        } else {
            PageStatus::FailSelector
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Ok => "OK",
            PageStatus::Partial => "PARTIAL",
            PageStatus::SoldOut => "SOLD_OUT",
            PageStatus::FailSelector => "FAIL_SELECTOR",
            PageStatus::Timeout => "TIMEOUT",
            PageStatus::Blocked => "BLOCKED",
        }
    }
}

impl From<StatusCode> for PageStatus {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ok => PageStatus::Ok,
            StatusCode::SoldOut => PageStatus::SoldOut,
            StatusCode::FailSelector => PageStatus::FailSelector,
            StatusCode::Timeout => PageStatus::Timeout,
            StatusCode::Blocked => PageStatus::Blocked,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one price extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Price in whole currency units
    pub price: Option<u64>,
    pub status_code: StatusCode,
    /// Text the price was parsed from (empty when no price)
    pub raw_price_text: String,
}

impl PriceResult {
    /// A trusted price parsed from `raw`.
    pub fn ok(price: u64, raw: impl Into<String>) -> Self {
        Self { price: Some(price), status_code: StatusCode::Ok, raw_price_text: raw.into() }
    }

    /// A result without a price.
    pub fn empty(status_code: StatusCode) -> Self {
        Self { price: None, status_code, raw_price_text: String::new() }
    }

    pub fn sold_out() -> Self {
        Self::empty(StatusCode::SoldOut)
    }

    pub fn fail_selector() -> Self {
        Self::empty(StatusCode::FailSelector)
    }
}

/// One configurable option axis (e.g. weight) and its selectable labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub name: String,
    /// Labels in document order
    pub options: Vec<String>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        Self { name: name.into(), options }
    }
}

/// One label per option group, positionally aligned with the groups.
pub type Combination = Vec<String>;

/// Scrape result for one processed option combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub option_key: String,
    pub price: Option<u64>,
    pub status_code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_price_text: Option<String>,
}

impl ScrapeResult {
    /// Builds a result for `option_key` from a price extraction.
    pub fn from_price(option_key: impl Into<String>, price: PriceResult) -> Self {
        let raw = (!price.raw_price_text.is_empty()).then_some(price.raw_price_text);
        Self {
            option_key: option_key.into(),
            price: price.price,
            status_code: price.status_code,
            raw_price_text: raw,
        }
    }

    /// A priceless result for the default variant.
    pub fn default_variant(status_code: StatusCode) -> Self {
        Self {
            option_key: crate::variants::DEFAULT_OPTION_KEY.to_string(),
            price: None,
            status_code,
            raw_price_text: None,
        }
    }
}

/// Everything one page visit hands to the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageScrapeOutcome {
    pub results: Vec<ScrapeResult>,
    pub next_cursor: usize,
    pub page_status_code: PageStatus,
    pub product_name: Option<String>,
}

impl PageScrapeOutcome {
    /// Single default-variant outcome carrying `status`.
    pub fn single(status: StatusCode, next_cursor: usize, product_name: Option<String>) -> Self {
        Self {
            results: vec![ScrapeResult::default_variant(status)],
            next_cursor,
            page_status_code: status.into(),
            product_name,
        }
    }

    /// Lowest observed price across the results, if any.
    pub fn lowest_price(&self) -> Option<u64> {
        self.results.iter().filter_map(|r| r.price).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_all_ok() {
        assert_eq!(PageStatus::aggregate(&[StatusCode::Ok, StatusCode::Ok]), PageStatus::Ok);
    }

    #[test]
    fn test_aggregate_mixed_is_partial() {
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::Ok, StatusCode::SoldOut]),
            PageStatus::Partial
        );
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::FailSelector, StatusCode::Ok]),
            PageStatus::Partial
        );
    }

    #[test]
    fn test_aggregate_priority_without_ok() {
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::SoldOut, StatusCode::SoldOut]),
            PageStatus::SoldOut
        );
        assert_eq!(
            PageStatus::aggregate(&[
                StatusCode::Timeout,
                StatusCode::Blocked,
                StatusCode::SoldOut
            ]),
            PageStatus::SoldOut
        );
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::Timeout, StatusCode::Blocked]),
            PageStatus::Blocked
        );
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::FailSelector, StatusCode::Timeout]),
            PageStatus::Timeout
        );
        assert_eq!(
            PageStatus::aggregate(&[StatusCode::FailSelector]),
            PageStatus::FailSelector
        );
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(PageStatus::aggregate(&[]), PageStatus::FailSelector);
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(serde_json::to_string(&StatusCode::SoldOut).unwrap(), "\"SOLD_OUT\"");
        assert_eq!(serde_json::to_string(&PageStatus::Partial).unwrap(), "\"PARTIAL\"");
        let parsed: StatusCode = serde_json::from_str("\"FAIL_SELECTOR\"").unwrap();
        assert_eq!(parsed, StatusCode::FailSelector);
    }

    #[test]
    fn test_scrape_result_from_price() {
        let result = ScrapeResult::from_price("3kg", PriceResult::ok(14650, "14,650"));
        assert_eq!(result.price, Some(14650));
        assert_eq!(result.raw_price_text.as_deref(), Some("14,650"));

        let result = ScrapeResult::from_price("3kg", PriceResult::sold_out());
        assert_eq!(result.status_code, StatusCode::SoldOut);
        assert!(result.raw_price_text.is_none());
    }

    #[test]
    fn test_single_outcome() {
        let outcome = PageScrapeOutcome::single(StatusCode::Blocked, 4, None);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].option_key, "default");
        assert_eq!(outcome.page_status_code, PageStatus::Blocked);
        assert_eq!(outcome.next_cursor, 4);
    }

    #[test]
    fn test_lowest_price() {
        let outcome = PageScrapeOutcome {
            results: vec![
                ScrapeResult::from_price("a", PriceResult::ok(2000, "2,000")),
                ScrapeResult::from_price("b", PriceResult::sold_out()),
                ScrapeResult::from_price("c", PriceResult::ok(1500, "1,500")),
            ],
            next_cursor: 0,
            page_status_code: PageStatus::Partial,
            product_name: None,
        };
        assert_eq!(outcome.lowest_price(), Some(1500));
    }
}
