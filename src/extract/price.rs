//! Korean Won price parsing and the shared candidate context filter.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Characters of surrounding text inspected before a candidate amount.
pub const CONTEXT_BEFORE: usize = 30;

/// Characters of surrounding text inspected after a candidate amount.
pub const CONTEXT_AFTER: usize = 4;

/// Per-unit prices: "100g당 993원", "100ml당 590원", "1개당 2,100원".
static UNIT_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*(?:kg|mg|ml|g|l|개|매|장|입|정|구)\s*당").unwrap());

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());

/// Text that is nothing but an amount, optionally followed by the suffix.
static AMOUNT_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d[\d,]*\s*원?$").unwrap());

/// Amount followed by the currency suffix, anywhere in running text.
pub(crate) static SUFFIXED_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,]*)\s*원").unwrap());

/// Parses a Korean Won amount out of `text`.
///
/// Returns `None` for empty text, anything containing `%`, unit prices,
/// text without digits, and zero.
pub fn parse_price(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('%') || is_unit_price(trimmed) {
        return None;
    }

    let amount = AMOUNT.find(trimmed)?;
    let digits: String = amount.as_str().chars().filter(|c| *c != ',').collect();

    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

pub fn is_unit_price(text: &str) -> bool {
    UNIT_PRICE.is_match(text)
}

/// True when `text` is a bare amount such as "14,650" or "14,650 원".
pub fn is_amount_text(text: &str) -> bool {
    AMOUNT_ONLY.is_match(text.trim())
}

/// Rejects candidates whose surrounding text marks a unit price or a
/// coupon discount.
pub fn is_valid_price_context<S: AsRef<str>>(context: &str, coupon_labels: &[S]) -> bool {
    if is_unit_price(context) {
        return false;
    }
    !coupon_labels.iter().any(|label| {
        let label = label.as_ref();
        !label.is_empty() && context.contains(label)
    })
}
