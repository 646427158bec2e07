//! Canonical price selection from a page snapshot.
//!
//! Strategies run in priority order and the first one producing a price
//! wins:
//!
//! 1. sold-out check (beats any price)
//! 2. explicit final/sale price elements
//! 3. seller price label anchor
//! 4. last emphasized amount page-wide
//! 5. configured fallback selectors
//! 6. last currency amount anywhere in the page text
//!
//! Strategies 4 and 6 reject candidates whose surrounding text marks a unit
//! price or coupon discount.

use super::price::{
    is_amount_text, is_valid_price_context, parse_price, CONTEXT_AFTER, CONTEXT_BEFORE,
    SUFFIXED_AMOUNT,
};
use super::stock::is_sold_out;
use crate::adapter::CompiledAdapter;
use crate::models::PriceResult;
use crate::page::{element_text, normalize_whitespace, Document, TextIndex};
use scraper::ElementRef;
use tracing::debug;

/// A parsed price and the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    value: u64,
    text: String,
}

impl From<Candidate> for PriceResult {
    fn from(c: Candidate) -> Self {
        PriceResult::ok(c.value, c.text)
    }
}

/// Extracts the page's canonical price.
pub fn extract_price(doc: &Document, adapter: &CompiledAdapter) -> PriceResult {
    if is_sold_out(doc, adapter) {
        return PriceResult::sold_out();
    }

    if let Some(found) = final_price(doc, adapter) {
        debug!(price = found.value, "Price from final price marker");
        return found.into();
    }

    if let Some(found) = labeled_price(doc, adapter) {
        debug!(price = found.value, "Price from seller price label");
        return found.into();
    }

    let index = doc.text_index(&adapter.emphasis);

    if let Some(found) = emphasized_price(&index, adapter) {
        debug!(price = found.value, "Price from emphasized text");
        return found.into();
    }

    if let Some(found) = selector_price(doc, adapter) {
        debug!(price = found.value, "Price from fallback selector");
        return found.into();
    }

    if let Some(found) = scanned_price(&index, adapter) {
        debug!(price = found.value, "Price from text scan");
        return found.into();
    }

    debug!("No price candidate found");
    PriceResult::fail_selector()
}

fn parsed(text: String) -> Option<Candidate> {
    parse_price(&text).map(|value| Candidate { value, text })
}

fn final_price(doc: &Document, adapter: &CompiledAdapter) -> Option<Candidate> {
    adapter
        .final_price
        .iter()
        .flat_map(|sel| doc.select(sel))
        .find_map(|el| parsed(element_text(el)))
}

fn labeled_price(doc: &Document, adapter: &CompiledAdapter) -> Option<Candidate> {
    let label = adapter.config.seller_price_label.as_deref()?.trim();
    if label.is_empty() {
        return None;
    }

    for node in doc.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if normalize_whitespace(text) != label {
            continue;
        }
        let Some(leaf) = node.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if let Some(found) =
            price_block(leaf, adapter).and_then(|block| block_price(block, leaf, label, adapter))
        {
            return Some(found);
        }
    }

    None
}

/// The block holding the price for a label: the nearest price container
/// with a prominent price inside, else the label's element or its parent.
fn price_block<'a>(leaf: ElementRef<'a>, adapter: &CompiledAdapter) -> Option<ElementRef<'a>> {
    let has_price = |el: &ElementRef<'a>| el.select(&adapter.labeled_price).next().is_some();

    let container = std::iter::once(leaf)
        .chain(leaf.ancestors().filter_map(ElementRef::wrap))
        .find(|el| adapter.price_container.matches(el) && has_price(el));
    if container.is_some() {
        return container;
    }

    if has_price(&leaf) {
        return Some(leaf);
    }
    leaf.parent().and_then(ElementRef::wrap)
}

/// First prominent price in `block` that follows the label, in document
/// order. A candidate's context is the text since the label or since the
/// previous rejected candidate.
fn block_price(
    block: ElementRef<'_>,
    leaf: ElementRef<'_>,
    label: &str,
    adapter: &CompiledAdapter,
) -> Option<Candidate> {
    let mut past_label = false;
    let mut between = String::new();

    for node in block.descendants() {
        if let Some(text) = node.value().as_text() {
            if past_label {
                between.push_str(text);
                between.push(' ');
            } else if node.parent().is_some_and(|p| p.id() == leaf.id())
                && normalize_whitespace(text) == label
            {
                past_label = true;
            }
            continue;
        }
        if !past_label {
            continue;
        }

        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if !adapter.labeled_price.matches(&el) {
            continue;
        }
        let Some(found) = parsed(element_text(el)) else {
            continue;
        };

        let before = normalize_whitespace(&between);
        let context = format!("{} {}", tail(&before, CONTEXT_BEFORE), found.text);
        if is_valid_price_context(&context, &adapter.config.coupon_labels) {
            return Some(found);
        }
        debug!(context = %context, "Skipping labeled block amount");
        between.clear();
    }

    None
}

/// Last `n` characters of `text`.
fn tail(text: &str, n: usize) -> &str {
    let skip = text.chars().count().saturating_sub(n);
    text.char_indices().nth(skip).map_or("", |(i, _)| &text[i..])
}

fn emphasized_price(index: &TextIndex, adapter: &CompiledAdapter) -> Option<Candidate> {
    let config = &adapter.config;

    index
        .spans()
        .iter()
        .filter_map(|span| {
            let text = index.span_text(*span);
            if !is_amount_text(text) {
                return None;
            }
            let context = index.context(span.start, span.end, CONTEXT_BEFORE, CONTEXT_AFTER);
            if !is_valid_price_context(&context, &config.coupon_labels) {
                debug!(context = %context, "Skipping emphasized amount");
                return None;
            }
            parsed(text.to_string())
        })
        .filter(|c| c.value >= config.min_scan_price)
        .last()
}

fn selector_price(doc: &Document, adapter: &CompiledAdapter) -> Option<Candidate> {
    adapter.price.iter().find_map(|sel| {
        let text = doc.first_text(sel)?;
        if !is_valid_price_context(&text, &adapter.config.coupon_labels) {
            return None;
        }
        parsed(text)
    })
}

fn scanned_price(index: &TextIndex, adapter: &CompiledAdapter) -> Option<Candidate> {
    let config = &adapter.config;
    let text = index.text();
    let mut seen: Vec<Candidate> = Vec::new();

    for caps in SUFFIXED_AMOUNT.captures_iter(text) {
        let (Some(whole), Some(amount)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let context = index.context(amount.start(), amount.end(), CONTEXT_BEFORE, CONTEXT_AFTER);
        if !is_valid_price_context(&context, &config.coupon_labels) {
            continue;
        }
        let Some(value) = parse_price(amount.as_str()) else {
            continue;
        };
        if value < config.min_scan_price || seen.iter().any(|c| c.value == value) {
            continue;
        }
        seen.push(Candidate { value, text: whole.as_str().to_string() });
    }

    seen.pop()
}
