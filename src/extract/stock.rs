//! Sold-out and bot-block detection.

use crate::adapter::CompiledAdapter;
use crate::page::{element_text, Document};
use serde::Serialize;
use tracing::debug;

/// Stock and block signals found on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockState {
    pub sold_out: bool,
    pub blocked: bool,
}

pub fn detect_stock_state(doc: &Document, adapter: &CompiledAdapter) -> StockState {
    StockState { sold_out: is_sold_out(doc, adapter), blocked: is_blocked(doc, adapter) }
}

/// Any sold-out marker element, or a purchase button announcing sold out.
pub fn is_sold_out(doc: &Document, adapter: &CompiledAdapter) -> bool {
    if adapter.sold_out.iter().any(|sel| doc.exists(sel)) {
        debug!("Sold-out marker element present");
        return true;
    }

    let phrases = lowercase_all(&adapter.config.sold_out.phrases);
    doc.select(&adapter.buy_button).any(|button| {
        let text = element_text(button).to_lowercase();
        let hit = contains_any(&text, &phrases);
        if hit {
            debug!(button = %text, "Purchase button reports sold out");
        }
        hit
    })
}

/// Any block indicator element, or a CAPTCHA/block phrase in the body text.
pub fn is_blocked(doc: &Document, adapter: &CompiledAdapter) -> bool {
    if adapter.block.iter().any(|sel| doc.exists(sel)) {
        debug!("Block indicator element present");
        return true;
    }

    let phrases = lowercase_all(&adapter.config.block.phrases);
    let body = doc.body_text().to_lowercase();
    contains_any(&body, &phrases)
}

fn lowercase_all(phrases: &[String]) -> Vec<String> {
    phrases.iter().filter(|p| !p.is_empty()).map(|p| p.to_lowercase()).collect()
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SiteAdapter;

    fn state(html: &str) -> StockState {
        let adapter = SiteAdapter::default().compile().unwrap();
        detect_stock_state(&Document::parse(html), &adapter)
    }

    #[test]
    fn test_in_stock_page() {
        let html = r#"<div class="prod-buy-btn">구매하기</div><strong>14,650</strong>원"#;
        assert_eq!(state(html), StockState::default());
    }

    #[test]
    fn test_sold_out_marker_element() {
        let html = r#"<div class="oos-label">일시품절</div>"#;
        assert!(state(html).sold_out);
        let html = r#"<span class="prod-soldout-badge"></span>"#;
        assert!(state(html).sold_out);
    }

    #[test]
    fn test_sold_out_button_phrase() {
        let html = r#"<button class="prod-buy-btn">일시품절</button>"#;
        assert!(state(html).sold_out);
        let html = r#"<button class="buy-button">SOLD OUT</button>"#;
        assert!(state(html).sold_out);
        let html = r#"<button class="prod-buy-btn">재입고 알림 신청</button>"#;
        assert!(state(html).sold_out);
    }

    #[test]
    fn test_sold_out_phrase_outside_button_ignored() {
        let html = r#"<p>품절 임박 상품!</p><button class="prod-buy-btn">바로구매</button>"#;
        assert!(!state(html).sold_out);
    }

    #[test]
    fn test_blocked_by_element() {
        let html = r#"<div id="px-captcha"></div>"#;
        let s = state(html);
        assert!(s.blocked);
        assert!(!s.sold_out);
    }

    #[test]
    fn test_blocked_by_phrase_case_insensitive() {
        assert!(state("<body><h1>Access Denied</h1></body>").blocked);
        assert!(state("<body><p>로봇이 아닙니다를 확인해 주세요</p></body>").blocked);
    }

    #[test]
    fn test_block_phrase_in_script_ignored() {
        let html = "<html><body><script>var access_denied = 'access denied';</script><p>상품</p></body></html>";
        assert!(!state(html).blocked);
    }
}
