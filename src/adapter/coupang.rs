//! Coupang product page adapter.
//!
//! All selectors, markers and phrases for coupang.com product pages live here.
//! Update this file when Coupang changes their markup.
//!
//! **Update process**: when extraction starts returning `FAIL_SELECTOR`,
//! save the page HTML, adjust the lists below, and add a test fixture.

use super::{BlockMarkers, OptionMarkers, SiteAdapter, SoldOutMarkers};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The Coupang preset.
pub fn adapter() -> SiteAdapter {
    SiteAdapter {
        name: "coupang".to_string(),

        // 2024+ price block: final-price is the actual selling price
        final_price_selectors: strings(&[
            ".final-price-amount",
            ".final-price .price-amount",
            "[class*='final-price-amount']",
            ".sales-price-amount",
            ".sales-price .price-amount",
        ]),

        seller_price_label: Some("쿠팡판매가".to_string()),
        price_container_selector: "[class*='price']".to_string(),
        labeled_price_selector: "strong, [class*='total-price']".to_string(),
        emphasis_selector: "strong".to_string(),

        price_selectors: strings(&[
            ".price-container .final-price-amount",
            ".price-container .sales-price-amount",
            "[class*='sales-price-amount']",
            // Legacy structure with strong tags
            ".prod-sale-price .total-price strong",
            ".prod-sale-price strong",
            ".total-price strong",
            "[class*='sale-price'] strong",
            ".prod-price strong",
            "[class*='final-price'] strong",
            "[class*='finalPrice'] strong",
            ".prod-coupon-price .total-price strong",
            ".prod-origin-price strong",
            "[class*='price-value']",
            "[class*='priceValue']",
            // Rocket delivery price
            ".prod-pdd-price strong",
            ".price strong",
            "strong.price",
        ]),

        coupon_labels: strings(&["쿠폰할인", "쿠폰적용", "쿠폰"]),
        min_scan_price: 100,

        name_selectors: strings(&[
            ".prod-buy-header h1",
            ".prod-buy-header h2",
            ".prod-buy-header__title",
            "h1.prod-title",
            "[class*='product-title']",
            "[class*='productTitle']",
            "h1[class*='title']",
        ]),
        title_suffixes: strings(&["쿠팡!", "쿠팡", "Coupang"]),

        sold_out: sold_out_markers(),
        block: block_markers(),
        options: option_markers(),

        load_complete_selector: ".prod-buy-header, .prod-sale-price, .prod-price, .price-container"
            .to_string(),
    }
}

pub(super) fn sold_out_markers() -> SoldOutMarkers {
    SoldOutMarkers {
        selectors: strings(&[
            ".oos-label",
            ".out-of-stock",
            "[class*='sold-out']",
            "[class*='soldout']",
            ".prod-not-available",
        ]),
        button_selector: ".prod-buy-btn, .buy-button, [class*='purchase'], [class*='buy-btn']"
            .to_string(),
        phrases: strings(&["품절", "일시품절", "sold out", "재입고 알림"]),
    }
}

pub(super) fn block_markers() -> BlockMarkers {
    BlockMarkers {
        selectors: strings(&["[class*='captcha']", "#challenge-running", "#px-captcha"]),
        phrases: strings(&["접근이 차단", "access denied", "captcha", "로봇이 아닙니다"]),
    }
}

pub(super) fn option_markers() -> OptionMarkers {
    OptionMarkers {
        container_selector: "[class*='option']".to_string(),
        title_selector: "[class*='title'], [class*='header'], [class*='label'], h3, h4".to_string(),
        item_selector: "button, li[role='option'], [class*='option-item'], [class*='chip']"
            .to_string(),
        max_label_len: 50,
        fallback_name_prefix: "옵션".to_string(),
    }
}
