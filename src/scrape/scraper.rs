//! Page visit state machine.
//!
//! One visit runs block check, sold-out check, option detection, then either
//! a single extraction or this run's slice of option combinations. Every
//! failure is downgraded to a status-coded outcome; nothing escapes as an
//! error.

use crate::adapter::CompiledAdapter;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::{
    detect_option_groups, detect_stock_state, extract_price, extract_product_name, StockState,
};
use crate::models::{OptionGroup, PageScrapeOutcome, PageStatus, PriceResult, ScrapeResult, StatusCode};
use crate::page::{Document, Navigator, Page};
use crate::variants::{
    build_option_key, combination_count, plan_run, RoundRobinCursor, DEFAULT_OPTION_KEY,
};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How often the page is re-read while waiting for it to finish loading.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Timing and batching for page visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSettings {
    /// Page visits running at once
    pub concurrency: usize,
    /// Budget for a whole visit, variants included
    pub page_timeout: Duration,
    pub variants_per_run: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub load_wait: Duration,
    pub post_load_settle: Duration,
    pub option_click_delay: Duration,
    pub settle_min: Duration,
    pub settle_max: Duration,
}

impl From<&Config> for ScrapeSettings {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            page_timeout: config.page_timeout(),
            variants_per_run: config.variants_per_run,
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            load_wait: Duration::from_millis(config.load_wait_ms),
            post_load_settle: Duration::from_millis(config.post_load_settle_ms),
            option_click_delay: Duration::from_millis(config.option_click_delay_ms),
            settle_min: Duration::from_millis(config.settle_min_ms),
            settle_max: Duration::from_millis(config.settle_max_ms),
        }
    }
}

impl ScrapeSettings {
    /// Settings with every wait and pause set to zero.
    pub fn no_delay(page_timeout: Duration, variants_per_run: usize) -> Self {
        Self {
            concurrency: 1,
            page_timeout,
            variants_per_run,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            load_wait: Duration::ZERO,
            post_load_settle: Duration::ZERO,
            option_click_delay: Duration::ZERO,
            settle_min: Duration::ZERO,
            settle_max: Duration::ZERO,
        }
    }
}

/// Everything learned from one markup snapshot.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    pub stock: StockState,
    pub product_name: Option<String>,
    pub groups: Vec<OptionGroup>,
    pub price: PriceResult,
}

/// Offline dry run of one visit: what would be found and which variants
/// this run would cover.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub stock: StockState,
    pub product_name: Option<String>,
    pub price: PriceResult,
    pub groups: Vec<OptionGroup>,
    pub combinations: usize,
    pub runs_per_cycle: usize,
    pub cursor: usize,
    /// Option keys this run would visit, in order
    pub variants: Vec<String>,
    pub next_cursor: usize,
}

/// Runs page visits against one site adapter.
pub struct PageScraper {
    adapter: CompiledAdapter,
    settings: ScrapeSettings,
}

impl PageScraper {
    pub fn new(adapter: CompiledAdapter, settings: ScrapeSettings) -> Self {
        Self { adapter, settings }
    }

    pub fn adapter(&self) -> &CompiledAdapter {
        &self.adapter
    }

    pub fn settings(&self) -> &ScrapeSettings {
        &self.settings
    }

    /// Runs the whole detection stack over one snapshot.
    pub fn analyze(&self, markup: &str) -> PageAnalysis {
        let doc = Document::parse(markup);
        PageAnalysis {
            stock: detect_stock_state(&doc, &self.adapter),
            product_name: extract_product_name(&doc, &self.adapter),
            groups: detect_option_groups(&doc, &self.adapter),
            price: extract_price(&doc, &self.adapter),
        }
    }

    /// Analyzes `markup` and plans the variant slice for `cursor` without
    /// touching a live page.
    pub fn inspect(&self, markup: &str, cursor: usize) -> Inspection {
        let analysis = self.analyze(markup);
        let combinations =
            if analysis.groups.is_empty() { 0 } else { combination_count(&analysis.groups) };
        let slice = plan_run(&analysis.groups, cursor, self.settings.variants_per_run);

        Inspection {
            stock: analysis.stock,
            product_name: analysis.product_name,
            price: analysis.price,
            runs_per_cycle: RoundRobinCursor::runs_per_cycle(combinations, self.settings.variants_per_run),
            groups: analysis.groups,
            combinations,
            cursor,
            variants: slice.variants.iter().map(|labels| build_option_key(labels)).collect(),
            next_cursor: slice.next_cursor,
        }
    }

    fn extract(&self, markup: &str) -> PriceResult {
        extract_price(&Document::parse(markup), &self.adapter)
    }

    fn is_loaded(&self, markup: &str) -> bool {
        Document::parse(markup).exists(&self.adapter.load_complete)
    }

    /// Visits `url` resuming from `cursor`.
    ///
    /// Returns `None` only when `cancel` fired before any result was
    /// produced.
    pub async fn scrape(
        &self,
        navigator: &dyn Navigator,
        url: &str,
        cursor: usize,
        cancel: &CancellationToken,
    ) -> Option<PageScrapeOutcome> {
        if cancel.is_cancelled() {
            return None;
        }

        let deadline = Instant::now() + self.settings.page_timeout;
        info!(url, cursor, "Visiting page");

        let page = match timeout_at(deadline, navigator.open(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(err)) => return Some(self.failure(url, err, cursor)),
            Err(_) => return Some(self.failure(url, self.timed_out(), cursor)),
        };

        let visit = timeout_at(deadline, self.visit(page.as_ref(), cursor, deadline, cancel)).await;

        if let Err(err) = page.close().await {
            debug!(url, error = %err, "Failed to close page");
        }

        match visit {
            Ok(Ok(outcome)) => {
                if let Some(outcome) = &outcome {
                    info!(
                        url,
                        status = %outcome.page_status_code,
                        variants = outcome.results.len(),
                        next_cursor = outcome.next_cursor,
                        "Page visit finished"
                    );
                }
                outcome
            }
            Ok(Err(err)) => Some(self.failure(url, err, cursor)),
            Err(_) => Some(self.failure(url, self.timed_out(), cursor)),
        }
    }

    async fn visit(
        &self,
        page: &dyn Page,
        cursor: usize,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<Option<PageScrapeOutcome>, ScrapeError> {
        let markup = self.wait_for_content(page, deadline).await?;
        let analysis = self.analyze(&markup);

        if analysis.stock.blocked {
            warn!("Block page detected");
            return Ok(Some(PageScrapeOutcome::single(StatusCode::Blocked, cursor, None)));
        }

        if analysis.stock.sold_out {
            debug!("Product is sold out");
            return Ok(Some(PageScrapeOutcome::single(StatusCode::SoldOut, 0, analysis.product_name)));
        }

        if analysis.groups.is_empty() {
            let status = analysis.price.status_code;
            return Ok(Some(PageScrapeOutcome {
                results: vec![ScrapeResult::from_price(DEFAULT_OPTION_KEY, analysis.price)],
                next_cursor: 0,
                page_status_code: status.into(),
                product_name: analysis.product_name,
            }));
        }

        let total = combination_count(&analysis.groups);
        let slice = plan_run(&analysis.groups, cursor, self.settings.variants_per_run);
        info!(
            groups = analysis.groups.len(),
            combinations = total,
            variants = slice.variants.len(),
            cursor,
            next_cursor = slice.next_cursor,
            "Iterating option combinations"
        );

        let mut results = Vec::with_capacity(slice.variants.len());
        for labels in &slice.variants {
            if cancel.is_cancelled() {
                info!(done = results.len(), "Run cancelled, abandoning remaining variants");
                break;
            }

            let option_key = build_option_key(labels);
            let result = match self.scrape_variant(page, labels, deadline).await {
                Ok(price) => ScrapeResult::from_price(option_key, price),
                Err(err) if err.is_timeout() => return Err(err),
                Err(err) => {
                    warn!(variant = %option_key, error = %err, "Variant extraction failed");
                    ScrapeResult::from_price(option_key, PriceResult::fail_selector())
                }
            };
            debug!(variant = %result.option_key, price = ?result.price, status = %result.status_code, "Variant scraped");
            results.push(result);
        }

        if results.is_empty() {
            return Ok(None);
        }

        let next_cursor = if results.len() == slice.variants.len() {
            slice.next_cursor
        } else {
            RoundRobinCursor::new(cursor).advance(results.len(), total).get()
        };
        let statuses: Vec<StatusCode> = results.iter().map(|r| r.status_code).collect();

        Ok(Some(PageScrapeOutcome {
            results,
            next_cursor,
            page_status_code: PageStatus::aggregate(&statuses),
            product_name: analysis.product_name,
        }))
    }

    /// Selects each label in turn, lets the price re-render, then extracts.
    async fn scrape_variant(
        &self,
        page: &dyn Page,
        labels: &[String],
        deadline: Instant,
    ) -> Result<PriceResult, ScrapeError> {
        let item_selector = self.adapter.option_item_selector();

        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                pause(self.settings.option_click_delay, deadline).await;
            }
            if !page.click_matching(item_selector, label).await? {
                debug!(label = %label, "Option element not found, skipping");
            }
        }

        pause(random_between(self.settings.settle_min, self.settings.settle_max), deadline).await;

        let markup = page.content().await?;
        Ok(self.extract(&markup))
    }

    /// Polls until the load-complete marker shows up or the load wait runs
    /// out, then settles and returns a fresh snapshot.
    async fn wait_for_content(&self, page: &dyn Page, deadline: Instant) -> Result<String, ScrapeError> {
        let wait_until = (Instant::now() + self.settings.load_wait).min(deadline);

        loop {
            let markup = page.content().await?;
            if self.is_loaded(&markup) {
                break;
            }
            let now = Instant::now();
            if now >= wait_until {
                debug!("Load-complete marker not found, continuing");
                break;
            }
            sleep(LOAD_POLL_INTERVAL.min(wait_until - now)).await;
        }

        pause(self.settings.post_load_settle, deadline).await;
        page.content().await
    }

    fn timed_out(&self) -> ScrapeError {
        ScrapeError::Timeout { elapsed_ms: self.settings.page_timeout.as_millis() as u64 }
    }

    fn failure(&self, url: &str, err: ScrapeError, cursor: usize) -> PageScrapeOutcome {
        let status = if err.is_timeout() { StatusCode::Timeout } else { StatusCode::FailSelector };
        warn!(url, error = %err, status = %status, "Page visit failed");
        PageScrapeOutcome::single(status, cursor, None)
    }
}

/// Sleeps for `duration`, cut short so it never runs past `deadline`.
async fn pause(duration: Duration, deadline: Instant) {
    let remaining = deadline.saturating_duration_since(Instant::now());
    let duration = duration.min(remaining);
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

/// Uniformly random duration in `min..=max` (millisecond resolution).
pub(crate) fn random_between(min: Duration, max: Duration) -> Duration {
    let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
    if hi <= lo {
        return min;
    }
    Duration::from_millis(rand::rng().random_range(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SiteAdapter;
    use crate::page::{StaticPage, StaticSite};
    use async_trait::async_trait;

    const URL: &str = "https://www.coupang.com/vp/products/1";

    const OPTION_PAGE: &str = r#"
        <div class="prod-buy-header"><h1>곰곰 쌀</h1></div>
        <div class="option-weight"><h4>중량</h4><button>1kg</button><button>3kg</button></div>
        <div class="option-count"><h4>수량</h4><button>1개</button><button>2개</button></div>
        <div class="prod-price"><strong>9,900</strong>원</div>
    "#;

    fn priced(price: &str) -> String {
        format!(r#"<div class="prod-buy-header"><h1>곰곰 쌀</h1></div><div class="prod-price"><strong>{price}</strong>원</div>"#)
    }

    fn scraper(batch: usize) -> PageScraper {
        let adapter = SiteAdapter::default().compile().unwrap();
        PageScraper::new(adapter, ScrapeSettings::no_delay(Duration::from_secs(5), batch))
    }

    fn option_site() -> StaticSite {
        let page = StaticPage::new(OPTION_PAGE)
            .with_render(&["1kg", "1개"], priced("10,000"))
            .with_render(&["1kg", "2개"], priced("19,000"))
            .with_render(&["3kg", "1개"], priced("25,000"))
            .with_render(&["3kg", "2개"], priced("48,000"));
        StaticSite::new().with_page(URL, page)
    }

    async fn run(scraper: &PageScraper, site: &StaticSite, cursor: usize) -> PageScrapeOutcome {
        scraper.scrape(site, URL, cursor, &CancellationToken::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_no_options_single_default() {
        let site = StaticSite::new().with_page(URL, StaticPage::new(priced("14,650")));
        let outcome = run(&scraper(15), &site, 3).await;

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].option_key, "default");
        assert_eq!(outcome.results[0].price, Some(14650));
        assert_eq!(outcome.next_cursor, 0);
        assert_eq!(outcome.page_status_code, PageStatus::Ok);
        assert_eq!(outcome.product_name.as_deref(), Some("곰곰 쌀"));
    }

    #[tokio::test]
    async fn test_no_price_is_fail_selector() {
        let site = StaticSite::new().with_page(URL, StaticPage::new("<div>가격 정보 없음</div>"));
        let outcome = run(&scraper(15), &site, 0).await;
        assert_eq!(outcome.page_status_code, PageStatus::FailSelector);
        assert_eq!(outcome.results[0].price, None);
    }

    #[tokio::test]
    async fn test_all_variants_in_one_run() {
        let outcome = run(&scraper(15), &option_site(), 0).await;

        let keys: Vec<&str> = outcome.results.iter().map(|r| r.option_key.as_str()).collect();
        assert_eq!(keys, vec!["1kg / 1개", "1kg / 2개", "3kg / 1개", "3kg / 2개"]);
        let prices: Vec<Option<u64>> = outcome.results.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![Some(10000), Some(19000), Some(25000), Some(48000)]);
        assert_eq!(outcome.next_cursor, 0);
        assert_eq!(outcome.page_status_code, PageStatus::Ok);
        assert_eq!(outcome.lowest_price(), Some(10000));
    }

    #[tokio::test]
    async fn test_batch_resumes_from_cursor() {
        let scraper = scraper(3);
        let site = option_site();

        let first = run(&scraper, &site, 2).await;
        let keys: Vec<&str> = first.results.iter().map(|r| r.option_key.as_str()).collect();
        assert_eq!(keys, vec!["3kg / 1개", "3kg / 2개", "1kg / 1개"]);
        assert_eq!(first.next_cursor, 1);

        let second = run(&scraper, &site, first.next_cursor).await;
        assert_eq!(second.results[0].option_key, "1kg / 2개");
        assert_eq!(second.next_cursor, 0);
    }

    #[tokio::test]
    async fn test_missing_option_label_skipped() {
        // Second group's labels vanish once the first option is selected
        let page = StaticPage::new(OPTION_PAGE)
            .with_render(&["1kg"], priced("10,000"))
            .with_render(&["3kg"], priced("25,000"));
        let site = StaticSite::new().with_page(URL, page);

        let outcome = run(&scraper(2), &site, 0).await;
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].option_key, "1kg / 1개");
        assert_eq!(outcome.results[0].price, Some(10000));
        assert_eq!(outcome.page_status_code, PageStatus::Ok);
    }

    #[tokio::test]
    async fn test_mixed_variant_statuses_partial() {
        let page = StaticPage::new(OPTION_PAGE)
            .with_render(&["1kg", "1개"], priced("10,000"))
            .with_render(&["1kg", "2개"], r#"<button class="prod-buy-btn">일시품절</button>"#);
        let site = StaticSite::new().with_page(URL, page);

        let outcome = run(&scraper(2), &site, 0).await;
        assert_eq!(outcome.results[1].status_code, StatusCode::SoldOut);
        assert_eq!(outcome.page_status_code, PageStatus::Partial);
    }

    #[tokio::test]
    async fn test_blocked_keeps_cursor() {
        let html = r#"<div class="prod-buy-header"><h1>곰곰 쌀</h1></div><div id="px-captcha"></div><strong>9,900</strong>원"#;
        let site = StaticSite::new().with_page(URL, StaticPage::new(html));

        let outcome = run(&scraper(15), &site, 7).await;
        assert_eq!(outcome.page_status_code, PageStatus::Blocked);
        assert_eq!(outcome.results[0].status_code, StatusCode::Blocked);
        assert_eq!(outcome.results[0].price, None);
        assert_eq!(outcome.next_cursor, 7);
        assert!(outcome.product_name.is_none());
    }

    #[tokio::test]
    async fn test_sold_out_resets_cursor() {
        let html = r#"<div class="prod-buy-header"><h1>곰곰 쌀</h1></div><div class="oos-label">품절</div>"#;
        let site = StaticSite::new().with_page(URL, StaticPage::new(html));

        let outcome = run(&scraper(15), &site, 7).await;
        assert_eq!(outcome.page_status_code, PageStatus::SoldOut);
        assert_eq!(outcome.next_cursor, 0);
        assert_eq!(outcome.product_name.as_deref(), Some("곰곰 쌀"));
    }

    #[tokio::test]
    async fn test_navigation_error_is_fail_selector() {
        let outcome = run(&scraper(15), &StaticSite::new(), 5).await;
        assert_eq!(outcome.page_status_code, PageStatus::FailSelector);
        assert_eq!(outcome.results[0].option_key, "default");
        assert_eq!(outcome.next_cursor, 5);
    }

    struct SlowNavigator;

    #[async_trait]
    impl Navigator for SlowNavigator {
        async fn open(&self, _url: &str) -> Result<Box<dyn Page>, ScrapeError> {
            sleep(Duration::from_secs(60)).await;
            Ok(Box::new(StaticPage::new("")))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_cursor() {
        let adapter = SiteAdapter::default().compile().unwrap();
        let scraper = PageScraper::new(adapter, ScrapeSettings::no_delay(Duration::from_secs(20), 15));

        let outcome = scraper.scrape(&SlowNavigator, URL, 4, &CancellationToken::new()).await.unwrap();
        assert_eq!(outcome.page_status_code, PageStatus::Timeout);
        assert_eq!(outcome.results[0].status_code, StatusCode::Timeout);
        assert_eq!(outcome.next_cursor, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_bounded_by_page_timeout() {
        let adapter = SiteAdapter::default().compile().unwrap();
        let settings = ScrapeSettings {
            settle_min: Duration::from_secs(30),
            settle_max: Duration::from_secs(30),
            ..ScrapeSettings::no_delay(Duration::from_secs(20), 15)
        };
        let scraper = PageScraper::new(adapter, settings);

        let started = Instant::now();
        let outcome = run(&scraper, &option_site(), 0).await;
        assert!(!outcome.results.is_empty());
        assert!(started.elapsed() <= Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_cancelled_before_visit() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(scraper(15).scrape(&option_site(), URL, 0, &cancel).await.is_none());
    }

    /// Cancels the run as soon as the first variant's snapshot is taken.
    struct CancellingPage {
        inner: StaticPage,
        cancel: CancellationToken,
        reads: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Page for CancellingPage {
        async fn content(&self) -> Result<String, ScrapeError> {
            // Two reads during load, the third is the first variant
            if self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 2 {
                self.cancel.cancel();
            }
            self.inner.content().await
        }

        async fn click_matching(&self, selector: &str, label: &str) -> Result<bool, ScrapeError> {
            self.inner.click_matching(selector, label).await
        }
    }

    struct CancellingSite(CancellationToken);

    #[async_trait]
    impl Navigator for CancellingSite {
        async fn open(&self, _url: &str) -> Result<Box<dyn Page>, ScrapeError> {
            let inner = StaticPage::new(OPTION_PAGE).with_render(&["1kg", "1개"], priced("10,000"));
            Ok(Box::new(CancellingPage { inner, cancel: self.0.clone(), reads: Default::default() }))
        }
    }

    #[tokio::test]
    async fn test_cancel_mid_visit_keeps_done_variants() {
        let cancel = CancellationToken::new();
        let outcome = scraper(4).scrape(&CancellingSite(cancel.clone()), URL, 1, &cancel).await.unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].option_key, "1kg / 2개");
        // Advanced by exactly the one finished variant
        assert_eq!(outcome.next_cursor, 2);
    }

    #[test]
    fn test_inspect_plans_slice() {
        let inspection = scraper(3).inspect(OPTION_PAGE, 2);

        assert_eq!(inspection.groups.len(), 2);
        assert_eq!(inspection.combinations, 4);
        assert_eq!(inspection.runs_per_cycle, 2);
        assert_eq!(inspection.variants, vec!["3kg / 1개", "3kg / 2개", "1kg / 1개"]);
        assert_eq!(inspection.next_cursor, 1);
        assert_eq!(inspection.price.price, Some(9900));
        assert_eq!(inspection.product_name.as_deref(), Some("곰곰 쌀"));
    }

    /// Eight option groups of twenty labels each: 20^8 combinations.
    fn wide_option_page() -> String {
        let groups: String = (0..8)
            .map(|g| {
                let buttons: String = (0..20).map(|i| format!("<button>g{g}-{i}</button>")).collect();
                format!(r#"<div class="option-{g}"><h4>옵션{g}</h4>{buttons}</div>"#)
            })
            .collect();
        format!("{}{groups}", priced("9,900"))
    }

    #[test]
    fn test_inspect_wide_page_plans_only_batch() {
        let inspection = scraper(3).inspect(&wide_option_page(), 0);

        assert_eq!(inspection.groups.len(), 8);
        assert_eq!(inspection.combinations, 25_600_000_000);
        assert_eq!(inspection.variants.len(), 3);
        assert!(inspection.variants[2].ends_with("g7-2"));
        assert_eq!(inspection.next_cursor, 3);
    }

    #[tokio::test]
    async fn test_visit_wide_page_scrapes_batch() {
        let site = StaticSite::new().with_page("https://shop/wide", StaticPage::new(wide_option_page()));
        let outcome = scraper(2)
            .scrape(&site, "https://shop/wide", 0, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.next_cursor, 2);
        assert_eq!(outcome.page_status_code, PageStatus::Ok);
    }

    #[test]
    fn test_inspect_without_options() {
        let inspection = scraper(3).inspect(&priced("14,650"), 5);
        assert_eq!(inspection.combinations, 0);
        assert_eq!(inspection.variants, vec!["default"]);
        assert_eq!(inspection.next_cursor, 0);
        assert_eq!(inspection.runs_per_cycle, 1);
    }

    #[test]
    fn test_random_between_bounds() {
        let min = Duration::from_millis(300);
        let max = Duration::from_millis(800);
        for _ in 0..100 {
            let d = random_between(min, max);
            assert!(d >= min && d <= max);
        }
        assert_eq!(random_between(max, min), max);
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ScrapeSettings::from(&Config::default());
        assert_eq!(settings.page_timeout, Duration::from_secs(20));
        assert_eq!(settings.variants_per_run, 15);
        assert_eq!(settings.settle_min, Duration::from_millis(300));
        assert_eq!(settings.concurrency, 3);
    }
}
