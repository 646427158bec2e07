//! Bounded worker pool over scrape jobs.

use super::scraper::{random_between, PageScraper};
use crate::models::PageScrapeOutcome;
use crate::page::Navigator;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One item to visit, with the cursor persisted from its previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub item_id: String,
    pub url: String,
    pub cursor: usize,
}

impl ScrapeJob {
    pub fn new(item_id: impl Into<String>, url: impl Into<String>, cursor: usize) -> Self {
        Self { item_id: item_id.into(), url: url.into(), cursor }
    }
}

/// Receives each visit's outcome as soon as it completes (the uploader hook).
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    async fn deliver(&self, job: &ScrapeJob, outcome: &PageScrapeOutcome) -> Result<()>;
}

/// Keeps every delivered outcome in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    outcomes: Mutex<Vec<(ScrapeJob, PageScrapeOutcome)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered outcomes, in completion order.
    pub fn into_outcomes(self) -> Vec<(ScrapeJob, PageScrapeOutcome)> {
        self.outcomes.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OutcomeSink for CollectingSink {
    async fn deliver(&self, job: &ScrapeJob, outcome: &PageScrapeOutcome) -> Result<()> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((job.clone(), outcome.clone()));
        Ok(())
    }
}

/// Totals for one pass over a job list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Outcomes delivered
    pub success: usize,
    /// Outcomes the sink rejected
    pub failed: usize,
    /// Jobs skipped or abandoned because the run was stopped
    pub cancelled: usize,
    pub total: usize,
    pub duration: Duration,
}

enum JobStatus {
    Delivered,
    Failed,
    Cancelled,
}

/// Visits every job with at most `settings().concurrency` visits in flight.
///
/// Once `cancel` fires no new visit starts; visits already running stop
/// before their next variant and still deliver what they finished.
pub async fn run_jobs(
    scraper: &PageScraper,
    navigator: &dyn Navigator,
    jobs: Vec<ScrapeJob>,
    sink: &dyn OutcomeSink,
    cancel: &CancellationToken,
) -> RunSummary {
    let started = Instant::now();
    let total = jobs.len();
    let concurrency = scraper.settings().concurrency.max(1);
    info!(jobs = total, concurrency, "Starting scrape run");

    let statuses: Vec<JobStatus> = stream::iter(jobs)
        .map(|job| run_job(scraper, navigator, job, sink, cancel))
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut summary = RunSummary { total, ..RunSummary::default() };
    for status in statuses {
        match status {
            JobStatus::Delivered => summary.success += 1,
            JobStatus::Failed => summary.failed += 1,
            JobStatus::Cancelled => summary.cancelled += 1,
        }
    }
    summary.duration = started.elapsed();

    info!(
        success = summary.success,
        failed = summary.failed,
        cancelled = summary.cancelled,
        elapsed_ms = summary.duration.as_millis() as u64,
        "Scrape run finished"
    );
    summary
}

async fn run_job(
    scraper: &PageScraper,
    navigator: &dyn Navigator,
    job: ScrapeJob,
    sink: &dyn OutcomeSink,
    cancel: &CancellationToken,
) -> JobStatus {
    let settings = scraper.settings();
    let delay = random_between(settings.min_delay, settings.max_delay);

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(item = %job.item_id, "Run cancelled before visit");
            return JobStatus::Cancelled;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    let Some(outcome) = scraper.scrape(navigator, &job.url, job.cursor, cancel).await else {
        return JobStatus::Cancelled;
    };

    match sink.deliver(&job, &outcome).await {
        Ok(()) => JobStatus::Delivered,
        Err(err) => {
            warn!(item = %job.item_id, error = %err, "Failed to deliver outcome");
            JobStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SiteAdapter;
    use crate::models::PageStatus;
    use crate::page::{StaticPage, StaticSite};
    use crate::scrape::ScrapeSettings;
    use tokio_test::{assert_err, assert_ok};

    fn scraper(concurrency: usize) -> PageScraper {
        let adapter = SiteAdapter::default().compile().unwrap();
        let settings = ScrapeSettings { concurrency, ..ScrapeSettings::no_delay(Duration::from_secs(5), 15) };
        PageScraper::new(adapter, settings)
    }

    fn site(count: usize) -> StaticSite {
        (0..count).fold(StaticSite::new(), |site, i| {
            let html = format!(r#"<div class="prod-price"><strong>{},000</strong>원</div>"#, 10 + i);
            site.with_page(format!("https://shop/{i}"), StaticPage::new(html))
        })
    }

    fn jobs(count: usize) -> Vec<ScrapeJob> {
        (0..count).map(|i| ScrapeJob::new(format!("item-{i}"), format!("https://shop/{i}"), 0)).collect()
    }

    #[tokio::test]
    async fn test_all_jobs_delivered() {
        let sink = CollectingSink::new();
        let summary = run_jobs(&scraper(3), &site(5), jobs(5), &sink, &CancellationToken::new()).await;

        assert_eq!(summary.total, 5);
        assert_eq!(summary.success, 5);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.cancelled, 0);

        let mut outcomes = sink.into_outcomes();
        outcomes.sort_by(|a, b| a.0.item_id.cmp(&b.0.item_id));
        assert_eq!(outcomes[0].1.lowest_price(), Some(10_000));
        assert_eq!(outcomes[4].1.lowest_price(), Some(14_000));
    }

    #[tokio::test]
    async fn test_failed_page_still_delivered() {
        let sink = CollectingSink::new();
        let mut all = jobs(2);
        all.push(ScrapeJob::new("missing", "https://shop/missing", 3));

        let summary = run_jobs(&scraper(2), &site(2), all, &sink, &CancellationToken::new()).await;
        assert_eq!(summary.success, 3);

        let outcomes = sink.into_outcomes();
        let (_, missing) = outcomes.iter().find(|(job, _)| job.item_id == "missing").unwrap();
        assert_eq!(missing.page_status_code, PageStatus::FailSelector);
        assert_eq!(missing.next_cursor, 3);
    }

    struct RejectingSink;

    #[async_trait]
    impl OutcomeSink for RejectingSink {
        async fn deliver(&self, job: &ScrapeJob, _outcome: &PageScrapeOutcome) -> Result<()> {
            anyhow::bail!("upload rejected for {}", job.item_id)
        }
    }

    #[tokio::test]
    async fn test_sink_errors_count_as_failed() {
        let summary = run_jobs(&scraper(2), &site(3), jobs(3), &RejectingSink, &CancellationToken::new()).await;
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.success, 0);
    }

    #[tokio::test]
    async fn test_cancelled_run_starts_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let sink = CollectingSink::new();
        let summary = run_jobs(&scraper(2), &site(4), jobs(4), &sink, &cancel).await;

        assert_eq!(summary.cancelled, 4);
        assert!(sink.into_outcomes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_pacing_delay() {
        let adapter = SiteAdapter::default().compile().unwrap();
        let settings = ScrapeSettings {
            min_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(10),
            ..ScrapeSettings::no_delay(Duration::from_secs(5), 15)
        };
        let scraper = PageScraper::new(adapter, settings);

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            stopper.cancel();
        });

        let sink = CollectingSink::new();
        let summary = run_jobs(&scraper, &site(2), jobs(2), &sink, &cancel).await;
        assert_eq!(summary.cancelled, 2);
    }

    #[tokio::test]
    async fn test_collecting_sink() {
        let sink = CollectingSink::new();
        let job = ScrapeJob::new("a", "https://shop/a", 0);
        let outcome = PageScrapeOutcome::single(crate::models::StatusCode::Ok, 0, None);

        assert_ok!(sink.deliver(&job, &outcome).await);
        assert_err!(RejectingSink.deliver(&job, &outcome).await);
        assert_eq!(sink.into_outcomes().len(), 1);
    }
}
