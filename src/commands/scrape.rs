//! Scrape command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::page::{HttpNavigator, Navigator};
use crate::scrape::{run_jobs, CollectingSink, PageScraper, RunSummary, ScrapeJob, ScrapeSettings};
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Visits product URLs and renders their outcomes.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes `urls` over HTTP and returns formatted output.
    pub async fn execute(
        &self,
        urls: &[String],
        cursor: usize,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let navigator = HttpNavigator::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_navigator(&navigator, urls, cursor, cancel).await
    }

    /// Scrapes with a provided navigator (for testing).
    pub async fn execute_with_navigator(
        &self,
        navigator: &dyn Navigator,
        urls: &[String],
        cursor: usize,
        cancel: &CancellationToken,
    ) -> Result<String> {
        if urls.is_empty() {
            anyhow::bail!("No URLs given");
        }

        let adapter = self.config.adapter.compile().context("Invalid site adapter")?;
        let scraper = PageScraper::new(adapter, ScrapeSettings::from(&self.config));

        let jobs: Vec<ScrapeJob> = urls
            .iter()
            .map(|url| ScrapeJob::new(item_id(url), url.trim(), cursor))
            .collect();

        let sink = CollectingSink::new();
        let summary = run_jobs(&scraper, navigator, jobs, &sink, cancel).await;
        info!(success = summary.success, total = summary.total, "Scrape finished");

        Ok(self.render(urls, sink, &summary))
    }

    fn render(&self, urls: &[String], sink: CollectingSink, summary: &RunSummary) -> String {
        let mut outcomes = sink.into_outcomes();
        // Completion order is nondeterministic; print in input order instead.
        outcomes.sort_by_key(|(job, _)| urls.iter().position(|url| url.trim() == job.url));

        let formatter = Formatter::new(self.config.format);
        let mut output = formatter.format_outcomes(&outcomes);
        let footer = formatter.format_summary(summary);
        if !footer.is_empty() {
            output.push_str("\n\n");
            output.push_str(&footer);
        }
        output
    }
}

/// Item id for a URL: the last non-empty path segment, without the query.
fn item_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
