//! Offline inspection of a saved product page.

use crate::config::Config;
use crate::format::Formatter;
use crate::scrape::{PageScraper, ScrapeSettings};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Runs the detection stack against an HTML file.
pub struct InspectCommand {
    config: Config,
}

impl InspectCommand {
    /// Creates a new inspect command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads `path` and returns formatted analysis.
    pub fn execute(&self, path: &Path, cursor: usize) -> Result<String> {
        let markup = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;

        info!("Inspecting {}", path.display());
        self.execute_markup(&markup, cursor)
    }

    /// Analyzes markup that is already in memory.
    pub fn execute_markup(&self, markup: &str, cursor: usize) -> Result<String> {
        let adapter = self.config.adapter.compile().context("Invalid site adapter")?;
        let scraper = PageScraper::new(adapter, ScrapeSettings::from(&self.config));
        let inspection = scraper.inspect(markup, cursor);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_inspection(&inspection))
    }
}
