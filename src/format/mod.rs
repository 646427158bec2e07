//! Output formatting for scrape outcomes (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::models::PageScrapeOutcome;
use crate::scrape::{Inspection, RunSummary, ScrapeJob};
use serde::Serialize;

/// An outcome together with the job that produced it.
#[derive(Debug, Serialize)]
struct OutcomeRecord<'a> {
    item_id: &'a str,
    url: &'a str,
    cursor: usize,
    #[serde(flatten)]
    outcome: &'a PageScrapeOutcome,
}

/// Formats outcomes for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the outcomes of one run.
    pub fn format_outcomes(&self, outcomes: &[(ScrapeJob, PageScrapeOutcome)]) -> String {
        if outcomes.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No pages scraped.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_outcomes(outcomes),
            OutputFormat::Table => self.table_outcomes(outcomes),
            OutputFormat::Markdown => self.markdown_outcomes(outcomes),
            OutputFormat::Csv => self.csv_outcomes(outcomes),
        }
    }

    /// One-line run summary; empty for machine-readable formats.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Json | OutputFormat::Csv => String::new(),
            _ => format!(
                "Scraped {} of {} pages ({} failed, {} cancelled) in {:.1}s",
                summary.success,
                summary.total,
                summary.failed,
                summary.cancelled,
                summary.duration.as_secs_f64()
            ),
        }
    }

    /// Formats an offline inspection.
    pub fn format_inspection(&self, inspection: &Inspection) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(inspection).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Markdown => self.markdown_inspection(inspection),
            OutputFormat::Csv => self.csv_inspection(inspection),
            OutputFormat::Table => self.table_inspection(inspection),
        }
    }

    // JSON formatting

    fn json_outcomes(&self, outcomes: &[(ScrapeJob, PageScrapeOutcome)]) -> String {
        let records: Vec<OutcomeRecord<'_>> = outcomes
            .iter()
            .map(|(job, outcome)| OutcomeRecord {
                item_id: &job.item_id,
                url: &job.url,
                cursor: job.cursor,
                outcome,
            })
            .collect();
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_outcomes(&self, outcomes: &[(ScrapeJob, PageScrapeOutcome)]) -> String {
        let blocks: Vec<String> =
            outcomes.iter().map(|(job, outcome)| self.table_single(job, outcome)).collect();

        let mut out = blocks.join("\n\n");
        out.push_str(&format!("\n\nTotal: {} pages", outcomes.len()));
        out
    }

    fn table_single(&self, job: &ScrapeJob, outcome: &PageScrapeOutcome) -> String {
        let key_width = 30;
        let price_width = 12;

        let mut lines = Vec::new();
        lines.push(format!("URL:     {}", job.url));
        lines.push(format!("Name:    {}", outcome.product_name.as_deref().unwrap_or("N/A")));
        lines.push(format!("Status:  {}", outcome.page_status_code));
        lines.push(format!("Cursor:  {} -> {}", job.cursor, outcome.next_cursor));
        lines.push(format!("Lowest:  {}", format_price(outcome.lowest_price())));
        lines.push(String::new());

        lines.push(format!("{:<key_width$}  {:>price_width$}  {}", "Option", "Price", "Status"));
        lines.push(format!("{:-<key_width$}  {:-<price_width$}  {:-<13}", "", "", ""));

        for result in &outcome.results {
            lines.push(format!(
                "{}  {:>price_width$}  {}",
                pad(&truncate(&result.option_key, key_width), key_width),
                format_price(result.price),
                result.status_code
            ));
        }

        lines.join("\n")
    }

    fn table_inspection(&self, inspection: &Inspection) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Name:      {}", inspection.product_name.as_deref().unwrap_or("N/A")));
        lines.push(format!(
            "Price:     {} ({})",
            format_price(inspection.price.price),
            inspection.price.status_code
        ));
        if !inspection.price.raw_price_text.is_empty() {
            lines.push(format!("Raw text:  {}", inspection.price.raw_price_text));
        }
        lines.push(format!("Sold out:  {}", yes_no(inspection.stock.sold_out)));
        lines.push(format!("Blocked:   {}", yes_no(inspection.stock.blocked)));

        if inspection.groups.is_empty() {
            lines.push("Options:   none".to_string());
        } else {
            lines.push("Options:".to_string());
            for group in &inspection.groups {
                lines.push(format!("  {}: {}", group.name, group.options.join(", ")));
            }
        }

        lines.push(format!(
            "Variants:  {} combinations, {} run(s) per cycle",
            inspection.combinations, inspection.runs_per_cycle
        ));
        lines.push(format!("This run:  cursor {} -> {}", inspection.cursor, inspection.next_cursor));
        for key in &inspection.variants {
            lines.push(format!("  - {}", key));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_outcomes(&self, outcomes: &[(ScrapeJob, PageScrapeOutcome)]) -> String {
        let mut lines = Vec::new();

        for (job, outcome) in outcomes {
            let title = outcome.product_name.as_deref().unwrap_or(&job.url);
            lines.push(format!("## [{}]({})", title, job.url));
            lines.push(String::new());
            lines.push(format!(
                "- **Status:** {} (cursor {} → {})",
                outcome.page_status_code, job.cursor, outcome.next_cursor
            ));
            if let Some(lowest) = outcome.lowest_price() {
                lines.push(format!("- **Lowest:** {}", format_price(Some(lowest))));
            }
            lines.push(String::new());
            lines.push("| Option | Price | Status |".to_string());
            lines.push("|--------|-------|--------|".to_string());
            for result in &outcome.results {
                lines.push(format!(
                    "| {} | {} | {} |",
                    result.option_key.replace('|', "\\|"),
                    format_price(result.price),
                    result.status_code
                ));
            }
            lines.push(String::new());
        }

        lines.push(format!("*{} pages scraped*", outcomes.len()));
        lines.join("\n")
    }

    fn markdown_inspection(&self, inspection: &Inspection) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", inspection.product_name.as_deref().unwrap_or("Unnamed product")));
        lines.push(String::new());
        lines.push(format!(
            "- **Price:** {} ({})",
            format_price(inspection.price.price),
            inspection.price.status_code
        ));
        lines.push(format!("- **Sold out:** {}", yes_no(inspection.stock.sold_out)));
        lines.push(format!("- **Blocked:** {}", yes_no(inspection.stock.blocked)));
        for group in &inspection.groups {
            lines.push(format!("- **{}:** {}", group.name, group.options.join(", ")));
        }
        lines.push(format!(
            "- **This run:** {} of {} combinations (cursor {} → {})",
            inspection.variants.len(),
            inspection.combinations,
            inspection.cursor,
            inspection.next_cursor
        ));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "item_id,url,option_key,price,status,raw_price_text,page_status,next_cursor,product_name"
            .to_string()
    }

    fn csv_outcomes(&self, outcomes: &[(ScrapeJob, PageScrapeOutcome)]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for (job, outcome) in outcomes {
            let name = outcome.product_name.as_deref().map(Self::csv_escape).unwrap_or_default();
            for result in &outcome.results {
                lines.push(format!(
                    "{},{},{},{},{},{},{},{},{}",
                    Self::csv_escape(&job.item_id),
                    Self::csv_escape(&job.url),
                    Self::csv_escape(&result.option_key),
                    result.price.map(|p| p.to_string()).unwrap_or_default(),
                    result.status_code,
                    result.raw_price_text.as_deref().map(Self::csv_escape).unwrap_or_default(),
                    outcome.page_status_code,
                    outcome.next_cursor,
                    name
                ));
            }
        }

        lines.join("\n")
    }

    fn csv_inspection(&self, inspection: &Inspection) -> String {
        let mut lines = vec!["option_key".to_string()];
        lines.extend(inspection.variants.iter().map(|key| Self::csv_escape(key)));
        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Formats a Won amount with thousands separators ("14,650원").
pub fn format_krw(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('원');
    out
}

fn format_price(price: Option<u64>) -> String {
    price.map(format_krw).unwrap_or_else(|| "N/A".to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Truncates to `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", head)
}

/// Left-aligns to `width` characters (format width counts chars, not columns).
fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s)
}
