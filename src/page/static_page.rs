//! In-memory pages over fixed markup.
//!
//! A [`StaticPage`] stands in for a live browser tab: it serves markup,
//! "clicks" option elements by exact label match, and can swap in a
//! different rendering once a set of options has been selected.
//!
//! Renderings are keyed by the labels selected so far. Each click re-renders
//! immediately; the first click after a snapshot starts a new selection from
//! the base markup.

use super::document::element_text;
use super::{Navigator, Page};
use crate::error::ScrapeError;
use crate::variants::build_option_key;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct PageState {
    /// Labels selected so far in the current selection
    selection: Vec<String>,
    /// A snapshot was taken; the next click starts a new selection
    snapshot_taken: bool,
    clicks: Vec<String>,
    closed: bool,
}

/// A page backed by static markup.
#[derive(Debug)]
pub struct StaticPage {
    base: String,
    renders: HashMap<String, String>,
    state: Mutex<PageState>,
}

impl StaticPage {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { base: markup.into(), renders: HashMap::new(), state: Mutex::default() }
    }

    /// Markup served after exactly `labels` were clicked.
    pub fn with_render<S: AsRef<str>>(mut self, labels: &[S], markup: impl Into<String>) -> Self {
        self.renders.insert(build_option_key(labels), markup.into());
        self
    }

    /// A fresh page with the same markup and no click history.
    pub fn reopen(&self) -> Self {
        Self { base: self.base.clone(), renders: self.renders.clone(), state: Mutex::default() }
    }

    /// Every successful click, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state().clicks.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_markup(&self, state: &PageState) -> &str {
        if state.selection.is_empty() {
            return &self.base;
        }
        self.renders.get(&build_option_key(&state.selection)).unwrap_or(&self.base)
    }
}

fn contains_label(markup: &str, selector: &str, label: &str) -> Result<bool, ScrapeError> {
    let selector = Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;
    let html = Html::parse_document(markup);
    let wanted = label.trim();
    let found = html.select(&selector).any(|el| element_text(el) == wanted);
    Ok(found)
}

#[async_trait]
impl Page for StaticPage {
    async fn content(&self) -> Result<String, ScrapeError> {
        let mut state = self.state();
        if state.closed {
            return Err(ScrapeError::Page("page is closed".to_string()));
        }
        state.snapshot_taken = true;
        Ok(self.current_markup(&state).to_string())
    }

    async fn click_matching(&self, selector: &str, label: &str) -> Result<bool, ScrapeError> {
        let mut state = self.state();
        if state.closed {
            return Err(ScrapeError::Page("page is closed".to_string()));
        }
        if std::mem::take(&mut state.snapshot_taken) {
            state.selection.clear();
        }
        if !contains_label(self.current_markup(&state), selector, label)? {
            return Ok(false);
        }
        state.selection.push(label.to_string());
        state.clicks.push(label.to_string());
        Ok(true)
    }

    async fn close(&self) -> Result<(), ScrapeError> {
        self.state().closed = true;
        Ok(())
    }
}

/// Serves [`StaticPage`]s by URL.
#[derive(Debug, Default)]
pub struct StaticSite {
    pages: HashMap<String, StaticPage>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, page: StaticPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }
}

#[async_trait]
impl Navigator for StaticSite {
    async fn open(&self, url: &str) -> Result<Box<dyn Page>, ScrapeError> {
        match self.pages.get(url) {
            Some(page) => Ok(Box::new(page.reopen())),
            None => Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: "no such page".to_string(),
            }),
        }
    }
}
