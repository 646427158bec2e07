//! Parsed page markup and its linearized text.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("head > title, title").unwrap());

/// Elements whose content never contributes page text.
const SKIPPED: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that start a new line in the linearized text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "section", "table", "tbody", "td", "th",
    "thead", "tr", "ul",
];

/// A page's markup parsed into a queryable tree.
///
/// Live pages are queried through a serialized snapshot of their current
/// DOM, so the same extraction code runs against browsers and saved files.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_document(markup) }
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    pub fn exists(&self, selector: &Selector) -> bool {
        self.html.select(selector).next().is_some()
    }

    /// Normalized text of the first element matching `selector`.
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html.select(selector).next().map(element_text)
    }

    /// Root `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Visible body text with whitespace collapsed.
    pub fn body_text(&self) -> String {
        let mut index = TextIndex::default();
        if let Some(body) = self.html.select(&BODY).next() {
            walk(body, &mut index, None);
        }
        index.finish();
        index.text
    }

    /// Document `<title>` text, if present and non-empty.
    pub fn title(&self) -> Option<String> {
        self.html.select(&TITLE).next().map(element_text).filter(|t| !t.is_empty())
    }

    /// Linearizes the page text, recording where each element matching
    /// `marked` sits in it.
    pub fn text_index(&self, marked: &Selector) -> TextIndex {
        let mut index = TextIndex::default();
        walk(self.html.root_element(), &mut index, Some(marked));
        index.finish();
        index.spans.sort_by_key(|s| s.start);
        index
    }
}

/// Element text with runs of whitespace collapsed to one space and trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte range of a marked element's text inside [`TextIndex::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// Page text flattened in document order.
///
/// Block-level elements are separated by `'\n'`; all other whitespace is
/// collapsed to single spaces.
#[derive(Debug, Default)]
pub struct TextIndex {
    text: String,
    spans: Vec<TextSpan>,
}

impl TextIndex {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Spans of marked elements, in document order.
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn span_text(&self, span: TextSpan) -> &str {
        &self.text[span.start..span.end]
    }

    /// The text around `start..end`: up to `before` characters before and
    /// `after` characters after, never crossing a block boundary.
    pub fn context(&self, start: usize, end: usize, before: usize, after: usize) -> String {
        let head: Vec<char> =
            self.text[..start].chars().rev().take_while(|c| *c != '\n').take(before).collect();
        let tail = self.text[end..].chars().take_while(|c| *c != '\n').take(after);

        let mut context: String = head.into_iter().rev().collect();
        context.push_str(&self.text[start..end]);
        context.extend(tail);
        context
    }

    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                if !self.text.is_empty() && !self.text.ends_with([' ', '\n']) {
                    self.text.push(' ');
                }
            } else {
                self.text.push(c);
            }
        }
    }

    fn finish(&mut self) {
        let len = self.text.trim_end().len();
        self.text.truncate(len);
        for span in &mut self.spans {
            span.end = span.end.min(len);
            span.start = span.start.min(span.end);
        }
    }

    fn line_break(&mut self) {
        if self.text.ends_with(' ') {
            self.text.pop();
        }
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }
}

fn walk(element: ElementRef<'_>, index: &mut TextIndex, marked: Option<&Selector>) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        index.line_break();
    }

    let start = index.text.len();
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            index.push_text(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            walk(child, index, marked);
        }
    }

    if marked.is_some_and(|m| m.matches(&element)) {
        let end = index.text.trim_end().len().max(start);
        index.spans.push(TextSpan { start, end });
    }

    if block {
        index.line_break();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong() -> Selector {
        Selector::parse("strong").unwrap()
    }

    #[test]
    fn test_body_text_collapses_whitespace() {
        let doc = Document::parse(
            "<html><head><title>T</title></head><body><p>  a \n b </p><script>x()</script></body></html>",
        );
        assert_eq!(doc.body_text(), "a b");
    }

    #[test]
    fn test_title() {
        let doc = Document::parse("<html><head><title> 상품 - 쿠팡! </title></head></html>");
        assert_eq!(doc.title().as_deref(), Some("상품 - 쿠팡!"));

        let doc = Document::parse("<html><body></body></html>");
        assert!(doc.title().is_none());
    }

    #[test]
    fn test_first_text() {
        let doc = Document::parse("<div><h1> Big \n Title </h1><h1>Other</h1></div>");
        let sel = Selector::parse("h1").unwrap();
        assert_eq!(doc.first_text(&sel).as_deref(), Some("Big Title"));
    }

    #[test]
    fn test_blocks_split_lines() {
        let doc = Document::parse("<div>쿠폰할인<strong>1,000</strong>원</div><div><strong>14,650</strong>원</div>");
        let index = doc.text_index(&strong());
        assert_eq!(index.text(), "쿠폰할인1,000원\n14,650원");
    }

    #[test]
    fn test_spans_in_document_order() {
        let doc = Document::parse("<p><strong>1</strong> and <strong>2</strong></p>");
        let index = doc.text_index(&strong());
        let texts: Vec<&str> = index.spans().iter().map(|s| index.span_text(*s)).collect();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_context_stops_at_block_boundary() {
        let doc = Document::parse("<div>쿠폰할인<strong>1,000</strong>원</div><div><strong>14,650</strong>원</div>");
        let index = doc.text_index(&strong());
        let second = index.spans()[1];
        let context = index.context(second.start, second.end, 30, 4);
        assert_eq!(context, "14,650원");

        let first = index.spans()[0];
        let context = index.context(first.start, first.end, 30, 4);
        assert_eq!(context, "쿠폰할인1,000원");
    }

    #[test]
    fn test_context_window_sizes() {
        let doc = Document::parse("<p>abcdef<strong>12</strong>ghijk</p>");
        let index = doc.text_index(&strong());
        let span = index.spans()[0];
        assert_eq!(index.context(span.start, span.end, 2, 3), "ef12ghi");
    }
}
