//! Product name extraction.

use crate::adapter::CompiledAdapter;
use crate::page::Document;

/// Product name from the adapter's name selectors, falling back to the
/// document title with the site suffix stripped.
pub fn extract_product_name(doc: &Document, adapter: &CompiledAdapter) -> Option<String> {
    let from_selectors = adapter
        .names
        .iter()
        .filter_map(|sel| doc.first_text(sel))
        .find(|name| !name.is_empty());

    if from_selectors.is_some() {
        return from_selectors;
    }

    let title = doc.title()?;
    let name = strip_title_suffix(&title, &adapter.config.title_suffixes);
    (!name.is_empty()).then(|| name.to_string())
}

/// Removes a trailing " - 쿠팡!" / " | Coupang" style suffix.
pub fn strip_title_suffix<'a, S: AsRef<str>>(title: &'a str, suffixes: &[S]) -> &'a str {
    let title = title.trim();
    for suffix in suffixes {
        let Some(head) = title.strip_suffix(suffix.as_ref()) else {
            continue;
        };
        let head = head.trim_end();
        if let Some(name) = head.strip_suffix(['-', '|', ':']) {
            return name.trim_end();
        }
    }
    title
}
