//! Option group detection.

use super::price::SUFFIXED_AMOUNT;
use crate::adapter::CompiledAdapter;
use crate::models::OptionGroup;
use crate::page::{element_text, Document};
use scraper::ElementRef;
use tracing::debug;

/// Finds the page's selectable option groups, in document order.
///
/// A container becomes a group when it yields at least two distinct labels.
/// Containers wrapping another qualifying container are skipped, so an outer
/// wrapper never merges its inner groups into one pseudo-group.
pub fn detect_option_groups(doc: &Document, adapter: &CompiledAdapter) -> Vec<OptionGroup> {
    let candidates: Vec<(ElementRef<'_>, Vec<String>)> = doc
        .select(&adapter.option_container)
        .map(|container| (container, option_labels(container, adapter)))
        .filter(|(_, labels)| labels.len() >= 2)
        .collect();

    let mut groups = Vec::new();
    for (container, labels) in &candidates {
        let wraps_other = candidates
            .iter()
            .any(|(other, _)| other.id() != container.id() && is_descendant(*other, *container));
        if wraps_other {
            continue;
        }

        let name = group_title(*container, adapter).unwrap_or_else(|| {
            format!("{}{}", adapter.config.options.fallback_name_prefix, groups.len() + 1)
        });
        debug!(group = %name, options = labels.len(), "Detected option group");
        groups.push(OptionGroup::new(name, labels.clone()));
    }

    groups
}

fn option_labels(container: ElementRef<'_>, adapter: &CompiledAdapter) -> Vec<String> {
    let max_len = adapter.config.options.max_label_len;
    let mut labels: Vec<String> = Vec::new();

    for item in container.select(&adapter.option_item) {
        let label = element_text(item);
        if label.is_empty() || SUFFIXED_AMOUNT.is_match(&label) || label.chars().count() > max_len {
            continue;
        }
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    labels
}

/// First non-empty title element that is not part of an option item.
fn group_title(container: ElementRef<'_>, adapter: &CompiledAdapter) -> Option<String> {
    container
        .select(&adapter.option_title)
        .filter(|title| !within_item(*title, container, adapter))
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn within_item(element: ElementRef<'_>, container: ElementRef<'_>, adapter: &CompiledAdapter) -> bool {
    if adapter.option_item.matches(&element) {
        return true;
    }
    element
        .ancestors()
        .take_while(|node| node.id() != container.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| adapter.option_item.matches(&ancestor))
}

fn is_descendant(element: ElementRef<'_>, ancestor: ElementRef<'_>) -> bool {
    element.ancestors().any(|node| node.id() == ancestor.id())
}
