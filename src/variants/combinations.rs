//! Cartesian product of option groups and the resumable round-robin slice.

use crate::models::{Combination, OptionGroup};

/// Number of combinations across `groups` (1 for no groups).
///
/// Saturates at `usize::MAX` instead of overflowing.
pub fn combination_count(groups: &[OptionGroup]) -> usize {
    groups.iter().fold(1usize, |acc, g| acc.saturating_mul(g.options.len()))
}

/// Returns the combination at `index` in nested order.
///
/// The first group varies slowest and the last fastest, i.e. `index` is
/// decomposed in mixed radix over the group sizes in group order.
pub fn combination_at(groups: &[OptionGroup], index: usize) -> Option<Combination> {
    if index >= combination_count(groups) {
        return None;
    }

    let mut labels = vec![String::new(); groups.len()];
    let mut rest = index;
    for (slot, group) in labels.iter_mut().zip(groups).rev() {
        let radix = group.options.len();
        *slot = group.options[rest % radix].clone();
        rest /= radix;
    }

    Some(labels)
}

/// Generates every option combination.
///
/// No groups yields exactly one empty combination (the default variant).
pub fn generate_combinations(groups: &[OptionGroup]) -> Vec<Combination> {
    if groups.is_empty() {
        return vec![Vec::new()];
    }

    (0..combination_count(groups)).filter_map(|i| combination_at(groups, i)).collect()
}

/// Variants chosen for one run plus where the next run should resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSlice {
    pub variants: Vec<Combination>,
    pub next_cursor: usize,
}

/// Takes up to `batch_size` combinations starting at `cursor`, wrapping around.
///
/// An empty list degrades to the single default variant with cursor 0.
/// A batch covering the whole list yields every combination once and resets
/// the cursor to 0.
pub fn slice_for_run(all: &[Combination], cursor: usize, batch_size: usize) -> VariantSlice {
    let total = all.len();
    if total == 0 {
        return VariantSlice { variants: vec![Vec::new()], next_cursor: 0 };
    }

    let start = cursor % total;
    let count = batch_size.min(total);
    let variants = (0..count).map(|i| all[(start + i) % total].clone()).collect();

    VariantSlice { variants, next_cursor: RoundRobinCursor::new(start).advance(count, total).get() }
}

/// Plans this run's slice straight from the groups.
///
/// Same result as [`slice_for_run`] over [`generate_combinations`], but only
/// the combinations in the slice are built.
pub fn plan_run(groups: &[OptionGroup], cursor: usize, batch_size: usize) -> VariantSlice {
    if groups.is_empty() {
        return VariantSlice { variants: vec![Vec::new()], next_cursor: 0 };
    }

    let total = combination_count(groups);
    if total == 0 {
        return VariantSlice { variants: vec![Vec::new()], next_cursor: 0 };
    }

    let start = cursor % total;
    let count = batch_size.min(total);
    let variants = (0..count)
        .map(|i| if i < total - start { start + i } else { i - (total - start) })
        .filter_map(|index| combination_at(groups, index))
        .collect();

    VariantSlice { variants, next_cursor: RoundRobinCursor::new(start).advance(count, total).get() }
}

/// Position in an item's full combination list, persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoundRobinCursor(usize);

impl RoundRobinCursor {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Advances by `steps` over `total` combinations; stays at 0 when `total` is 0.
    pub fn advance(self, steps: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }
        Self(((self.0 % total) + (steps % total)) % total)
    }

    /// Clamps a persisted value into `0..max(total, 1)`.
    pub fn normalize(self, total: usize) -> Self {
        Self(if total == 0 { 0 } else { self.0 % total })
    }

    /// Number of runs of `batch_size` needed to visit all `total` combinations.
    pub fn runs_per_cycle(total: usize, batch_size: usize) -> usize {
        if total == 0 {
            return 1;
        }
        total.div_ceil(batch_size.max(1))
    }
}

impl From<usize> for RoundRobinCursor {
    fn from(position: usize) -> Self {
        Self(position)
    }
}
