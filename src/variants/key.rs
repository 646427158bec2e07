//! Variant identity keys.
//!
//! The key is the join key for externally persisted variant records. Its
//! separator and ordering are part of the stored data format.

/// Key used when no option labels are selected.
pub const DEFAULT_OPTION_KEY: &str = "default";

/// Separator between labels in an option key.
pub const OPTION_KEY_SEPARATOR: &str = " / ";

/// Builds the canonical option key for a set of selected labels.
///
/// Labels are trimmed, empty labels dropped and the rest joined in input
/// order with `" / "`. No labels at all yields `"default"`.
pub fn build_option_key<S: AsRef<str>>(labels: &[S]) -> String {
    let trimmed: Vec<&str> =
        labels.iter().map(|l| l.as_ref().trim()).filter(|l| !l.is_empty()).collect();

    if trimmed.is_empty() {
        return DEFAULT_OPTION_KEY.to_string();
    }

    trimmed.join(OPTION_KEY_SEPARATOR)
}
