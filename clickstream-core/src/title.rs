/// Convert a user-supplied title into the key form used by the dataset.
///
/// Spaces become underscores. Nothing else is touched: no case folding,
/// trimming or Unicode normalization.
pub fn normalize_title(raw: &str) -> String {
    raw.replace(' ', "_")
}
