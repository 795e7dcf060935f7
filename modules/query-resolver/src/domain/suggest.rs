const MAX_SUGGESTIONS: usize = 8;
const FALLBACK_SUGGESTIONS: usize = 5;

/// Example queries matching what the operator has typed so far.
///
/// Blank input returns the first eight; otherwise case-insensitive substring
/// matches (at most eight), or the first five when nothing matches.
#[must_use]
pub fn suggest<'a>(catalog: &'a [String], partial: &str) -> Vec<&'a str> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.iter().take(MAX_SUGGESTIONS).map(String::as_str).collect();
    }
    let matches: Vec<&str> = catalog
        .iter()
        .filter(|s| s.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect();
    if matches.is_empty() {
        catalog
            .iter()
            .take(FALLBACK_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    } else {
        matches
    }
}
