//! Free-form recipient string parsing

/// Split a free-form recipient string into individual addresses.
///
/// Commas, spaces, tabs, and newlines all act as separators, in any mixture
/// and with arbitrary repetition. Tokens keep their original relative order
/// and are not deduplicated. No address-syntax validation happens here; a
/// malformed address passes through unchanged and fails, if at all, at the
/// mail provider.
///
/// An empty input yields an empty list, not an error.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.replace('\n', " ")
        .replace('\t', " ")
        .replace(',', " ")
        .split(' ')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
