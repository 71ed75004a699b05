use unicode_normalization::UnicodeNormalization;

/// Canonicalizes a title into the key used for equality comparison
///
/// NFKD-decomposes, lowercases, spells out `&` as "and", drops everything
/// outside `[a-z0-9 ]` and collapses runs of spaces. Total and idempotent.
pub fn normalize(title: &str) -> String {
    let folded = title
        .nfkd()
        .collect::<String>()
        .to_lowercase()
        .replace('&', "and");

    let kept: String = folded
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
