use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{NormalizedRecord, RawEntry};

use super::normalize;

/// A "(YYYY)" token together with the whitespace around it
static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(([1-9][0-9]{3})\)\s*").expect("year pattern is valid"));

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Builds a [`NormalizedRecord`] from a raw entry
///
/// The first "(YYYY)" token in the name supplies the year and is cut out of the
/// display title. An explicit `year` on the entry wins over the embedded one.
/// Never fails: entries without a usable year or locator simply carry `None`.
pub fn extract(raw: &RawEntry) -> NormalizedRecord {
    let (title, embedded_year) = split_year(&raw.name);

    let explicit_year = raw.year.filter(|year| {
        let valid = YEAR_RANGE.contains(year);
        if !valid {
            tracing::debug!(name = %raw.name, year, "Discarding out-of-range year");
        }
        valid
    });

    let norm_key = normalize(&title);

    NormalizedRecord {
        title,
        norm_key,
        year: explicit_year.or(embedded_year),
        locator: raw.url.clone(),
        slug: raw.slug.clone(),
    }
}

/// Splits "Title (YYYY)" into the trimmed display title and the year
fn split_year(name: &str) -> (String, Option<i32>) {
    let Some(captures) = YEAR_TOKEN.captures(name) else {
        return (name.trim().to_string(), None);
    };

    // The group is exactly four ASCII digits, so parsing cannot overflow
    let year = captures.get(1).and_then(|m| m.as_str().parse::<i32>().ok());

    let token = captures.get(0).map_or(0..0, |m| m.range());
    let before = &name[..token.start];
    let after = &name[token.end..];

    let title = if before.trim().is_empty() || after.trim().is_empty() {
        format!("{}{}", before, after)
    } else {
        format!("{} {}", before, after)
    };

    (title.trim().to_string(), year)
}
