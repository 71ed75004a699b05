use std::collections::HashMap;

use crate::models::NormalizedRecord;

/// Release years may differ by this much and still count as the same film
pub const YEAR_TOLERANCE: i32 = 1;

pub const MULTIPLE_MATCHES: &str = "multiple matches";
pub const MISSING_YEAR: &str = "missing year";

/// A correspondence between one catalog record and one list record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// Exactly one list record matched on title and year
    Matched {
        catalog: &'a NormalizedRecord,
        entry: &'a NormalizedRecord,
    },
    /// One of several list records that matched on title and year
    Ambiguous {
        catalog: &'a NormalizedRecord,
        entry: &'a NormalizedRecord,
        note: String,
    },
    /// Title-only match where at least one side has no year
    NearMiss {
        catalog: &'a NormalizedRecord,
        entry: &'a NormalizedRecord,
        reason: &'static str,
    },
}

impl<'a> MatchResult<'a> {
    pub fn catalog(&self) -> &'a NormalizedRecord {
        match self {
            MatchResult::Matched { catalog, .. }
            | MatchResult::Ambiguous { catalog, .. }
            | MatchResult::NearMiss { catalog, .. } => catalog,
        }
    }

    pub fn entry(&self) -> &'a NormalizedRecord {
        match self {
            MatchResult::Matched { entry, .. }
            | MatchResult::Ambiguous { entry, .. }
            | MatchResult::NearMiss { entry, .. } => entry,
        }
    }
}

/// Output of one reconciliation pass, bucketed by result kind
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciliation<'a> {
    pub matches: Vec<MatchResult<'a>>,
    pub ambiguous: Vec<MatchResult<'a>>,
    pub near_misses: Vec<MatchResult<'a>>,
}

impl<'a> Reconciliation<'a> {
    fn push(&mut self, result: MatchResult<'a>) {
        tracing::debug!(
            catalog_title = %result.catalog().title,
            catalog_year = ?result.catalog().year,
            list_title = %result.entry().title,
            list_year = ?result.entry().year,
            kind = result_kind(&result),
            "Reconciled title"
        );

        match result {
            MatchResult::Matched { .. } => self.matches.push(result),
            MatchResult::Ambiguous { .. } => self.ambiguous.push(result),
            MatchResult::NearMiss { .. } => self.near_misses.push(result),
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len() + self.ambiguous.len() + self.near_misses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn result_kind(result: &MatchResult<'_>) -> &'static str {
    match result {
        MatchResult::Matched { .. } => "matched",
        MatchResult::Ambiguous { .. } => "ambiguous",
        MatchResult::NearMiss { .. } => "near_miss",
    }
}

/// Both years are known and at most [`YEAR_TOLERANCE`] apart
fn years_agree(a: Option<i32>, b: Option<i32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= YEAR_TOLERANCE,
        _ => false,
    }
}

/// Note attached to every candidate of an ambiguous match
fn ambiguity_note(entry: &NormalizedRecord) -> String {
    match &entry.slug {
        Some(slug) => format!("{}, slug: {}", MULTIPLE_MATCHES, slug),
        None => MULTIPLE_MATCHES.to_string(),
    }
}

/// Pairs every catalog record with the list records that share its title
///
/// Catalog order drives output order; candidates for one catalog record keep
/// their order in `targets`. Keys compare by plain equality, so titles that
/// normalize to an empty key (symbol-only or non-Latin names) pair with each
/// other like any other key.
pub fn reconcile<'a>(
    catalog: &'a [NormalizedRecord],
    targets: &'a [NormalizedRecord],
) -> Reconciliation<'a> {
    let mut by_key: HashMap<&str, Vec<&'a NormalizedRecord>> = HashMap::new();
    for target in targets {
        by_key.entry(target.norm_key.as_str()).or_default().push(target);
    }

    let mut reconciliation = Reconciliation::default();

    for record in catalog {
        let Some(same_title) = by_key.get(record.norm_key.as_str()) else {
            continue;
        };

        let candidates: Vec<&'a NormalizedRecord> = same_title
            .iter()
            .copied()
            .filter(|entry| years_agree(record.year, entry.year))
            .collect();

        match candidates.as_slice() {
            [] => {
                for entry in same_title
                    .iter()
                    .copied()
                    .filter(|entry| record.year.is_none() || entry.year.is_none())
                {
                    reconciliation.push(MatchResult::NearMiss {
                        catalog: record,
                        entry,
                        reason: MISSING_YEAR,
                    });
                }
            }
            [entry] => reconciliation.push(MatchResult::Matched {
                catalog: record,
                entry: *entry,
            }),
            _ => {
                for entry in candidates.iter().copied() {
                    reconciliation.push(MatchResult::Ambiguous {
                        catalog: record,
                        entry,
                        note: ambiguity_note(entry),
                    });
                }
            }
        }
    }

    reconciliation
}
