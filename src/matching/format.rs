use crate::models::{ListResults, MatchRecord};

use super::{MatchResult, Reconciliation};

impl From<&MatchResult<'_>> for MatchRecord {
    fn from(result: &MatchResult<'_>) -> Self {
        let catalog = result.catalog();
        let entry = result.entry();
        let reason = match result {
            MatchResult::Matched { .. } => None,
            MatchResult::Ambiguous { note, .. } => Some(note.clone()),
            MatchResult::NearMiss { reason, .. } => Some((*reason).to_string()),
        };

        MatchRecord {
            catalog_title: catalog.title.clone(),
            catalog_year: catalog.year,
            catalog_href: catalog.locator.clone(),
            list_title: entry.title.clone(),
            list_year: entry.year,
            list_url: entry.locator.clone(),
            reason,
        }
    }
}

/// Projects a reconciliation pass into the response schema
pub fn format_results(reconciliation: &Reconciliation<'_>) -> ListResults {
    ListResults {
        matches: reconciliation.matches.iter().map(MatchRecord::from).collect(),
        ambiguous_matches: reconciliation.ambiguous.iter().map(MatchRecord::from).collect(),
        near_misses: reconciliation.near_misses.iter().map(MatchRecord::from).collect(),
    }
}
