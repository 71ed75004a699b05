use chrono::{DateTime, Utc};
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    matching::extract,
    models::{CatalogEntry, CatalogSummary, NormalizedRecord, RawEntry},
};

/// The free-with-ads catalog, loaded once and shared read-only
///
/// Records are kept newest first (entries without a year last) so that every
/// reconciliation pass reports the most recent titles first.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<NormalizedRecord>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog from already-parsed entries
    ///
    /// Sorting runs on the extracted year, so a title carrying only an
    /// embedded "(YYYY)" sorts by that year.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut records: Vec<NormalizedRecord> = entries
            .into_iter()
            .map(|entry| extract(&RawEntry::from(entry)))
            .collect();
        records.sort_by(|a, b| b.year.cmp(&a.year));

        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    /// Reads and annotates the catalog JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let entries: Vec<CatalogEntry> = serde_json::from_str(&contents).map_err(|e| {
            AppError::Catalog(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_entries(entries);

        tracing::info!(
            path = %path.display(),
            titles = catalog.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        let with_year = self.records.iter().filter(|r| r.year.is_some()).count();
        CatalogSummary {
            total: self.records.len(),
            with_year,
            without_year: self.records.len() - with_year,
            loaded_at: self.loaded_at,
        }
    }
}
