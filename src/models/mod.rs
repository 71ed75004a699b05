use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which profile list a reconciliation pass runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Watchlist,
    Watched,
}

impl Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListKind::Watchlist => write!(f, "watchlist"),
            ListKind::Watched => write!(f, "watched"),
        }
    }
}

/// An entry as handed over by a data source, before extraction
///
/// `name` may embed a parenthetical year, e.g. "Inception (2010)".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawEntry {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Secondary identifier, e.g. the Letterboxd film slug
    #[serde(default)]
    pub slug: Option<String>,
}

impl RawEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// A record of the scraped free-with-ads catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub href: Option<String>,
}

impl From<CatalogEntry> for RawEntry {
    fn from(entry: CatalogEntry) -> Self {
        RawEntry {
            name: entry.title,
            url: entry.href,
            year: entry.year,
            slug: None,
        }
    }
}

/// A title reduced to what the matcher compares on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Display title with any "(YYYY)" token removed
    pub title: String,
    /// Canonical comparison key
    pub norm_key: String,
    pub year: Option<i32>,
    /// URL or href carried through to the output
    pub locator: Option<String>,
    pub slug: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Request body for the compare endpoint
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// One flattened correspondence between a catalog title and a list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub catalog_title: String,
    pub catalog_year: Option<i32>,
    pub catalog_href: Option<String>,
    pub list_title: String,
    pub list_year: Option<i32>,
    pub list_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Formatted result triple for one profile list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResults {
    pub matches: Vec<MatchRecord>,
    pub ambiguous_matches: Vec<MatchRecord>,
    pub near_misses: Vec<MatchRecord>,
}

impl ListResults {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.ambiguous_matches.is_empty() && self.near_misses.is_empty()
    }
}

/// Response for the compare endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub username: String,
    /// True when the profile resolved but its watchlist has no items
    pub empty_watchlist: bool,
    pub watchlist: ListResults,
    pub watched: ListResults,
}

/// Summary of the loaded catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub with_year: usize,
    pub without_year: usize,
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_kind_display() {
        assert_eq!(format!("{}", ListKind::Watchlist), "watchlist");
        assert_eq!(format!("{}", ListKind::Watched), "watched");
    }

    #[test]
    fn test_catalog_entry_deserialization_with_nulls() {
        let json = r#"[
            {"title": "Paddington", "year": 2014, "href": "https://www.youtube.com/watch?v=abc"},
            {"title": "Annie", "year": null, "href": "https://www.youtube.com/watch?v=def"},
            {"title": "Unlinked"}
        ]"#;

        let entries: Vec<CatalogEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].year, Some(2014));
        assert_eq!(entries[1].year, None);
        assert_eq!(entries[2].href, None);
    }

    #[test]
    fn test_catalog_entry_into_raw_entry() {
        let entry = CatalogEntry {
            title: "Up".to_string(),
            year: Some(2009),
            href: Some("https://www.youtube.com/watch?v=up".to_string()),
        };

        let raw: RawEntry = entry.into();
        assert_eq!(raw.name, "Up");
        assert_eq!(raw.year, Some(2009));
        assert_eq!(raw.url.as_deref(), Some("https://www.youtube.com/watch?v=up"));
        assert_eq!(raw.slug, None);
    }

    #[test]
    fn test_match_record_omits_missing_reason() {
        let record = MatchRecord {
            catalog_title: "Up".to_string(),
            catalog_year: Some(2009),
            catalog_href: None,
            list_title: "Up".to_string(),
            list_year: Some(2009),
            list_url: None,
            reason: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("reason").is_none());
        assert_eq!(json["catalog_href"], serde_json::Value::Null);
    }
}
