use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    matching::{extract, format_results, reconcile},
    models::{CompareResponse, ListKind, ListResults, NormalizedRecord, RawEntry},
    services::providers::ProfileProvider,
};

/// Reconciles one profile list against the catalog
///
/// Pure with respect to its inputs; the same catalog can be run against any
/// number of lists without one run affecting another.
pub fn reconcile_list(catalog: &Catalog, entries: &[RawEntry], kind: ListKind) -> ListResults {
    let records: Vec<NormalizedRecord> = entries.iter().map(extract).collect();
    let reconciliation = reconcile(catalog.records(), &records);
    let results = format_results(&reconciliation);

    tracing::info!(
        list = %kind,
        entries = records.len(),
        matches = results.matches.len(),
        ambiguous = results.ambiguous_matches.len(),
        near_misses = results.near_misses.len(),
        "Reconciled list against catalog"
    );

    results
}

/// Fetches a user's watchlist and watched films and matches both against the catalog
///
/// Provider failures short-circuit before any reconciliation runs. A profile
/// with an empty watchlist is a successful, empty comparison.
pub async fn compare_profile(
    catalog: &Catalog,
    provider: &dyn ProfileProvider,
    username: Option<&str>,
) -> AppResult<CompareResponse> {
    let username = username.map(str::trim).unwrap_or_default();
    if username.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a Letterboxd username before comparing".to_string(),
        ));
    }

    let watchlist = provider.fetch_list(username, ListKind::Watchlist).await?;
    let watched = provider.fetch_list(username, ListKind::Watched).await?;

    if watchlist.is_empty() {
        tracing::info!(username = %username, provider = provider.name(), "Watchlist is empty");
    }

    Ok(CompareResponse {
        username: username.to_string(),
        empty_watchlist: watchlist.is_empty(),
        watchlist: reconcile_list(catalog, &watchlist, ListKind::Watchlist),
        watched: reconcile_list(catalog, &watched, ListKind::Watched),
    })
}
