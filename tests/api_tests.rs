use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use freewatch_api::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{CatalogEntry, ListKind, RawEntry},
    routes::{create_router, AppState},
    services::ProfileProvider,
};

/// In-memory profiles keyed by username; unknown users are not found
#[derive(Default)]
struct StubProvider {
    profiles: HashMap<String, (Vec<RawEntry>, Vec<RawEntry>)>,
}

impl StubProvider {
    fn with_profile(
        mut self,
        username: &str,
        watchlist: Vec<RawEntry>,
        watched: Vec<RawEntry>,
    ) -> Self {
        self.profiles.insert(username.to_string(), (watchlist, watched));
        self
    }
}

#[async_trait::async_trait]
impl ProfileProvider for StubProvider {
    async fn fetch_list(&self, username: &str, kind: ListKind) -> AppResult<Vec<RawEntry>> {
        let (watchlist, watched) = self
            .profiles
            .get(username)
            .ok_or_else(|| AppError::NotFound(format!("Letterboxd profile '{}'", username)))?;

        Ok(match kind {
            ListKind::Watchlist => watchlist.clone(),
            ListKind::Watched => watched.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn catalog_entry(title: &str, year: Option<i32>) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        year,
        href: Some(format!(
            "https://www.youtube.com/watch?v={}",
            title.to_lowercase().replace(' ', "-")
        )),
    }
}

fn film(name: &str, slug: &str) -> RawEntry {
    RawEntry::new(name)
        .with_url(format!("https://letterboxd.com/film/{}/", slug))
        .with_slug(slug)
}

fn create_test_server() -> TestServer {
    let catalog = Catalog::from_entries(vec![
        catalog_entry("Paddington", None),
        catalog_entry("Up", Some(2009)),
        catalog_entry("Dune", Some(2021)),
        catalog_entry("It", Some(1990)),
        catalog_entry("Annie", None),
    ]);

    let provider = StubProvider::default()
        .with_profile(
            "miseenkale",
            vec![
                film("Up (2010)", "up"),
                film("Dune (2021)", "dune-2021"),
                film("Dune (2022)", "dune-part-two"),
                film("It (2017)", "it-2017"),
                film("Paddington (2014)", "paddington"),
            ],
            vec![film("Annie (1982)", "annie")],
        )
        .with_profile("newbie", vec![], vec![film("Up (2009)", "up")]);

    let state = Arc::new(AppState::new(Arc::new(catalog), Arc::new(provider)));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() {
    let server = create_test_server();
    let id = uuid::Uuid::new_v4().to_string();
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_str(&id).unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id").to_str().unwrap(), id);
}

#[tokio::test]
async fn test_catalog_summary() {
    let server = create_test_server();
    let response = server.get("/api/v1/catalog").await;
    response.assert_status_ok();

    let summary: Value = response.json();
    assert_eq!(summary["total"], 5);
    assert_eq!(summary["with_year"], 3);
    assert_eq!(summary["without_year"], 2);
}

#[tokio::test]
async fn test_compare_classifies_both_lists() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/compare")
        .json(&json!({ "username": "miseenkale" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["username"], "miseenkale");
    assert_eq!(body["empty_watchlist"], false);

    let watchlist = &body["watchlist"];
    let matches = watchlist["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["catalog_title"], "Up");
    assert_eq!(matches[0]["catalog_year"], 2009);
    assert_eq!(matches[0]["list_year"], 2010);
    assert_eq!(matches[0]["list_url"], "https://letterboxd.com/film/up/");
    assert!(matches[0].get("reason").is_none());

    let ambiguous = watchlist["ambiguous_matches"].as_array().unwrap();
    assert_eq!(ambiguous.len(), 2);
    assert_eq!(ambiguous[0]["catalog_title"], "Dune");
    assert_eq!(ambiguous[0]["reason"], "multiple matches, slug: dune-2021");
    assert_eq!(ambiguous[1]["reason"], "multiple matches, slug: dune-part-two");

    // "It" 1990 vs 2017 has years on both sides: no output at all
    let near_misses = watchlist["near_misses"].as_array().unwrap();
    assert_eq!(near_misses.len(), 1);
    assert_eq!(near_misses[0]["catalog_title"], "Paddington");
    assert_eq!(near_misses[0]["catalog_year"], Value::Null);
    assert_eq!(near_misses[0]["reason"], "missing year");

    let watched = &body["watched"];
    assert!(watched["matches"].as_array().unwrap().is_empty());
    assert_eq!(watched["near_misses"].as_array().unwrap().len(), 1);
    assert_eq!(watched["near_misses"][0]["list_title"], "Annie");
}

#[tokio::test]
async fn test_compare_catalog_order_is_newest_first() {
    let server = create_test_server();
    let body: Value = server
        .post("/api/v1/compare")
        .json(&json!({ "username": "miseenkale" }))
        .await
        .json();

    // Dune (2021) sorts ahead of Up (2009) in the catalog, so its results come first
    let ambiguous = body["watchlist"]["ambiguous_matches"].as_array().unwrap();
    let matches = body["watchlist"]["matches"].as_array().unwrap();
    assert_eq!(ambiguous[0]["catalog_year"], 2021);
    assert_eq!(matches[0]["catalog_year"], 2009);
}

#[tokio::test]
async fn test_compare_empty_watchlist() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/compare")
        .json(&json!({ "username": "newbie" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["empty_watchlist"], true);
    assert!(body["watchlist"]["matches"].as_array().unwrap().is_empty());
    assert!(body["watchlist"]["ambiguous_matches"].as_array().unwrap().is_empty());
    assert!(body["watchlist"]["near_misses"].as_array().unwrap().is_empty());
    assert_eq!(body["watched"]["matches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_compare_unknown_profile_is_404() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/compare")
        .json(&json!({ "username": "ghost" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_compare_without_username_is_400() {
    let server = create_test_server();

    let response = server.post("/api/v1/compare").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/compare")
        .json(&json!({ "username": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}
