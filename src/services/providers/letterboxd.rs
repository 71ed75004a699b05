/// Letterboxd profile provider
///
/// Letterboxd has no public list API, so lists are read from the paginated
/// profile pages:
/// 1. Watchlist: /{username}/watchlist/page/{n}/
/// 2. Watched:   /{username}/films/page/{n}/
///
/// Each page renders one poster element per film carrying the slug, display
/// name and link as data attributes.
use crate::{
    error::{AppError, AppResult},
    models::{ListKind, RawEntry},
    services::providers::ProfileProvider,
};
use once_cell::sync::Lazy;
use reqwest::{Client as HttpClient, StatusCode};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration;

const USER_AGENT: &str = concat!("freewatch-api/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

static POSTER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[data-item-slug], div[data-film-slug]").expect("poster selector is valid")
});
static POSTER_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[alt]").expect("image selector is valid"));

const NAME_ATTRIBUTES: [&str; 3] = [
    "data-item-full-display-name",
    "data-item-name",
    "data-film-name",
];
const LINK_ATTRIBUTES: [&str; 2] = ["data-item-link", "data-target-link"];
const YEAR_ATTRIBUTES: [&str; 2] = ["data-item-release-year", "data-film-release-year"];

#[derive(Clone)]
pub struct LetterboxdProvider {
    http_client: HttpClient,
    base_url: String,
    max_retries: u32,
    max_pages: u32,
    retry_backoff: Duration,
}

impl LetterboxdProvider {
    pub fn new(
        base_url: String,
        timeout: Duration,
        max_retries: u32,
        max_pages: u32,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            max_pages: max_pages.max(1),
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Overrides the base delay between retries; attempt `n` waits `n * backoff`
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    fn page_url(&self, username: &str, kind: ListKind, page: u32) -> String {
        let list = match kind {
            ListKind::Watchlist => "watchlist",
            ListKind::Watched => "films",
        };
        format!("{}/{}/{}/page/{}/", self.base_url, username, list, page)
    }

    /// GETs one page, retrying transport errors and retryable statuses
    ///
    /// A 404 on the first page means the profile does not exist. On later
    /// pages it only means the list has ended, reported as `Ok(None)`.
    async fn fetch_page(
        &self,
        username: &str,
        url: &str,
        page: u32,
    ) -> AppResult<Option<String>> {
        let mut attempt = 0;

        loop {
            let failure = match self.http_client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(Some(response.text().await?));
                }
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    if page > 1 {
                        tracing::debug!(
                            url = %url,
                            page,
                            "Letterboxd page not found, list ended"
                        );
                        return Ok(None);
                    }
                    return Err(AppError::NotFound(format!(
                        "Letterboxd profile '{}'",
                        username
                    )));
                }
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable(status) || attempt >= self.max_retries {
                        return Err(AppError::ExternalApi(format!(
                            "Letterboxd returned status {} for {}",
                            status, url
                        )));
                    }
                    status.to_string()
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(e.into());
                    }
                    e.to_string()
                }
            };

            attempt += 1;
            tracing::warn!(
                url = %url,
                attempt,
                max_retries = self.max_retries,
                error = %failure,
                "Letterboxd request failed, retrying"
            );
            tokio::time::sleep(self.retry_backoff * attempt).await;
        }
    }
}

#[async_trait::async_trait]
impl ProfileProvider for LetterboxdProvider {
    async fn fetch_list(&self, username: &str, kind: ListKind) -> AppResult<Vec<RawEntry>> {
        if !is_valid_username(username) {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not a valid Letterboxd username",
                username
            )));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut pages = 0;

        for page in 1..=self.max_pages {
            let url = self.page_url(username, kind, page);
            let Some(html) = self.fetch_page(username, &url, page).await? else {
                break;
            };
            pages = page;

            let added = merge_new_entries(
                &mut seen,
                &mut entries,
                parse_list_page(&html, &self.base_url),
            );

            tracing::debug!(
                username = %username,
                list = %kind,
                page,
                added,
                "Fetched Letterboxd page"
            );

            if added == 0 {
                break;
            }
        }

        tracing::info!(
            username = %username,
            list = %kind,
            pages,
            entries = entries.len(),
            provider = self.name(),
            "Profile list fetched"
        );

        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "letterboxd"
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Letterboxd usernames are ASCII letters, digits and underscores
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Appends entries whose slug has not been seen yet, returning how many were added
fn merge_new_entries(
    seen: &mut HashSet<String>,
    entries: &mut Vec<RawEntry>,
    page: Vec<RawEntry>,
) -> usize {
    let before = entries.len();
    for entry in page {
        let key = entry.slug.clone().unwrap_or_else(|| entry.name.clone());
        if seen.insert(key) {
            entries.push(entry);
        }
    }
    entries.len() - before
}

fn first_attribute<'a>(poster: &ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| poster.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Extracts the film entries rendered on one list page
pub fn parse_list_page(html: &str, base_url: &str) -> Vec<RawEntry> {
    let document = Html::parse_document(html);

    document
        .select(&POSTER)
        .filter_map(|poster| {
            let slug = first_attribute(&poster, &["data-item-slug", "data-film-slug"])?;

            let name = first_attribute(&poster, &NAME_ATTRIBUTES).or_else(|| {
                poster
                    .select(&POSTER_IMAGE)
                    .filter_map(|img| img.value().attr("alt"))
                    .map(str::trim)
                    .find(|alt| !alt.is_empty())
            })?;

            let link = first_attribute(&poster, &LINK_ATTRIBUTES)
                .map(str::to_string)
                .unwrap_or_else(|| format!("/film/{}/", slug));

            let mut entry = RawEntry::new(name)
                .with_url(absolute_url(base_url, &link))
                .with_slug(slug);
            entry.year = first_attribute(&poster, &YEAR_ATTRIBUTES).and_then(|y| y.parse().ok());

            Some(entry)
        })
        .collect()
}

fn absolute_url(base_url: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            link.trim_start_matches('/')
        )
    }
}
