/// Profile list providers
///
/// A provider turns a username into the raw entries of one of that user's lists.
/// The matcher never talks to a provider directly: the compare service fetches,
/// then hands the entries over for extraction and reconciliation.
use crate::{
    error::AppResult,
    models::{ListKind, RawEntry},
};

pub mod letterboxd;

pub use letterboxd::LetterboxdProvider;

/// Trait for sources of user movie lists
///
/// Implementations must keep "profile does not exist" (`AppError::NotFound`)
/// apart from "profile exists but the list is empty" (`Ok(vec![])`).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch every entry of the given list, in the order the source lists them
    async fn fetch_list(&self, username: &str, kind: ListKind) -> AppResult<Vec<RawEntry>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
