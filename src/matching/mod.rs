//! Title matching engine
//!
//! Raw entries from the catalog and from a profile list are turned into
//! [`NormalizedRecord`](crate::models::NormalizedRecord)s by [`extract`], paired up by
//! [`reconcile`] and projected into the response schema by [`format`].

pub mod extract;
pub mod format;
pub mod normalize;
pub mod reconcile;

pub use extract::extract;
pub use format::format_results;
pub use normalize::normalize;
pub use reconcile::{reconcile, MatchResult, Reconciliation};
