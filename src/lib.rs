//! Matches a Letterboxd watchlist against the YouTube free-with-ads catalog.
//!
//! The matching engine lives in [`matching`]; everything else fetches its
//! inputs and serves its results over HTTP.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
