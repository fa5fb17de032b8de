//! Revove Core
//!
//! Client-side building blocks for browsing local places and searching their
//! reviews through the Revove REST API:
//!
//! - [`ApiClient`]: typed HTTP client bound to a base URL at startup
//! - [`similarity`]: case-insensitive edit-distance score in `[0, 1]`
//! - [`suggest_places`]: place autocomplete with a fuzzy local fallback
//! - [`SuggestionSession`]: debounced, last-query-wins autocomplete state
//! - review search helpers (scoping, highlighting) and page arithmetic
//!
//! # Example
//!
//! ```no_run
//! use revove_core::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new(ClientConfig::from_env())?;
//!     let catalog = client.fetch_places().await?;
//!     let suggestions = suggest_places("rocket", &client, &catalog).await?;
//!     for place in suggestions {
//!         println!("{}", place.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod nlp;
pub mod pagination;
pub mod review_search;
pub mod session;
pub mod suggest;
pub mod types;

// Re-export main types
pub use client::ApiClient;
pub use config::{load_env, ClientConfig};
pub use error::{Result, RevoveError};
pub use nlp::similarity::{levenshtein, similarity};
pub use pagination::{parse_page, Pagination, PAGE_SIZE};
pub use review_search::{
    build_review_query, highlight, result_note, ReviewQuery, Segment, SelectedPlaces,
    REVIEW_PAGE_LIMIT,
};
pub use session::{SuggestionSession, SuggestionState, UpdateOutcome, UpstreamErrorPolicy};
pub use suggest::{rank_locally, suggest_places, PlaceSearch, MAX_SUGGESTIONS, SIMILARITY_THRESHOLD};
pub use types::*;
