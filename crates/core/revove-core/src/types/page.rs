//! Paginated list envelopes

use serde::{Deserialize, Serialize};

/// Paginated envelope used by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub results: Vec<T>,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Total item count across all pages
    #[serde(default)]
    pub count: Option<u64>,
}

/// A list endpoint body: either a bare array or a [`Page`]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    /// `[...]`
    Items(Vec<T>),
    /// `{"results": [...], ...}`
    Paged(Page<T>),
}

impl<T> ListBody<T> {
    /// The contained items
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Items(items) => items,
            ListBody::Paged(page) => page.results,
        }
    }
}
