//! Review records returned by keyword search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlaceId;

/// Customer review text attached to a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review id
    pub id: u64,
    /// Owning place id
    pub place: PlaceId,
    /// Owning place name
    #[serde(default)]
    pub place_name: String,
    /// Id assigned by the listing source
    #[serde(default)]
    pub google_review_id: String,
    /// Author display name
    #[serde(default)]
    pub author_name: String,
    /// Star rating
    pub rating: u8,
    /// Review body
    #[serde(default)]
    pub text: String,
    /// Language code
    #[serde(default)]
    pub language: String,
    /// When the review was written
    pub created_at: DateTime<Utc>,
    /// When the review was fetched into the catalog
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Creation date formatted as `YYYY-MM-DD`
    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}
