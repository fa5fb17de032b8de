//! Catalog entries and place detail

use serde::{Deserialize, Serialize};

/// Opaque place identifier assigned by the API
pub type PlaceId = u64;

/// A restaurant or café in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique id
    pub id: PlaceId,
    /// Display name
    pub name: String,
    /// Street address, absent for some listings
    #[serde(default)]
    pub address: Option<String>,
    /// City
    #[serde(default)]
    pub city: String,
    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of ratings reported by the listing source
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    /// Number of reviews stored for this place
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl Place {
    /// Minimal place with only id and name set
    pub fn new(id: PlaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            city: String::new(),
            rating: None,
            user_ratings_total: None,
            review_count: None,
        }
    }

    /// Set the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Address if present and not blank
    pub fn display_address(&self) -> Option<&str> {
        self.address.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// A ranked item recommendation attached to a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommendation id
    pub id: u64,
    /// Recommended item text
    pub text: String,
    /// Position, lowest first
    pub rank: u32,
    /// Model confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Where the recommendation came from
    #[serde(default)]
    pub source: String,
}

impl Recommendation {
    /// Confidence as a whole percentage, e.g. `Some(87)`
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence.map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
    }
}

/// A single place as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    /// Listing fields
    #[serde(flatten)]
    pub place: Place,
    /// Item recommendations
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl PlaceDetail {
    /// Order recommendations by ascending rank, keeping ties stable
    pub fn sort_recommendations(&mut self) {
        self.recommendations.sort_by_key(|r| r.rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_deserialize_nulls() {
        let json = r#"{
            "id": 7,
            "name": "The Rocket Bakery",
            "address": null,
            "city": "Bozeman",
            "rating": null,
            "user_ratings_total": null,
            "review_count": 12
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.id, 7);
        assert_eq!(place.name, "The Rocket Bakery");
        assert!(place.address.is_none());
        assert_eq!(place.review_count, Some(12));
        assert!(place.display_address().is_none());
    }

    #[test]
    fn test_blank_address_not_displayed() {
        let place = Place::new(1, "Cafe").with_address("   ");
        assert!(place.display_address().is_none());
        let place = Place::new(1, "Cafe").with_address("1 Main St");
        assert_eq!(place.display_address(), Some("1 Main St"));
    }

    #[test]
    fn test_detail_flatten_and_sort() {
        let json = r#"{
            "id": 3,
            "name": "Rocky Creek Coffee",
            "city": "Bozeman",
            "recommendations": [
                {"id": 11, "text": "Mocha", "rank": 2, "confidence": 0.5, "source": "llm"},
                {"id": 10, "text": "Latte", "rank": 1, "confidence": null, "source": "llm"}
            ]
        }"#;
        let mut detail: PlaceDetail = serde_json::from_str(json).unwrap();
        detail.sort_recommendations();
        assert_eq!(detail.place.name, "Rocky Creek Coffee");
        assert_eq!(detail.recommendations[0].text, "Latte");
        assert_eq!(detail.recommendations[1].confidence_percent(), Some(50));
        assert_eq!(detail.recommendations[0].confidence_percent(), None);
    }

    #[test]
    fn test_detail_without_recommendations() {
        let detail: PlaceDetail = serde_json::from_str(r#"{"id": 1, "name": "X"}"#).unwrap();
        assert!(detail.recommendations.is_empty());
    }
}
