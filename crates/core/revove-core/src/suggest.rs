//! Place-name autocomplete
//!
//! The server's substring search is authoritative. Only when it finds nothing
//! are the cached places ranked locally by [`similarity`].

use async_trait::async_trait;
use tracing::debug;

use crate::nlp::similarity;
use crate::types::Place;
use crate::Result;

/// Minimum score a cached place needs to be suggested by the local fallback
pub const SIMILARITY_THRESHOLD: f64 = 0.55;

/// Maximum number of locally ranked suggestions
pub const MAX_SUGGESTIONS: usize = 5;

/// Server-side place name search
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Places whose name or address contains `term`, in server order
    async fn search_places_by_name(&self, term: &str) -> Result<Vec<Place>>;
}

/// Suggest places for a typed query.
///
/// A blank query yields nothing and never reaches the server. Upstream errors
/// are returned to the caller untouched.
pub async fn suggest_places<S>(query: &str, search: &S, all_places: &[Place]) -> Result<Vec<Place>>
where
    S: PlaceSearch + ?Sized,
{
    let term = query.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let found = search.search_places_by_name(term).await?;
    if !found.is_empty() {
        debug!(term, count = found.len(), "using server matches");
        return Ok(found);
    }

    let ranked = rank_locally(term, all_places);
    debug!(term, count = ranked.len(), "server had no matches, ranked cache");
    Ok(ranked)
}

/// Score every place against `term`, keep those at or above the threshold
/// and return the best [`MAX_SUGGESTIONS`], highest first.
pub fn rank_locally(term: &str, all_places: &[Place]) -> Vec<Place> {
    let mut scored: Vec<(f64, &Place)> = all_places
        .iter()
        .map(|p| (similarity(term, &p.name), p))
        .filter(|(score, _)| *score >= SIMILARITY_THRESHOLD)
        .collect();

    // sort_by is stable, equal scores keep catalog order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, p)| p.clone())
        .collect()
}
