//! Review keyword search: request building, place scoping and highlighting

use regex::RegexBuilder;

use crate::types::{Place, PlaceId};

/// Number of reviews the API returns per search
pub const REVIEW_PAGE_LIMIT: usize = 20;

/// Parameters for `GET /search/reviews/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Keyword to look for in review text
    pub q: String,
    /// Restrict to one place by id
    pub place_id: Option<PlaceId>,
    /// Restrict to places by name, any of
    pub place_names: Vec<String>,
}

impl ReviewQuery {
    /// Query for a keyword across all places
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Scope to a single place id
    pub fn with_place_id(mut self, id: PlaceId) -> Self {
        self.place_id = Some(id);
        self
    }

    /// Scope to an additional place name
    pub fn with_place_name(mut self, name: impl Into<String>) -> Self {
        self.place_names.push(name.into());
        self
    }

    /// URL query pairs; `place_name` repeats once per non-blank name
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone())];
        if let Some(id) = self.place_id {
            pairs.push(("place", id.to_string()));
        }
        for name in &self.place_names {
            let name = name.trim();
            if !name.is_empty() {
                pairs.push(("place_name", name.to_string()));
            }
        }
        pairs
    }
}

/// Places picked from the suggestion list, in pick order, unique by id
#[derive(Debug, Clone, Default)]
pub struct SelectedPlaces {
    places: Vec<Place>,
}

impl SelectedPlaces {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place; returns false if it was already selected
    pub fn add(&mut self, place: Place) -> bool {
        if self.contains(place.id) {
            return false;
        }
        self.places.push(place);
        true
    }

    /// Remove by id; returns the removed place
    pub fn remove(&mut self, id: PlaceId) -> Option<Place> {
        let idx = self.places.iter().position(|p| p.id == id)?;
        Some(self.places.remove(idx))
    }

    /// Whether `id` is selected
    pub fn contains(&self, id: PlaceId) -> bool {
        self.places.iter().any(|p| p.id == id)
    }

    /// Selected places
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Number of selected places
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Names to scope a review search to.
    ///
    /// Falls back to the raw place text the user typed when nothing was picked.
    pub fn scope_names(&self, typed_place: &str) -> Vec<String> {
        if !self.places.is_empty() {
            return self.places.iter().map(|p| p.name.clone()).collect();
        }
        let typed = typed_place.trim();
        if typed.is_empty() {
            Vec::new()
        } else {
            vec![typed.to_string()]
        }
    }
}

/// Build the review search request for a form submission.
///
/// `None` means the keyword was blank: show no results, do not call the API.
pub fn build_review_query(
    keyword: &str,
    selected: &SelectedPlaces,
    typed_place: &str,
) -> Option<ReviewQuery> {
    let q = keyword.trim();
    if q.is_empty() {
        return None;
    }
    Some(ReviewQuery {
        q: q.to_string(),
        place_id: None,
        place_names: selected.scope_names(typed_place),
    })
}

/// A run of review text, either matching the search term or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text between matches
    Plain(&'a str),
    /// Case-insensitive occurrence of the term
    Match(&'a str),
}

impl<'a> Segment<'a> {
    /// The underlying text
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Match(s) => *s,
        }
    }
}

/// Split `text` around case-insensitive literal occurrences of `term`.
///
/// `term` is trimmed first, so `" latte "` highlights `latte` only.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    let term = term.trim();
    if term.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Could not build highlight pattern for {:?}: {}", term, e);
            return vec![Segment::Plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Match(m.as_str()));
        last = m.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Summary line shown above review results
pub fn result_note(count: usize, cap: usize) -> String {
    if count >= cap {
        format!(
            "Showing first {} results (API paginated). Narrow your keyword for deeper matches.",
            cap
        )
    } else {
        format!(
            "Showing {} result{}.",
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}
