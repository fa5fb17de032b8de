//! Page arithmetic for the places list

use crate::types::Page;

/// Places per page served by the API
pub const PAGE_SIZE: u64 = 20;

/// Parse a user-supplied page number; anything unusable is page 1
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(1, u32::MAX as i64) as u32)
        .unwrap_or(1)
}

/// Navigation facts for one fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based
    pub page: u32,
    /// Total items, or the item count of this page if the API omitted it
    pub count: u64,
    /// Number of pages, at least 1
    pub total_pages: u64,
    /// A previous page exists
    pub has_previous: bool,
    /// The API reported a next page
    pub has_next: bool,
}

impl Pagination {
    /// Derive navigation from the page envelope
    pub fn from_page<T>(page: u32, data: &Page<T>) -> Self {
        let page = page.max(1);
        let count = match data.count {
            Some(c) if c > 0 => c,
            _ => data.results.len() as u64,
        };
        let total_pages = count.max(1).div_ceil(PAGE_SIZE).max(1);

        Self {
            page,
            count,
            total_pages,
            has_previous: page > 1,
            has_next: data.next.is_some(),
        }
    }

    /// Whether there is more than one page worth showing controls for
    pub fn show_controls(&self) -> bool {
        self.count > PAGE_SIZE
    }

    /// Previous page number, if any
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous.then(|| self.page - 1)
    }

    /// Next page number, if any
    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.page.saturating_add(1))
    }

    /// Footer line, e.g. `Page 2 of 5`
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
