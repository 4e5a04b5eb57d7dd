//! Pagination boundary detection
//!
//! The listing does not expose a total; the highest `page=` number linked
//! from the current page is the best available estimate of the last page.

use crate::text::extract_page_number;
use scraper::{Html, Selector};

/// What a listing page says about the pages after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationHint {
    /// A higher page number is linked
    More { last_page: u32 },
    /// Page links exist but none goes past the current page
    Exhausted { last_page: u32 },
    /// No page-numbered links on the page at all
    NoEvidence,
}

impl PaginationHint {
    pub fn has_more(&self) -> bool {
        matches!(self, PaginationHint::More { .. })
    }
}

/// Highest `page=` number among the page's links
pub fn max_linked_page(document: &Html) -> Option<u32> {
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(extract_page_number)
        .max()
}

/// Classifies the pagination evidence relative to `current_page`
pub fn inspect_pagination(document: &Html, current_page: u32) -> PaginationHint {
    match max_linked_page(document) {
        Some(last_page) if current_page < last_page => PaginationHint::More { last_page },
        Some(last_page) => PaginationHint::Exhausted { last_page },
        None => PaginationHint::NoEvidence,
    }
}

/// Whether a page after `current_page` is linked
///
/// Absence of page links counts as "no more pages".
pub fn has_more(document: &Html, current_page: u32) -> bool {
    inspect_pagination(document, current_page).has_more()
}
