//! Listing page extraction
//!
//! Speaker cards on a listing page open a modal through a script link such as
//! `javascript:openRemoteModal('speakers/jane-doe', ...)`. Only those links are
//! considered; everything else on the page is ignored.

use crate::model::SpeakerIdentifier;
use crate::text::{clean_text, extract_slug};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Token a link target must carry to count as a speaker card
pub const MODAL_MARKER: &str = "openRemoteModal";

/// Path fragment a link target must carry to count as a speaker card
pub const SPEAKER_PATH: &str = "speakers/";

/// Extracts speaker identifiers from a listing page
///
/// Identifiers are returned in document order with duplicate slugs removed;
/// the first name seen for a slug wins. Links without a slug are skipped.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use speaker_harvest::crawler::extract_identifiers;
///
/// let html = Html::parse_document(
///     r#"<a href="javascript:openRemoteModal('speakers/jane-doe')">Jane Doe</a>"#,
/// );
/// let ids = extract_identifiers(&html);
/// assert_eq!(ids[0].slug, "jane-doe");
/// assert_eq!(ids[0].fallback_name, "Jane Doe");
/// ```
pub fn extract_identifiers(document: &Html) -> Vec<SpeakerIdentifier> {
    let mut identifiers = Vec::new();
    let mut seen = HashSet::new();

    let Ok(link_selector) = Selector::parse("a[href]") else {
        return identifiers;
    };

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !href.contains(MODAL_MARKER) || !href.contains(SPEAKER_PATH) {
            continue;
        }

        let Some(slug) = extract_slug(href) else {
            tracing::debug!("Speaker link without slug: {}", href);
            continue;
        };

        if !seen.insert(slug.clone()) {
            continue;
        }

        let name = link_name(&element);
        tracing::debug!("Found speaker {} (slug: {})", name, slug);
        identifiers.push(SpeakerIdentifier::new(slug, name));
    }

    identifiers
}

/// Best-effort display name: `aria-label`, then the link text
fn link_name(element: &ElementRef) -> String {
    if let Some(label) = element.value().attr("aria-label") {
        let label = clean_text(label);
        if !label.is_empty() {
            return label;
        }
    }

    clean_text(&element.text().collect::<String>())
}
