//! Pure string helpers shared by the extractors
//!
//! Nothing here touches the network or the DOM, so each function can be
//! tested against malformed input in isolation.

use once_cell::sync::Lazy;
use regex::Regex;

/// `speakers/<slug>` inside a modal-opening script reference; the slug ends at a quote
static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"speakers/([^'"]+)"#).expect("valid slug pattern"));

/// `HH:MM - HH:MM` with a hyphen or en-dash
static TIME_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2})\s*[–-]\s*(\d{2}:\d{2})").expect("valid time range pattern")
});

/// `page=<value>` as a query parameter (not e.g. `subpage=`)
static PAGE_PARAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[?&;])page=([^&#]*)").expect("valid page pattern"));

/// Entities the site leaves escaped in text, decoded in this order
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Decodes the common HTML entities and collapses whitespace
///
/// # Example
///
/// ```
/// use speaker_harvest::text::clean_text;
///
/// assert_eq!(clean_text("  R&amp;D\n   Lead "), "R&D Lead");
/// ```
pub fn clean_text(text: &str) -> String {
    // Decode before collapsing so runs of `&nbsp;` become a single space.
    // Collapsing first would keep "A&nbsp;&nbsp;B" as "A  B".
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a job title and drops the trailing comma the site puts before the company
pub fn clean_position(text: &str) -> String {
    clean_text(text).trim_end_matches(',').trim_end().to_string()
}

/// Formats a session time as `HH:MM – HH:MM`
///
/// Text that does not contain a time range is returned cleaned but otherwise
/// unchanged (e.g. `TBD`).
pub fn normalize_time_range(text: &str) -> String {
    match TIME_RANGE_PATTERN.captures(text) {
        Some(caps) => format!("{} – {}", &caps[1], &caps[2]),
        None => clean_text(text),
    }
}

/// Extracts the speaker slug from a link target
///
/// Returns `None` when there is no `speakers/` segment or it is empty.
pub fn extract_slug(target: &str) -> Option<String> {
    SLUG_PATTERN
        .captures(target)
        .map(|caps| caps[1].trim().to_string())
        .filter(|slug| !slug.is_empty())
}

/// Extracts the integer value of a `page=` query parameter
pub fn extract_page_number(href: &str) -> Option<u32> {
    PAGE_PARAM_PATTERN
        .captures(href)
        .and_then(|caps| caps[1].trim().parse().ok())
}
