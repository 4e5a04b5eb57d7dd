//! Speaker data model
//!
//! - `SpeakerIdentifier`: what the listing pages reveal about a speaker
//! - `SpeakerRecord`: the flattened profile assembled from a detail page
//! - `COLUMNS`: the fixed CSV column order

use std::hash::{Hash, Hasher};

/// CSV column order. Downstream consumers depend on it; do not reorder.
pub const COLUMNS: [&str; 13] = [
    "speaker_url",
    "speaker_slug",
    "name",
    "position",
    "company",
    "country",
    "description",
    "social_network",
    "session_date",
    "session_time",
    "session_location",
    "session_topic_link",
    "session_topic_title",
];

/// Separator used when flattening social links into one column
pub const SOCIAL_SEPARATOR: &str = "; ";

/// A speaker reference found on a listing page
///
/// Equality and hashing use the slug only; the name is a display fallback.
#[derive(Debug, Clone, Eq)]
pub struct SpeakerIdentifier {
    pub slug: String,
    pub fallback_name: String,
}

impl SpeakerIdentifier {
    pub fn new(slug: impl Into<String>, fallback_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            fallback_name: fallback_name.into(),
        }
    }
}

impl PartialEq for SpeakerIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}

impl Hash for SpeakerIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slug.hash(state);
    }
}

/// One speaker's profile and primary session
///
/// Every field defaults to empty; a missing element on the detail page is
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerRecord {
    pub slug: String,
    pub detail_url: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub country: String,
    pub description: String,
    pub social_links: Vec<String>,
    pub session_date: String,
    pub session_time: String,
    pub session_location: String,
    pub session_topic_link: String,
    pub session_topic_title: String,
}

impl SpeakerRecord {
    /// Social links joined into the single `social_network` column
    pub fn social_network(&self) -> String {
        self.social_links.join(SOCIAL_SEPARATOR)
    }

    /// Uses the listing name when the detail page had none
    pub fn apply_name_fallback(&mut self, identifier: &SpeakerIdentifier) {
        if self.name.is_empty() && !identifier.fallback_name.is_empty() {
            self.name = identifier.fallback_name.clone();
        }
    }

    pub fn has_session(&self) -> bool {
        !self.session_date.is_empty()
    }

    /// Field values in `COLUMNS` order
    pub fn to_row(&self) -> [String; 13] {
        [
            self.detail_url.clone(),
            self.slug.clone(),
            self.name.clone(),
            self.position.clone(),
            self.company.clone(),
            self.country.clone(),
            self.description.clone(),
            self.social_network(),
            self.session_date.clone(),
            self.session_time.clone(),
            self.session_location.clone(),
            self.session_topic_link.clone(),
            self.session_topic_title.clone(),
        ]
    }

    /// Rebuilds a record from a row in `COLUMNS` order
    ///
    /// Missing trailing cells are treated as empty.
    pub fn from_row<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = cells.into_iter().map(str::to_string);
        let mut next = || cells.next().unwrap_or_default();

        let detail_url = next();
        let slug = next();
        let name = next();
        let position = next();
        let company = next();
        let country = next();
        let description = next();
        let social_links = next()
            .split(SOCIAL_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            slug,
            detail_url,
            name,
            position,
            company,
            country,
            description,
            social_links,
            session_date: next(),
            session_time: next(),
            session_location: next(),
            session_topic_link: next(),
            session_topic_title: next(),
        }
    }
}
