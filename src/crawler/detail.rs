//! Detail page extraction
//!
//! This module turns one speaker's profile page into a [`SpeakerRecord`]:
//! - Bio fields (name, position, company, country, description)
//! - Social links from the profile's social list
//! - The first listed session (date, time, location, topic)
//!
//! Every lookup is optional. A missing element leaves its field empty.

use crate::config::SiteConfig;
use crate::model::SpeakerRecord;
use crate::text::{clean_position, clean_text, normalize_time_range};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const NAME: &str = "h2.m-speaker-entry__item__title";
const DETAILS: &str = "div.m-speaker-entry__item__details";
const POSITION: &str = "span.m-speaker-entry__item__details__position";
const COMPANY: &str = "span.m-speaker-entry__item__details__company";
const COUNTRY: &str = "div.m-speaker-entry__item__details__company__country";
const DESCRIPTION: &str = "div.m-speaker-entry__item__description";
const SOCIAL_LIST: &str = "ul.m-speaker-entry__item__social";
const SESSION_DATE: &str = "div.m-speaker-entry__item__sessions__list__item__date";
const SESSION_TIME: &str = "div.m-speaker-entry__item__sessions__list__item__time";
const SESSION_LOCATION: &str = "div.m-speaker-entry__item__details__location";
const SESSION_TOPIC: &str = "a.m-speaker-entry__item__sessions__list__item__title";

/// First session listed on a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo {
    pub date: String,
    pub time: String,
    pub location: String,
    pub topic_link: String,
    pub topic_title: String,
}

/// Builds a speaker record from a detail page
///
/// `slug` and the detail URL are always set, even if the page is empty.
///
/// # Arguments
///
/// * `document` - The parsed detail page
/// * `slug` - The speaker's slug from the listing
/// * `site` - Site endpoints, used for the detail URL and relative topic links
pub fn extract_record(document: &Html, slug: &str, site: &SiteConfig) -> SpeakerRecord {
    let mut record = SpeakerRecord {
        slug: slug.to_string(),
        detail_url: site.detail_url_for(slug),
        ..Default::default()
    };

    let root = document.root_element();

    if let Some(name) = first_match(&root, NAME) {
        record.name = element_text(&name);
    }

    if let Some(details) = first_match(&root, DETAILS) {
        if let Some(position) = first_match(&details, POSITION) {
            record.position = clean_position(&raw_text(&position));
        }
        if let Some(company) = first_match(&details, COMPANY) {
            record.company = element_text(&company);
        }
        if let Some(country) = first_match(&details, COUNTRY) {
            record.country = element_text(&country);
        }
    }

    if let Some(description) = first_match(&root, DESCRIPTION) {
        record.description = element_text(&description);
    }

    record.social_links = extract_social_links(&root);

    let session = extract_session(&root, &site.base_url);
    record.session_date = session.date;
    record.session_time = session.time;
    record.session_location = session.location;
    record.session_topic_link = session.topic_link;
    record.session_topic_title = session.topic_title;

    record
}

/// Collects the first link of every item in the social list, in document order
fn extract_social_links(root: &ElementRef) -> Vec<String> {
    let Some(list) = first_match(root, SOCIAL_LIST) else {
        return Vec::new();
    };
    let (Ok(item_selector), Ok(link_selector)) = (Selector::parse("li"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    list.select(&item_selector)
        .filter_map(|item| item.select(&link_selector).next())
        .filter_map(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the primary session block
fn extract_session(root: &ElementRef, base_url: &str) -> SessionInfo {
    let mut session = SessionInfo::default();

    if let Some(date) = first_match(root, SESSION_DATE) {
        session.date = element_text(&date);
    }
    if let Some(time) = first_match(root, SESSION_TIME) {
        session.time = normalize_time_range(&raw_text(&time));
    }
    if let Some(location) = first_match(root, SESSION_LOCATION) {
        session.location = element_text(&location);
    }
    if let Some(topic) = first_match(root, SESSION_TOPIC) {
        if let Some(href) = topic.value().attr("href") {
            session.topic_link = absolutize(href.trim(), base_url);
        }
        session.topic_title = element_text(&topic);
    }

    session
}

/// Resolves a relative link against the site base; absolute links pass through
pub fn absolutize(href: &str, base_url: &str) -> String {
    if href.is_empty() || href.starts_with("http") {
        return href.to_string();
    }

    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::debug!("Could not resolve {} against {}: {}", href, base_url, e);
            href.to_string()
        }
    }
}

fn first_match<'a>(scope: &ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn raw_text(element: &ElementRef) -> String {
    element.text().collect()
}

fn element_text(element: &ElementRef) -> String {
    clean_text(&raw_text(element))
}
