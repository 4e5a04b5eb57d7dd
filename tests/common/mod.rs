//! Shared fixtures for the wiremock-driven integration tests

#![allow(dead_code)]

use speaker_harvest::config::{Config, CrawlerConfig, HttpConfig, OutputConfig, SiteConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/forums/overview/speakers";

/// Creates a test configuration pointing every endpoint at the mock server
pub fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    let defaults = SiteConfig::default();
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            listing_url: format!("{}{}", base_url, LISTING_PATH),
            detail_url: format!("{}/speakers", base_url),
            listing_params: defaults.listing_params,
            detail_params: defaults.detail_params,
        },
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            max_attempts: 2,
            backoff_unit_ms: 1, // Very short for testing
        },
        crawler: CrawlerConfig {
            request_delay_ms: 0,
            max_pages: None,
        },
        output: OutputConfig {
            csv_path: csv_path.to_string(),
            log_path: None,
        },
    }
}

/// Renders a listing page with speaker cards and optional pager links up to `last_page`
pub fn listing_page(speakers: &[(&str, &str)], last_page: Option<u32>) -> String {
    let mut body = String::from(r#"<html><body><div class="m-speakers-list__items">"#);
    for (slug, name) in speakers {
        body.push_str(&format!(
            r#"<div class="m-speakers-list__items__item">
                 <a href="javascript:openRemoteModal('speakers/{}','speaker-modal')" aria-label="{}">
                   <img src="/img/{}.jpg">
                 </a>
               </div>"#,
            slug, name, slug
        ));
    }
    body.push_str("</div>");

    if let Some(last) = last_page {
        body.push_str(r#"<div class="pagination">"#);
        for page in 1..=last {
            body.push_str(&format!(
                r#"<a href="?sortby=personSurname%20asc&amp;searchgroup=A2A12251-speakers&amp;page={}">{}</a>"#,
                page, page
            ));
        }
        body.push_str("</div>");
    }

    body.push_str("</body></html>");
    body
}

/// Renders a detail page with every field present
pub fn detail_page(name: &str, company: &str) -> String {
    format!(
        r#"<html><body>
        <div class="m-speaker-entry__item">
            <h2 class="m-speaker-entry__item__title">{name}</h2>
            <div class="m-speaker-entry__item__details">
                <span class="m-speaker-entry__item__details__position">Chief Officer,</span>
                <span class="m-speaker-entry__item__details__company">{company}</span>
                <div class="m-speaker-entry__item__details__company__country">United Kingdom</div>
            </div>
            <div class="m-speaker-entry__item__description"><p>{name} works at {company}.</p></div>
            <ul class="m-speaker-entry__item__social">
                <li><a href="https://twitter.com/{company}">Twitter</a></li>
                <li><a href="https://www.linkedin.com/company/{company}">LinkedIn</a></li>
            </ul>
            <div class="m-speaker-entry__item__sessions__list__item__date">Tuesday 9 September 2025</div>
            <div class="m-speaker-entry__item__sessions__list__item__time">09:00-09:30</div>
            <div class="m-speaker-entry__item__details__location">Main Stage</div>
            <a class="m-speaker-entry__item__sessions__list__item__title" href="/sessions/{company}-keynote">{company} Keynote</a>
        </div>
        </body></html>"#,
        name = name,
        company = company
    )
}

/// Mounts a listing page for the given page number, expected to be requested `times` times
pub async fn mount_listing(server: &MockServer, page: u32, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", page.to_string()))
        .and(query_param("searchgroup", "A2A12251-speakers"))
        .and(query_param("sortby", "personSurname asc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts a detail page for a slug
pub async fn mount_detail(server: &MockServer, slug: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/speakers/{}", slug)))
        .and(query_param("searchgroup", "libraryentry-speakers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a listing page that must never be requested
pub async fn forbid_listing(server: &MockServer, page: u32) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[], None)))
        .expect(0)
        .mount(server)
        .await;
}
