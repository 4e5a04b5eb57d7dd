//! Harvest coordinator - two-stage crawl orchestration
//!
//! This module drives the whole run:
//! - Listing stage: walk the paginated directory collecting speaker slugs
//! - Detail stage: fetch each speaker's profile page into a record
//!
//! Both stages are strictly sequential and sleep a fixed delay after every
//! request. The HTTP client lives inside the [`Harvester`] and is released
//! when it is dropped, whichever way the run ends.

use crate::config::Config;
use crate::crawler::detail::extract_record;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::extract_identifiers;
use crate::crawler::pagination::{inspect_pagination, PaginationHint};
use crate::model::{SpeakerIdentifier, SpeakerRecord};
use crate::HarvestError;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

/// Why the listing stage stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStop {
    /// A listing page could not be fetched
    FetchFailed { page: u32 },
    /// A listing page had no speaker links
    EmptyPage { page: u32 },
    /// The pagination links end at this page
    LastPage { page: u32 },
    /// No pagination links and nothing new on this page
    NoNewSpeakers { page: u32 },
    /// The configured page cap was reached
    PageLimit { page: u32 },
}

/// Result of the listing stage
#[derive(Debug, Clone)]
pub struct ListingOutcome {
    /// Unique identifiers in first-seen order
    pub identifiers: Vec<SpeakerIdentifier>,
    /// Number of listing pages requested
    pub pages_visited: u32,
    pub stop: ListingStop,
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub identifiers: Vec<SpeakerIdentifier>,
    pub records: Vec<SpeakerRecord>,
    pub pages_visited: u32,
    pub listing_stop: ListingStop,
}

impl HarvestOutcome {
    /// Identifiers whose detail page could not be fetched
    pub fn skipped(&self) -> usize {
        self.identifiers.len() - self.records.len()
    }
}

/// Owns the configuration and HTTP client for one run
pub struct Harvester {
    config: Config,
    fetcher: Fetcher,
    request_delay: Duration,
}

impl Harvester {
    /// Creates a harvester and its HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a harvester around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Self {
        let request_delay = config.crawler.request_delay();
        Self {
            config,
            fetcher,
            request_delay,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the listing stage and, if it found anyone, the detail stage
    pub async fn run(&self) -> HarvestOutcome {
        tracing::info!("=== Stage 1: collecting speakers from listing ===");
        let listing = self.collect_identifiers().await;

        if listing.identifiers.is_empty() {
            tracing::warn!("No speakers found on the listing; skipping detail stage");
            return HarvestOutcome {
                identifiers: Vec::new(),
                records: Vec::new(),
                pages_visited: listing.pages_visited,
                listing_stop: listing.stop,
            };
        }

        tracing::info!("=== Stage 2: fetching {} speaker profiles ===", listing.identifiers.len());
        let records = self.fetch_all(&listing.identifiers).await;

        HarvestOutcome {
            identifiers: listing.identifiers,
            records,
            pages_visited: listing.pages_visited,
            listing_stop: listing.stop,
        }
    }

    /// Listing stage: walks pages until one of the stop conditions holds
    ///
    /// Stops on the first of:
    /// - the page cannot be fetched
    /// - the page has no speaker links
    /// - the pagination links end at the current page
    /// - the page has no pagination links and added no new speakers
    /// - the configured page cap
    ///
    /// Results gathered before the stop are kept.
    pub async fn collect_identifiers(&self) -> ListingOutcome {
        let mut page: u32 = 1;
        let mut seen: HashSet<String> = HashSet::new();
        let mut identifiers: Vec<SpeakerIdentifier> = Vec::new();

        let stop = loop {
            tracing::info!("Processing listing page {}", page);

            let params = self.listing_params(page);
            let Some(document) = self
                .fetcher
                .fetch(&self.config.site.listing_url, &params)
                .await
            else {
                tracing::error!("Could not fetch listing page {}", page);
                break ListingStop::FetchFailed { page };
            };

            let page_identifiers = extract_identifiers(&document);
            let hint = inspect_pagination(&document, page);
            drop(document);

            if page_identifiers.is_empty() {
                tracing::info!("No speakers on page {}; listing finished", page);
                break ListingStop::EmptyPage { page };
            }

            let found = page_identifiers.len();
            let mut added = 0;
            for identifier in page_identifiers {
                if seen.insert(identifier.slug.clone()) {
                    identifiers.push(identifier);
                    added += 1;
                }
            }
            tracing::info!(
                "Page {}: {} speakers, {} new, {} total",
                page,
                found,
                added,
                identifiers.len()
            );

            match hint {
                PaginationHint::Exhausted { last_page } => {
                    tracing::info!("Reached last page ({} of {})", page, last_page);
                    break ListingStop::LastPage { page };
                }
                PaginationHint::NoEvidence if added == 0 => {
                    tracing::info!("Page {} has no pagination links and no new speakers", page);
                    break ListingStop::NoNewSpeakers { page };
                }
                PaginationHint::NoEvidence => {
                    tracing::debug!("Page {} has no pagination links; continuing", page);
                }
                PaginationHint::More { last_page } => {
                    tracing::debug!("Pagination links reach page {}", last_page);
                }
            }

            if let Some(max_pages) = self.config.crawler.max_pages {
                if page >= max_pages {
                    tracing::warn!("Stopping at configured page limit {}", max_pages);
                    break ListingStop::PageLimit { page };
                }
            }

            page += 1;
            self.pause().await;
        };

        tracing::info!("Found {} unique speakers", identifiers.len());

        let pages_visited = match stop {
            ListingStop::FetchFailed { page }
            | ListingStop::EmptyPage { page }
            | ListingStop::LastPage { page }
            | ListingStop::NoNewSpeakers { page }
            | ListingStop::PageLimit { page } => page,
        };

        ListingOutcome {
            identifiers,
            pages_visited,
            stop,
        }
    }

    /// Detail stage: one record per identifier whose page could be fetched
    ///
    /// Output order follows input order. Speakers whose page fails are
    /// logged and left out. The request delay applies after every speaker,
    /// the last one included.
    pub async fn fetch_all(&self, identifiers: &[SpeakerIdentifier]) -> Vec<SpeakerRecord> {
        let total = identifiers.len();
        let mut records = Vec::with_capacity(total);

        for (index, identifier) in identifiers.iter().enumerate() {
            tracing::info!("[{}/{}] Processing speaker {}", index + 1, total, identifier.slug);

            match self.fetch_record(identifier).await {
                Some(record) => {
                    tracing::debug!("Extracted speaker {}", record.name);
                    records.push(record);
                }
                None => {
                    tracing::error!("Could not fetch details for speaker {}", identifier.slug);
                }
            }

            self.pause().await;
        }

        tracing::info!("Extracted {} of {} speakers", records.len(), total);
        records
    }

    /// Fetches and extracts a single speaker record
    pub async fn fetch_record(&self, identifier: &SpeakerIdentifier) -> Option<SpeakerRecord> {
        let site = &self.config.site;
        let url = site.detail_url_for(&identifier.slug);

        let document = self.fetcher.fetch(&url, &site.detail_params).await?;
        let mut record = extract_record(&document, &identifier.slug, site);
        record.apply_name_fallback(identifier);
        Some(record)
    }

    /// Fixed listing parameters plus the page number
    fn listing_params(&self, page: u32) -> BTreeMap<String, String> {
        let mut params = self.config.site.listing_params.clone();
        params.insert("page".to_string(), page.to_string());
        params
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

/// Runs a complete harvest with a fresh harvester
///
/// # Example
///
/// ```no_run
/// use speaker_harvest::config::default_config;
/// use speaker_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_harvest(default_config()?).await?;
/// println!("{} records", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<HarvestOutcome, HarvestError> {
    let harvester = Harvester::new(config)?;
    Ok(harvester.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params_add_page() {
        let harvester = Harvester::new(Config::default()).unwrap();
        let params = harvester.listing_params(4);

        assert_eq!(params.get("page").unwrap(), "4");
        assert_eq!(params.get("sortby").unwrap(), "personSurname asc");
        assert_eq!(params.get("searchgroup").unwrap(), "A2A12251-speakers");
    }

    #[test]
    fn test_skipped_count() {
        let outcome = HarvestOutcome {
            identifiers: vec![
                SpeakerIdentifier::new("a", ""),
                SpeakerIdentifier::new("b", ""),
            ],
            records: vec![SpeakerRecord::default()],
            pages_visited: 1,
            listing_stop: ListingStop::LastPage { page: 1 },
        };
        assert_eq!(outcome.skipped(), 1);
    }

    // Stage behaviour against live pages is covered with wiremock in tests/harvest_tests.rs
}
