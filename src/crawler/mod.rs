//! Crawler module for fetching and extracting speaker pages
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with retry and backoff
//! - Listing page extraction and pagination detection
//! - Detail page extraction
//! - Overall two-stage coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod pagination;

pub use coordinator::{run_harvest, HarvestOutcome, Harvester, ListingOutcome, ListingStop};
pub use detail::{absolutize, extract_record, SessionInfo};
pub use fetcher::{backoff_delay, backoff_schedule, build_http_client, Fetcher};
pub use listing::{extract_identifiers, MODAL_MARKER, SPEAKER_PATH};
pub use pagination::{has_more, inspect_pagination, max_linked_page, PaginationHint};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Walk the listing pages collecting speaker slugs
/// 3. Fetch every speaker's detail page
///
/// Writing the records out is left to the caller.
///
/// # Returns
///
/// * `Ok(HarvestOutcome)` - Both stages ran (possibly finding nothing)
/// * `Err(HarvestError)` - The run could not start
pub async fn harvest(config: Config) -> Result<HarvestOutcome, HarvestError> {
    run_harvest(config).await
}
