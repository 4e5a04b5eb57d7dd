//! Aggregate statistics over harvested records
//!
//! This module summarizes a record set (fresh from a run or read back from
//! a CSV file) by company and country.

use crate::model::SpeakerRecord;
use std::collections::HashMap;

/// How many entries the printed breakdowns show
const TOP_N: usize = 10;

/// Aggregate view of a record set
#[derive(Debug, Clone, Default)]
pub struct RecordStatistics {
    /// Total number of speakers
    pub total: usize,

    /// Speakers per company, most common first
    pub by_company: Vec<(String, usize)>,

    /// Speakers per country, most common first
    pub by_country: Vec<(String, usize)>,

    /// Speakers with at least one social link
    pub with_social: usize,

    /// Speakers with a scheduled session
    pub with_session: usize,
}

impl RecordStatistics {
    /// Computes statistics for the given records
    pub fn from_records(records: &[SpeakerRecord]) -> Self {
        let with_social = records.iter().filter(|r| !r.social_links.is_empty()).count();
        let with_session = records.iter().filter(|r| r.has_session()).count();

        Self {
            total: records.len(),
            by_company: count_by(records, |r| &r.company),
            by_country: count_by(records, |r| &r.country),
            with_social,
            with_session,
        }
    }
}

/// Counts non-empty values, sorted by count descending then name
fn count_by<F>(records: &[SpeakerRecord], field: F) -> Vec<(String, usize)>
where
    F: Fn(&SpeakerRecord) -> &String,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let value = field(record).trim();
        if !value.is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RecordStatistics) {
    println!("=== Speaker Statistics ===\n");

    println!("Overview:");
    println!("  Total speakers: {}", stats.total);
    println!("  Unique companies: {}", stats.by_company.len());
    println!("  Unique countries: {}", stats.by_country.len());
    println!(
        "  With social links: {} ({:.1}%)",
        stats.with_social,
        percentage(stats.with_social, stats.total)
    );
    println!(
        "  With sessions: {} ({:.1}%)",
        stats.with_session,
        percentage(stats.with_session, stats.total)
    );
    println!();

    if !stats.by_company.is_empty() {
        println!("Top Companies:");
        for (company, count) in stats.by_company.iter().take(TOP_N) {
            println!("  {}: {}", company, count);
        }
        println!();
    }

    if !stats.by_country.is_empty() {
        println!("Top Countries:");
        for (country, count) in stats.by_country.iter().take(TOP_N) {
            println!("  {}: {}", country, count);
        }
        println!();
    }
}

/// Logs a compact version of the statistics
pub fn log_statistics(stats: &RecordStatistics) {
    tracing::info!(
        "Speakers: {}, companies: {}, countries: {}, with social links: {}, with sessions: {}",
        stats.total,
        stats.by_company.len(),
        stats.by_country.len(),
        stats.with_social,
        stats.with_session
    );

    if let Some((company, count)) = stats.by_company.first() {
        tracing::info!("Most represented company: {} ({})", company, count);
    }
    if let Some((country, count)) = stats.by_country.first() {
        tracing::info!("Most represented country: {} ({})", country, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(company: &str, country: &str, social: bool, session: bool) -> SpeakerRecord {
        SpeakerRecord {
            company: company.to_string(),
            country: country.to_string(),
            social_links: if social {
                vec!["https://x.example".to_string()]
            } else {
                Vec::new()
            },
            session_date: if session { "Tuesday".to_string() } else { String::new() },
            ..Default::default()
        }
    }

    #[test]
    fn test_statistics_counts() {
        let records = vec![
            record("Acme", "UK", true, true),
            record("Acme", "France", false, true),
            record("Globex", "UK", true, false),
            record("", "", false, false),
        ];
        let stats = RecordStatistics::from_records(&records);

        assert_eq!(stats.total, 4);
        assert_eq!(
            stats.by_company,
            vec![("Acme".to_string(), 2), ("Globex".to_string(), 1)]
        );
        assert_eq!(
            stats.by_country,
            vec![("UK".to_string(), 2), ("France".to_string(), 1)]
        );
        assert_eq!(stats.with_social, 2);
        assert_eq!(stats.with_session, 2);
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let records = vec![
            record("Zeta", "", false, false),
            record("Alpha", "", false, false),
        ];
        let stats = RecordStatistics::from_records(&records);
        assert_eq!(stats.by_company[0].0, "Alpha");
        assert_eq!(stats.by_company[1].0, "Zeta");
    }

    #[test]
    fn test_empty_records() {
        let stats = RecordStatistics::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.by_company.is_empty());
        assert_eq!(percentage(stats.with_social, stats.total), 0.0);
    }
}
