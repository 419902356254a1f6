//! Crawl statistics
//!
//! This module summarizes a [`CrawlReport`] for display at the end of a run.

use crate::crawler::{CrawlOutcome, CrawlReport};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Listing pages fetched successfully
    pub pages_visited: u32,

    /// Records extracted
    pub records: usize,

    /// Books in stock among the extracted records
    pub available: usize,

    /// Skipped books grouped by reason kind
    pub skipped_by_reason: HashMap<&'static str, u64>,

    /// How traversal ended
    pub outcome: CrawlOutcome,

    /// Wall-clock duration in seconds
    pub duration_seconds: i64,
}

impl CrawlStatistics {
    /// Computes statistics from a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut skipped_by_reason = HashMap::new();
        for item in report.skipped() {
            *skipped_by_reason.entry(item.reason.kind()).or_insert(0) += 1;
        }

        Self {
            pages_visited: report.pages_visited,
            records: report.records().len(),
            available: report
                .records()
                .iter()
                .filter(|r| r.availability().is_available())
                .count(),
            skipped_by_reason,
            outcome: report.outcome.clone(),
            duration_seconds: report.duration().num_seconds(),
        }
    }

    /// Total number of skipped books
    pub fn total_skipped(&self) -> u64 {
        self.skipped_by_reason.values().sum()
    }

    /// Share of cards that became records, as a percentage
    pub fn extraction_rate(&self) -> f64 {
        let attempted = self.records as u64 + self.total_skipped();
        if attempted == 0 {
            return 0.0;
        }
        (self.records as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Listing pages visited: {}", stats.pages_visited);
    println!("  Books extracted: {}", stats.records);
    println!("  Books in stock: {}", stats.available);
    println!("  Duration: {}s", stats.duration_seconds);
    println!();

    if !stats.skipped_by_reason.is_empty() {
        println!("Skipped Books ({}):", stats.total_skipped());
        let mut counts: Vec<_> = stats.skipped_by_reason.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (reason, count) in counts {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    match &stats.outcome {
        CrawlOutcome::Completed => println!("Traversal: completed"),
        CrawlOutcome::Aborted { page, url, reason } => {
            println!("Traversal: stopped at page {} ({}): {}", page, url, reason)
        }
    }

    println!(
        "Extraction Rate: {:.1}% ({} books extracted)",
        stats.extraction_rate(),
        stats.records
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(records: usize, skipped: &[(&'static str, u64)]) -> CrawlStatistics {
        CrawlStatistics {
            pages_visited: 2,
            records,
            available: records,
            skipped_by_reason: skipped.iter().copied().collect(),
            outcome: CrawlOutcome::Completed,
            duration_seconds: 3,
        }
    }

    #[test]
    fn test_total_skipped() {
        let stats = stats(10, &[("missing_field", 2), ("fetch_failed", 1)]);
        assert_eq!(stats.total_skipped(), 3);
    }

    #[test]
    fn test_extraction_rate() {
        let stats = stats(80, &[("missing_field", 20)]);
        assert!((stats.extraction_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_extraction_rate_zero_cards() {
        assert_eq!(stats(0, &[]).extraction_rate(), 0.0);
    }
}
