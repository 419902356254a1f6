//! Crawl report
//!
//! The value a finished crawl hands back to its caller: the records, the
//! books that were skipped, and how traversal ended.

use crate::book::BookRecord;
use crate::state::{CrawlPhase, CrawlState, SkippedItem};
use chrono::{DateTime, Utc};

/// How catalogue traversal ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The last listing page had no "next" control
    Completed,

    /// A listing page failed to load; results cover earlier pages only
    Aborted {
        /// Number of the listing page that failed (1-based)
        page: u32,
        url: String,
        reason: String,
    },
}

impl CrawlOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Final result of a catalogue crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    records: Vec<BookRecord>,
    skipped: Vec<SkippedItem>,

    /// Listing pages fetched successfully
    pub pages_visited: u32,

    pub outcome: CrawlOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Builds a report from a state whose phase is terminal
    ///
    /// A non-terminal phase is reported as aborted at the current page.
    pub fn from_state(
        state: CrawlState,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let (phase, page, pages_visited, records, skipped) = state.into_parts();

        let outcome = match phase {
            CrawlPhase::Done => CrawlOutcome::Completed,
            CrawlPhase::Aborted { url, reason } => CrawlOutcome::Aborted {
                page,
                url: url.to_string(),
                reason,
            },
            CrawlPhase::FetchingListing { url } => CrawlOutcome::Aborted {
                page,
                url: url.to_string(),
                reason: "crawl stopped before the listing was fetched".to_string(),
            },
            CrawlPhase::ExtractingItems { listing, .. } => CrawlOutcome::Aborted {
                page,
                url: listing.to_string(),
                reason: "crawl stopped while extracting items".to_string(),
            },
        };

        Self {
            records,
            skipped,
            pages_visited,
            outcome,
            started_at,
            finished_at,
        }
    }

    /// All records extracted, in crawl order
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Consumes the report, returning its records
    pub fn into_records(self) -> Vec<BookRecord> {
        self.records
    }

    /// Books left out, each with its URL and reason
    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
