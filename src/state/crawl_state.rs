use crate::book::BookRecord;
use crate::state::crawl_phase::{CardLink, CrawlPhase};
use crate::state::item_outcome::{ItemOutcome, SkippedItem};
use crate::CrawlerError;
use std::collections::HashSet;
use url::Url;

/// Mutable state of one catalogue crawl
///
/// Owned solely by the crawler: created when a crawl starts, advanced once
/// per transition, and consumed when the final report is built.
#[derive(Debug, Clone)]
pub struct CrawlState {
    phase: CrawlPhase,

    /// Number of the listing page currently being visited (1-based)
    page: u32,

    /// Listing pages fetched successfully
    listings_loaded: u32,

    records: Vec<BookRecord>,
    skipped: Vec<SkippedItem>,

    /// Listing pages already loaded; a "next" link back to one ends the crawl
    visited: HashSet<Url>,
}

impl CrawlState {
    /// Creates a state poised to fetch `first_page`
    pub fn new(first_page: Url) -> Self {
        Self {
            phase: CrawlPhase::FetchingListing { url: first_page },
            page: 1,
            listings_loaded: 0,
            records: Vec::new(),
            skipped: Vec::new(),
            visited: HashSet::new(),
        }
    }

    pub fn phase(&self) -> &CrawlPhase {
        &self.phase
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn listings_loaded(&self) -> u32 {
        self.listings_loaded
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// URL of the listing page waiting to be fetched, if any
    pub fn listing_to_fetch(&self) -> Option<&Url> {
        match &self.phase {
            CrawlPhase::FetchingListing { url } => Some(url),
            _ => None,
        }
    }

    /// URL of the listing page whose cards are being processed, if any
    pub fn current_listing(&self) -> Option<&Url> {
        match &self.phase {
            CrawlPhase::ExtractingItems { listing, .. } => Some(listing),
            _ => None,
        }
    }

    /// FetchingListing -> ExtractingItems
    pub fn listing_loaded(
        &mut self,
        cards: Vec<CardLink>,
        next: Option<Url>,
    ) -> Result<(), CrawlerError> {
        let listing = match &self.phase {
            CrawlPhase::FetchingListing { url } => url.clone(),
            other => return Err(self.invalid(other, "listing_loaded")),
        };

        self.listings_loaded += 1;
        self.visited.insert(listing.clone());
        self.phase = CrawlPhase::ExtractingItems {
            listing,
            pending: cards.into(),
            next,
        };
        Ok(())
    }

    /// FetchingListing -> Aborted
    pub fn listing_failed(&mut self, reason: impl Into<String>) -> Result<(), CrawlerError> {
        let url = match &self.phase {
            CrawlPhase::FetchingListing { url } => url.clone(),
            other => return Err(self.invalid(other, "listing_failed")),
        };

        self.phase = CrawlPhase::Aborted {
            url,
            reason: reason.into(),
        };
        Ok(())
    }

    /// Takes the next unprocessed card of the current listing page
    ///
    /// Returns `None` when the page is drained or no page is being processed.
    pub fn next_card(&mut self) -> Option<CardLink> {
        match &mut self.phase {
            CrawlPhase::ExtractingItems { pending, .. } => pending.pop_front(),
            _ => None,
        }
    }

    /// Appends the outcome of one card to the accumulated results
    pub fn record_outcome(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Extracted(record) => self.records.push(record),
            ItemOutcome::Skipped(item) => self.skipped.push(item),
        }
    }

    /// ExtractingItems -> FetchingListing (next page) or Done
    ///
    /// A "next" link pointing at a listing page already loaded moves to
    /// Aborted instead. Fails if cards are still pending.
    pub fn finish_page(&mut self) -> Result<(), CrawlerError> {
        let next = match &self.phase {
            CrawlPhase::ExtractingItems { pending, next, .. } if pending.is_empty() => next.clone(),
            other => return Err(self.invalid(other, "finish_page")),
        };

        self.phase = match next {
            Some(url) if self.visited.contains(&url) => {
                self.page += 1;
                CrawlPhase::Aborted {
                    url,
                    reason: "next link loops back to a visited page".to_string(),
                }
            }
            Some(url) => {
                self.page += 1;
                CrawlPhase::FetchingListing { url }
            }
            None => CrawlPhase::Done,
        };
        Ok(())
    }

    /// Consumes the state, returning its final phase and results
    pub fn into_parts(self) -> (CrawlPhase, u32, u32, Vec<BookRecord>, Vec<SkippedItem>) {
        (
            self.phase,
            self.page,
            self.listings_loaded,
            self.records,
            self.skipped,
        )
    }

    fn invalid(&self, from: &CrawlPhase, event: &'static str) -> CrawlerError {
        CrawlerError::InvalidTransition {
            from: from.name(),
            event,
        }
    }
}
