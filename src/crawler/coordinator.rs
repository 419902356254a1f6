//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the catalogue state machine:
//! - Fetching each listing page and parsing its cards
//! - Fetching every card's detail page and extracting a record
//! - Following the "next" link until the last page or a failed listing
//!
//! Requests are strictly sequential: one listing fetch, then one detail
//! fetch per card, repeated per page.

use crate::book::extract_from_html;
use crate::config::Config;
use crate::crawler::parser::parse_listing;
use crate::crawler::report::CrawlReport;
use crate::crawler::{build_http_client, fetch_page, FetchResult};
use crate::state::{CardLink, CrawlPhase, CrawlState, ItemOutcome, SkipReason};
use crate::CrawlerError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use url::Url;

/// Main crawler structure
pub struct Crawler {
    client: Client,
    root: Url,
    state: CrawlState,
    started_at: DateTime<Utc>,
}

impl Crawler {
    /// Creates a crawler from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run from the configured first page
    /// * `Err(CrawlerError)` - Invalid root URL or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, CrawlerError> {
        let client = build_http_client(&config.http)?;
        let root = config.catalogue.root()?;
        let first_page = config.catalogue.first_page_url()?;
        Ok(Self::with_client(client, root, first_page))
    }

    /// Creates a crawler around an existing client
    pub fn with_client(client: Client, root: Url, first_page: Url) -> Self {
        Self {
            client,
            root,
            state: CrawlState::new(first_page),
            started_at: Utc::now(),
        }
    }

    /// Current crawl state
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the crawl to completion
    ///
    /// A listing page that fails to load ends traversal early; the report
    /// then carries the records of the earlier pages and an `Aborted`
    /// outcome. That is not an error of this function.
    pub async fn run(mut self) -> Result<CrawlReport, CrawlerError> {
        self.started_at = Utc::now();
        tracing::info!("Starting catalogue crawl at {}", self.root);

        while self.step().await? {}

        let report = CrawlReport::from_state(self.state, self.started_at, Utc::now());

        tracing::info!(
            "Crawl finished: {} records from {} pages, {} skipped, in {}s",
            report.records().len(),
            report.pages_visited,
            report.skipped().len(),
            report.duration().num_seconds()
        );

        Ok(report)
    }

    /// Performs one state transition
    ///
    /// Returns `Ok(false)` once the crawl has reached a terminal phase.
    pub async fn step(&mut self) -> Result<bool, CrawlerError> {
        if self.state.phase().is_terminal() {
            return Ok(false);
        }

        if let Some(url) = self.state.listing_to_fetch().cloned() {
            self.load_listing(url).await?;
            return Ok(true);
        }

        match self.state.next_card() {
            Some(card) => self.process_card(card).await,
            None => {
                self.state.finish_page()?;
                if let CrawlPhase::Aborted { url, reason } = self.state.phase() {
                    tracing::error!(
                        "Stopping before page {} ({}): {}",
                        self.state.page(),
                        url,
                        reason
                    );
                }
            }
        }

        Ok(true)
    }

    /// Fetches and parses a listing page
    async fn load_listing(&mut self, url: Url) -> Result<(), CrawlerError> {
        let page = self.state.page();
        tracing::info!("Analyzing page {}: {}", page, url);

        match fetch_page(&self.client, &url).await {
            FetchResult::Success { body, .. } => {
                let listing = parse_listing(&body, &self.root);
                tracing::debug!(
                    "Page {} has {} books, next: {}",
                    page,
                    listing.cards.len(),
                    listing
                        .next_page
                        .as_ref()
                        .map(Url::as_str)
                        .unwrap_or("none")
                );
                self.state.listing_loaded(listing.cards, listing.next_page)
            }
            failure => {
                let reason = failure
                    .failure_reason()
                    .unwrap_or_else(|| "unknown failure".to_string());
                tracing::error!(
                    "Failed to load page {} ({}): {}. Stopping.",
                    page,
                    url,
                    reason
                );
                self.state.listing_failed(reason)
            }
        }
    }

    /// Turns one card into a record or a logged skip
    async fn process_card(&mut self, card: CardLink) {
        let page = self.state.page();

        let outcome = match card {
            CardLink::Resolved(url) => self.fetch_item(url, page).await,
            CardLink::Missing => {
                let listing = self
                    .state
                    .current_listing()
                    .map(Url::to_string)
                    .unwrap_or_default();
                ItemOutcome::skipped(listing, page, SkipReason::MissingLink)
            }
        };

        if let ItemOutcome::Skipped(item) = &outcome {
            tracing::warn!("Skipping book {} on page {}: {}", item.url, item.page, item.reason);
        }

        self.state.record_outcome(outcome);
    }

    /// Fetches a detail page and extracts its record
    async fn fetch_item(&self, url: Url, page: u32) -> ItemOutcome {
        tracing::debug!("Fetching book: {}", url);

        match fetch_page(&self.client, &url).await {
            FetchResult::Success { body, .. } => match extract_from_html(&body) {
                Ok(record) => ItemOutcome::Extracted(record),
                Err(e) => ItemOutcome::skipped(url, page, SkipReason::Extract(e)),
            },
            failure => {
                let reason = failure
                    .failure_reason()
                    .unwrap_or_else(|| "unknown failure".to_string());
                ItemOutcome::skipped(url, page, SkipReason::Fetch(reason))
            }
        }
    }
}

/// Runs a complete crawl from configuration
///
/// # Example
///
/// ```no_run
/// use catalogue_crawler::config::Config;
/// use catalogue_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(&Config::default()).await?;
/// println!("{} books", report.records().len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, CrawlerError> {
    Crawler::new(config)?.run().await
}
