//! Crawler module for catalogue traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Listing page parsing (book cards and the "next" link)
//! - The crawl loop that turns detail pages into records

mod coordinator;
mod fetcher;
mod parser;
mod report;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::{parse_listing, resolve_link, ListingPage};
pub use report::{CrawlOutcome, CrawlReport};

use crate::book::BookRecord;
use crate::config::{CatalogueConfig, HttpConfig};
use crate::CrawlerError;
use url::Url;

/// Crawls the catalogue under `root` and returns every extracted record
///
/// Traversal starts at `page-1.html` beneath `root` and uses default HTTP
/// settings. Each call fetches everything again. Use [`Crawler`] directly to
/// also see skipped books and how traversal ended.
pub async fn crawl_catalogue(root: &Url) -> Result<Vec<BookRecord>, CrawlerError> {
    let catalogue = CatalogueConfig {
        root_url: root.to_string(),
        ..CatalogueConfig::default()
    };
    let client = build_http_client(&HttpConfig::default())?;
    let crawler = Crawler::with_client(client, catalogue.root()?, catalogue.first_page_url()?);
    Ok(crawler.run().await?.into_records())
}
