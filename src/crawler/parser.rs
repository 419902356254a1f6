//! Listing page parser
//!
//! This module handles parsing a catalogue listing page to extract:
//! - One detail link per book card (`article.product_pod`), in document order
//! - The pagination "next" link (`li.next a`)
//!
//! Relative links are resolved against the catalogue root, not against the
//! listing page URL.

use crate::state::CardLink;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const CARD_SELECTOR: &str = "article.product_pod";
const CARD_LINK_SELECTOR: &str = "h3 a";
const NEXT_LINK_SELECTOR: &str = "li.next a";

/// Extracted information from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// One entry per card, in document order
    pub cards: Vec<CardLink>,

    /// Absolute URL of the next listing page, if the page has one
    pub next_page: Option<Url>,
}

/// Parses a listing page
///
/// A card without a resolvable link becomes [`CardLink::Missing`] so the
/// crawler can report it and move on. A "next" control without a resolvable
/// link is treated as absent, which ends traversal.
///
/// # Example
///
/// ```
/// use catalogue_crawler::crawler::parse_listing;
/// use catalogue_crawler::state::CardLink;
/// use url::Url;
///
/// let html = r#"<html><body>
///     <article class="product_pod"><h3><a href="a-book_1/index.html">A Book</a></h3></article>
///     <ul class="pager"><li class="next"><a href="page-2.html">next</a></li></ul>
/// </body></html>"#;
/// let root = Url::parse("http://books.example.com/catalogue/").unwrap();
/// let listing = parse_listing(html, &root);
///
/// assert_eq!(listing.cards.len(), 1);
/// assert!(matches!(&listing.cards[0], CardLink::Resolved(_)));
/// assert_eq!(
///     listing.next_page.unwrap().as_str(),
///     "http://books.example.com/catalogue/page-2.html"
/// );
/// ```
pub fn parse_listing(html: &str, root: &Url) -> ListingPage {
    let document = Html::parse_document(html);

    ListingPage {
        cards: extract_cards(&document, root),
        next_page: extract_next_page(&document, root),
    }
}

/// Extracts one `CardLink` per book card
fn extract_cards(document: &Html, root: &Url) -> Vec<CardLink> {
    let (Ok(card_selector), Ok(link_selector)) = (
        Selector::parse(CARD_SELECTOR),
        Selector::parse(CARD_LINK_SELECTOR),
    ) else {
        return Vec::new();
    };

    document
        .select(&card_selector)
        .map(|card| {
            card.select(&link_selector)
                .next()
                .and_then(|link| href_of(link, root))
                .map(CardLink::Resolved)
                .unwrap_or(CardLink::Missing)
        })
        .collect()
}

/// Extracts the pagination "next" link
fn extract_next_page(document: &Html, root: &Url) -> Option<Url> {
    let selector = Selector::parse(NEXT_LINK_SELECTOR).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|link| href_of(link, root))
}

fn href_of(link: ElementRef<'_>, root: &Url) -> Option<Url> {
    link.value()
        .attr("href")
        .and_then(|href| resolve_link(href, root))
}

/// Resolves a link href against the catalogue root
///
/// Returns None if the link should be excluded:
/// - Empty hrefs and fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, root: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match root.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
