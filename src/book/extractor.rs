//! Detail page extraction
//!
//! Turns one parsed detail page into a [`BookRecord`]. Extraction is a pure
//! function of the document: no I/O, and the same document always yields the
//! same record.
//!
//! # Field Rules
//!
//! | Field | Source |
//! |-------|--------|
//! | title | text of the first `<h1>` |
//! | price | text of `p.price_color`, currency symbol stripped |
//! | availability | text of `p.availability`, "In stock" substring |
//! | rating | second class token of `p.star-rating` ("One".."Five") |
//! | genre | third link of `ul.breadcrumb` |

use crate::book::record::{Availability, BookRecord};
use crate::{ExtractError, ExtractResult};
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;

const TITLE_SELECTOR: &str = "h1";
const PRICE_SELECTOR: &str = "p.price_color";
const AVAILABILITY_SELECTOR: &str = "p.availability";
const RATING_SELECTOR: &str = "p.star-rating";
const BREADCRUMB_LINK_SELECTOR: &str = "ul.breadcrumb a";

/// Position of the genre link in the breadcrumb (home, category root, genre)
const GENRE_BREADCRUMB_INDEX: usize = 2;

/// Extracts a book record from a parsed detail page
///
/// # Returns
///
/// * `Ok(BookRecord)` - Every field was found and well formed
/// * `Err(ExtractError::MissingField)` - Title, price, availability or genre is absent
/// * `Err(ExtractError::MalformedPrice)` - The price text is not a non-negative number
///
/// An unknown or absent rating label is not an error; it yields rating 0.
///
/// # Example
///
/// ```
/// use catalogue_crawler::book::extract;
/// use scraper::Html;
///
/// let html = r#"<html><body>
///     <ul class="breadcrumb"><li><a href="/">Home</a></li>
///     <li><a href="/books">Books</a></li><li><a href="/poetry">Poetry</a></li></ul>
///     <h1>A Light in the Attic</h1>
///     <p class="price_color">£51.77</p>
///     <p class="instock availability">In stock (22 available)</p>
///     <p class="star-rating Three"></p>
/// </body></html>"#;
///
/// let record = extract(&Html::parse_document(html)).unwrap();
/// assert_eq!(record.title(), "A Light in the Attic");
/// assert_eq!(record.rating(), 3);
/// ```
pub fn extract(document: &Html) -> ExtractResult<BookRecord> {
    let title = extract_title(document)?;
    let price = extract_price(document)?;
    let availability = extract_availability(document)?;
    let rating = extract_rating(document);
    let genre = extract_genre(document)?;

    BookRecord::new(title, genre, price, rating, availability)
}

/// Parses raw detail page HTML and extracts a record from it
pub fn extract_from_html(html: &str) -> ExtractResult<BookRecord> {
    extract(&Html::parse_document(html))
}

/// Parses a displayed price such as `£51.77`
///
/// Strips the currency symbol along with any other non-ASCII characters,
/// which also removes the `Â` left behind when the pound sign is decoded
/// under the wrong encoding (`Â£51.77`).
pub fn parse_price(raw: &str) -> ExtractResult<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_whitespace())
        .collect();

    let malformed = || ExtractError::MalformedPrice {
        raw: raw.to_string(),
    };

    let price = Decimal::from_str(&cleaned).map_err(|_| malformed())?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(malformed());
    }

    Ok(price)
}

/// Maps a rating class attribute (`star-rating Three`) to `0..=5`
///
/// The second whitespace-separated token is looked up; anything else,
/// including a missing token, maps to 0.
pub fn parse_rating(class_attr: &str) -> u8 {
    match class_attr.split_whitespace().nth(1) {
        Some("One") => 1,
        Some("Two") => 2,
        Some("Three") => 3,
        Some("Four") => 4,
        Some("Five") => 5,
        _ => 0,
    }
}

fn extract_title(document: &Html) -> ExtractResult<String> {
    first_text(document, TITLE_SELECTOR)
        .filter(|s| !s.is_empty())
        .ok_or(ExtractError::MissingField { field: "title" })
}

fn extract_price(document: &Html) -> ExtractResult<Decimal> {
    let text = first_text(document, PRICE_SELECTOR)
        .ok_or(ExtractError::MissingField { field: "price" })?;
    parse_price(&text)
}

fn extract_availability(document: &Html) -> ExtractResult<Availability> {
    let text = first_text(document, AVAILABILITY_SELECTOR)
        .ok_or(ExtractError::MissingField {
            field: "availability",
        })?;
    Ok(Availability::from_status_text(&text))
}

fn extract_rating(document: &Html) -> u8 {
    select_first(document, RATING_SELECTOR)
        .and_then(|element| element.value().attr("class"))
        .map(parse_rating)
        .unwrap_or(0)
}

fn extract_genre(document: &Html) -> ExtractResult<String> {
    let selector = Selector::parse(BREADCRUMB_LINK_SELECTOR)
        .map_err(|_| ExtractError::MissingField { field: "genre" })?;

    document
        .select(&selector)
        .nth(GENRE_BREADCRUMB_INDEX)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .ok_or(ExtractError::MissingField { field: "genre" })
}

/// Returns the first element matching `css`
fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Returns the trimmed text of the first element matching `css`
fn first_text(document: &Html, css: &str) -> Option<String> {
    select_first(document, css).map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
