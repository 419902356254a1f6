//! Book records and detail page extraction
//!
//! # Components
//!
//! - `BookRecord`: one immutable, fully populated row per book
//! - `Availability`: stock status derived from the detail page text
//! - `extract`: pure conversion of a parsed detail page into a record

mod extractor;
mod record;

pub use extractor::{extract, extract_from_html, parse_price, parse_rating};
pub use record::{Availability, BookRecord, MAX_RATING};
