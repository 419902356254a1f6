//! Book record definitions
//!
//! A `BookRecord` is the unit the crawler emits: one fully populated row per
//! detail page.
use crate::{ExtractError, ExtractResult};
use rust_decimal::Decimal;
use std::fmt;

/// Highest rating a book can carry
pub const MAX_RATING: u8 = 5;

/// Stock status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The stock text mentions "In stock"
    Available,

    /// Anything else
    OutOfStock,
}

impl Availability {
    /// Classifies the stock-status text of a detail page
    ///
    /// The match is case-sensitive because the catalogue uses a fixed
    /// vocabulary ("In stock (22 available)").
    pub fn from_status_text(text: &str) -> Self {
        if text.trim().contains("In stock") {
            Self::Available
        } else {
            Self::OutOfStock
        }
    }

    /// Returns true if the book can be bought
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Human-readable label used in tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One book extracted from a detail page
///
/// Fields are private so a record cannot be altered after it is built;
/// every constructor path goes through [`BookRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    title: String,
    genre: String,
    price: Decimal,
    rating: u8,
    availability: Availability,
}

impl BookRecord {
    /// Builds a record, rejecting empty text fields and negative prices
    ///
    /// A rating above [`MAX_RATING`] is stored as 0 ("unrecognized").
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        price: Decimal,
        rating: u8,
        availability: Availability,
    ) -> ExtractResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ExtractError::MissingField { field: "title" });
        }

        let genre = genre.into().trim().to_string();
        if genre.is_empty() {
            return Err(ExtractError::MissingField { field: "genre" });
        }

        if price.is_sign_negative() && !price.is_zero() {
            return Err(ExtractError::MalformedPrice {
                raw: price.to_string(),
            });
        }

        let rating = if rating > MAX_RATING { 0 } else { rating };

        Ok(Self {
            title,
            genre,
            price,
            rating,
            availability,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Price with the currency symbol stripped; the unit is implicit
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Star rating in `0..=5`, where 0 means the label was not recognized
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }
}
