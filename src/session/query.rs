//! Record queries
//!
//! A small predicate combinator over [`BookRecord`]s. Queries are plain
//! values, so a session can describe its current view and compose filters
//! without looking columns up by name.

use crate::book::{Availability, BookRecord};
use rust_decimal::Decimal;
use std::fmt;

/// A predicate over book records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Matches every record
    All,

    /// Exact genre match
    Genre(String),

    /// Rating at or above the given number of stars
    MinRating(u8),

    Availability(Availability),

    /// Price within `min..=max`
    PriceBetween { min: Decimal, max: Decimal },

    /// Both queries must match
    And(Box<Query>, Box<Query>),
}

impl Query {
    /// Returns true if `record` satisfies the query
    pub fn matches(&self, record: &BookRecord) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => record.genre() == genre,
            Self::MinRating(min) => record.rating() >= *min,
            Self::Availability(availability) => record.availability() == *availability,
            Self::PriceBetween { min, max } => record.price() >= *min && record.price() <= *max,
            Self::And(left, right) => left.matches(record) && right.matches(record),
        }
    }

    /// Combines two queries; both must match
    pub fn and(self, other: Query) -> Query {
        match (self, other) {
            (Self::All, q) | (q, Self::All) => q,
            (left, right) => Self::And(Box::new(left), Box::new(right)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all books"),
            Self::Genre(genre) => write!(f, "genre = {}", genre),
            Self::MinRating(min) => write!(f, "rating >= {}", min),
            Self::Availability(availability) => write!(f, "availability = {}", availability),
            Self::PriceBetween { min, max } => write!(f, "price {:.2}..={:.2}", min, max),
            Self::And(left, right) => write!(f, "{} and {}", left, right),
        }
    }
}
