use crate::book::BookRecord;
use crate::ExtractError;
use std::fmt;

/// Why a single book was left out of the crawl results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The listing card had no detail link
    MissingLink,

    /// The detail page could not be fetched
    Fetch(String),

    /// The detail page was fetched but a field could not be extracted
    Extract(ExtractError),
}

impl SkipReason {
    /// Stable key used to group skips in statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingLink => "missing_link",
            Self::Fetch(_) => "fetch_failed",
            Self::Extract(ExtractError::MissingField { .. }) => "missing_field",
            Self::Extract(ExtractError::MalformedPrice { .. }) => "malformed_price",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLink => write!(f, "card has no detail link"),
            Self::Fetch(error) => write!(f, "fetch failed: {}", error),
            Self::Extract(error) => write!(f, "{} (field: {})", error, error.field()),
        }
    }
}

/// A book that was skipped, with enough context to find it again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Detail page URL, or the listing page URL when the card had no link
    pub url: String,

    /// Listing page number the card appeared on
    pub page: u32,

    pub reason: SkipReason,
}

/// Result of processing one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Extracted(BookRecord),
    Skipped(SkippedItem),
}

impl ItemOutcome {
    pub fn skipped(url: impl Into<String>, page: u32, reason: SkipReason) -> Self {
        Self::Skipped(SkippedItem {
            url: url.into(),
            page,
            reason,
        })
    }
}
