//! Crawl phase definitions
//!
//! The catalogue traversal is an explicit state machine:
//!
//! ```text
//! FetchingListing --listing ok--> ExtractingItems --cards drained, next--> FetchingListing
//!        |                               |
//!        | listing failed                | cards drained, no next
//!        v                               v
//!     Aborted                           Done
//! ```
//!
//! ExtractingItems also moves to Aborted when its "next" link points at a
//! listing page that was already loaded.

use std::collections::VecDeque;
use std::fmt;
use url::Url;

/// One card found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLink {
    /// Absolute detail page URL resolved against the catalogue root
    Resolved(Url),

    /// The card carried no usable detail link
    Missing,
}

/// Current phase of a catalogue crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPhase {
    /// The listing page at `url` is about to be fetched
    FetchingListing { url: Url },

    /// Cards of the listing page at `listing` are being processed in
    /// document order
    ExtractingItems {
        listing: Url,
        pending: VecDeque<CardLink>,
        next: Option<Url>,
    },

    /// The last listing page had no "next" control
    Done,

    /// A listing page could not be fetched; traversal stopped early
    Aborted { url: Url, reason: String },
}

impl CrawlPhase {
    /// Returns true once traversal has stopped, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted { .. })
    }

    /// Short name of the phase for logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchingListing { .. } => "fetching_listing",
            Self::ExtractingItems { .. } => "extracting_items",
            Self::Done => "done",
            Self::Aborted { .. } => "aborted",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
