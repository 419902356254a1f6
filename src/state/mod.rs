//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the traversal state machine (fetching a listing, extracting its cards, done, aborted)
//! - `CrawlState`: the phase plus the page counter and accumulated results
//! - `ItemOutcome`: per-card result, either a record or a skip with its reason

mod crawl_phase;
mod crawl_state;
mod item_outcome;

// Re-export main types
pub use crawl_phase::{CardLink, CrawlPhase};
pub use crawl_state::CrawlState;
pub use item_outcome::{ItemOutcome, SkipReason, SkippedItem};
