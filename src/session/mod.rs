//! Filter and export session over crawled books
//!
//! # Components
//!
//! - `Query`: composable predicate over book records
//! - `FilterSession`: owns the table and the current view
//! - `run_menu`: interactive console front end for a session

mod filter_session;
mod menu;
mod query;

pub use filter_session::FilterSession;
pub use menu::{parse_min_rating, run_menu};
pub use query::Query;
