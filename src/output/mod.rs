//! Output module for presenting crawl results
//!
//! This module handles:
//! - The in-memory book table handed to the filter session
//! - Exporting records as a spreadsheet-readable CSV file
//! - Recording and printing crawl statistics

mod export;
pub mod stats;
mod table;

pub use export::{export_path, export_records, write_records, ExportError, ExportResult};
pub use stats::{print_statistics, CrawlStatistics};
pub use table::{render_rows, row_cells, BookTable, COLUMNS};
