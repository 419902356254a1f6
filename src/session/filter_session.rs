use crate::book::BookRecord;
use crate::output::{export_records, BookTable, ExportResult};
use crate::session::query::Query;
use std::path::PathBuf;

/// A filter/export session over a book table
///
/// The session owns its "current view": the query last applied. Each new
/// filter replaces the view and is evaluated against the full table, so
/// filters do not stack unless combined with [`Query::and`].
#[derive(Debug, Clone)]
pub struct FilterSession {
    table: BookTable,
    view: Query,
}

impl FilterSession {
    /// Starts a session showing the full table
    pub fn new(table: BookTable) -> Self {
        Self {
            table,
            view: Query::All,
        }
    }

    pub fn table(&self) -> &BookTable {
        &self.table
    }

    /// The query defining the current view
    pub fn view_query(&self) -> &Query {
        &self.view
    }

    /// Replaces the current view with the rows matching `query`
    pub fn apply(&mut self, query: Query) -> Vec<&BookRecord> {
        self.view = query;
        self.current_view()
    }

    /// Restores the full table as the current view
    pub fn reset(&mut self) -> Vec<&BookRecord> {
        self.apply(Query::All)
    }

    /// Rows of the current view, in crawl order
    pub fn current_view(&self) -> Vec<&BookRecord> {
        self.table
            .records()
            .iter()
            .filter(|r| self.view.matches(r))
            .collect()
    }

    /// Number of books in stock across the full table
    pub fn available_count(&self) -> usize {
        self.table.available_count()
    }

    /// Writes the current view to `requested`, returning the path written
    pub fn export(&self, requested: &str) -> ExportResult<PathBuf> {
        export_records(self.current_view(), requested)
    }
}
