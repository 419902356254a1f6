//! In-memory book table
//!
//! The tabular view of a crawl handed to the filter session: the records in
//! crawl order under five fixed columns.

use crate::book::BookRecord;

/// Column names, in display and export order
pub const COLUMNS: [&str; 5] = ["Title", "Genre", "Price", "Rating", "Availability"];

/// Widest title rendered before truncation
const TITLE_WIDTH: usize = 48;
const GENRE_WIDTH: usize = 20;

/// All records of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookTable {
    records: Vec<BookRecord>,
}

impl BookTable {
    pub fn new(records: Vec<BookRecord>) -> Self {
        Self { records }
    }

    /// Column names of the table
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Every record, in crawl order
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct genres in first-seen order
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = Vec::new();
        for record in &self.records {
            if !genres.contains(&record.genre()) {
                genres.push(record.genre());
            }
        }
        genres
    }

    /// Number of books in stock across the whole table
    pub fn available_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.availability().is_available())
            .count()
    }
}

/// Formats one record as the cells of a row, in [`COLUMNS`] order
pub fn row_cells(record: &BookRecord) -> [String; 5] {
    [
        record.title().to_string(),
        record.genre().to_string(),
        format!("{:.2}", record.price()),
        record.rating().to_string(),
        record.availability().label().to_string(),
    ]
}

/// Renders rows as a fixed-width text table with a header line
pub fn render_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let mut out = format!(
        "{:<tw$}  {:<gw$}  {:>8}  {:>6}  {}\n",
        COLUMNS[0],
        COLUMNS[1],
        COLUMNS[2],
        COLUMNS[3],
        COLUMNS[4],
        tw = TITLE_WIDTH,
        gw = GENRE_WIDTH
    );

    for record in rows {
        let [title, genre, price, rating, availability] = row_cells(record);
        out.push_str(&format!(
            "{:<tw$}  {:<gw$}  {:>8}  {:>6}  {}\n",
            truncate(&title, TITLE_WIDTH),
            truncate(&genre, GENRE_WIDTH),
            price,
            rating,
            availability,
            tw = TITLE_WIDTH,
            gw = GENRE_WIDTH
        ));
    }

    out
}

/// Shortens `text` to at most `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Availability;
    use rust_decimal::Decimal;

    fn record(title: &str, genre: &str, cents: i64, availability: Availability) -> BookRecord {
        BookRecord::new(title, genre, Decimal::new(cents, 2), 3, availability).unwrap()
    }

    fn table() -> BookTable {
        BookTable::new(vec![
            record("A Light in the Attic", "Poetry", 5177, Availability::Available),
            record("Tipping the Velvet", "Historical Fiction", 5374, Availability::Available),
            record("Olio", "Poetry", 2388, Availability::OutOfStock),
        ])
    }

    #[test]
    fn test_columns() {
        assert_eq!(
            table().columns(),
            &["Title", "Genre", "Price", "Rating", "Availability"]
        );
    }

    #[test]
    fn test_genres_first_seen_order() {
        assert_eq!(table().genres(), vec!["Poetry", "Historical Fiction"]);
    }

    #[test]
    fn test_available_count() {
        assert_eq!(table().available_count(), 2);
        assert_eq!(BookTable::default().available_count(), 0);
    }

    #[test]
    fn test_row_cells() {
        let cells = row_cells(&record("Olio", "Poetry", 2388, Availability::OutOfStock));
        assert_eq!(cells, ["Olio", "Poetry", "23.88", "3", "Out of stock"]);
    }

    #[test]
    fn test_row_cells_pads_price() {
        let cells = row_cells(&record("Olio", "Poetry", 2300, Availability::Available));
        assert_eq!(cells[2], "23.00");
    }

    #[test]
    fn test_render_rows() {
        let table = table();
        let text = render_rows(table.records());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[1].contains("A Light in the Attic"));
        assert!(lines[3].contains("Out of stock"));
    }

    #[test]
    fn test_truncate_long_title() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 10);
        assert_eq!(cut, "xxxxxxx...");
        assert_eq!(truncate("short", 10), "short");
    }
}
