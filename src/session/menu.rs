//! Interactive console menu
//!
//! Drives a [`FilterSession`] from the terminal. Every filter is evaluated
//! against the full table and becomes the current view, which option 7
//! exports.

use crate::book::{parse_price, Availability, BookRecord, MAX_RATING};
use crate::output::render_rows;
use crate::session::filter_session::FilterSession;
use crate::session::query::Query;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use rust_decimal::Decimal;

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    FilterGenre,
    FilterRating,
    FilterAvailability,
    FilterPrice,
    CountAvailable,
    ShowAll,
    Export,
    Quit,
}

impl MenuAction {
    /// Every action, in display order
    const ALL: [MenuAction; 8] = [
        Self::FilterGenre,
        Self::FilterRating,
        Self::FilterAvailability,
        Self::FilterPrice,
        Self::CountAvailable,
        Self::ShowAll,
        Self::Export,
        Self::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FilterGenre => "Filter by genre",
            Self::FilterRating => "Filter by minimum rating",
            Self::FilterAvailability => "Filter by availability",
            Self::FilterPrice => "Filter by price range",
            Self::CountAvailable => "How many books are available?",
            Self::ShowAll => "Show all books (reset filters)",
            Self::Export => "Export current view",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits
pub fn run_menu(session: &mut FilterSession, default_export: &str) -> Result<()> {
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!();
        let selection = Select::with_theme(&theme)
            .with_prompt("Filter menu")
            .items(&labels)
            .default(0)
            .interact()?;

        let Some(&action) = MenuAction::ALL.get(selection) else {
            continue;
        };

        match action {
            MenuAction::FilterGenre => filter_by_genre(session, &theme)?,
            MenuAction::FilterRating => filter_by_rating(session, &theme)?,
            MenuAction::FilterAvailability => filter_by_availability(session, &theme)?,
            MenuAction::FilterPrice => filter_by_price(session, &theme)?,
            MenuAction::CountAvailable => println!(
                "\n{} books are available to buy.",
                session.available_count()
            ),
            MenuAction::ShowAll => {
                println!("\n--- All books (filters reset) ---");
                show(&session.reset());
            }
            MenuAction::Export => export_view(session, &theme, default_export)?,
            MenuAction::Quit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    Ok(())
}

fn filter_by_genre(session: &mut FilterSession, theme: &ColorfulTheme) -> Result<()> {
    let genres: Vec<String> = session
        .table()
        .genres()
        .into_iter()
        .map(str::to_string)
        .collect();

    if genres.is_empty() {
        println!("No genres available.");
        return Ok(());
    }

    let choice = Select::with_theme(theme)
        .with_prompt("Genre")
        .items(&genres)
        .default(0)
        .interact()?;

    let genre = genres[choice].clone();
    println!("\n--- Books in genre: {} ---", genre);
    show(&session.apply(Query::Genre(genre)));
    Ok(())
}

fn filter_by_rating(session: &mut FilterSession, theme: &ColorfulTheme) -> Result<()> {
    let input: String = Input::with_theme(theme)
        .with_prompt(format!("Minimum rating (1-{})", MAX_RATING))
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            parse_min_rating(input)
                .map(|_| ())
                .ok_or("Enter a whole number from 1 to 5")
        })
        .interact_text()?;

    if let Some(min) = parse_min_rating(&input) {
        println!("\n--- Books rated {} stars or more ---", min);
        show(&session.apply(Query::MinRating(min)));
    }
    Ok(())
}

fn filter_by_availability(session: &mut FilterSession, theme: &ColorfulTheme) -> Result<()> {
    let options = [Availability::Available, Availability::OutOfStock];
    let labels: Vec<&str> = options.iter().map(Availability::label).collect();

    let choice = Select::with_theme(theme)
        .with_prompt("Availability")
        .items(&labels)
        .default(0)
        .interact()?;

    println!("\n--- Books: {} ---", options[choice]);
    show(&session.apply(Query::Availability(options[choice])));
    Ok(())
}

fn filter_by_price(session: &mut FilterSession, theme: &ColorfulTheme) -> Result<()> {
    let min = prompt_price(theme, "Minimum price")?;
    let max = prompt_price(theme, "Maximum price")?;

    println!("\n--- Books between {:.2} and {:.2} ---", min, max);
    let rows = session.apply(Query::PriceBetween { min, max });
    if rows.is_empty() {
        println!("No books found in that price range.");
    } else {
        show(&rows);
    }
    Ok(())
}

fn prompt_price(theme: &ColorfulTheme, prompt: &str) -> Result<Decimal> {
    let input: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            parse_price(input)
                .map(|_| ())
                .map_err(|_| "Enter a non-negative number")
        })
        .interact_text()?;

    Ok(parse_price(&input)?)
}

fn export_view(session: &FilterSession, theme: &ColorfulTheme, default_export: &str) -> Result<()> {
    let requested: String = Input::with_theme(theme)
        .with_prompt("Export file name")
        .default(default_export.to_string())
        .interact_text()?;

    match session.export(&requested) {
        Ok(path) => println!(
            "\nExported {} books to '{}' ({}).",
            session.current_view().len(),
            path.display(),
            session.view_query()
        ),
        Err(e) => println!("\nExport failed: {}", e),
    }
    Ok(())
}

/// Parses a minimum rating between 1 and 5
pub fn parse_min_rating(input: &str) -> Option<u8> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=MAX_RATING).contains(n))
}

fn show(rows: &[&BookRecord]) {
    println!("{}", render_rows(rows.iter().copied()));
    println!("({} books)", rows.len());
}
