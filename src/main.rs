//! Console demonstration of `CalendarDate`.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use calendar_date::CalendarDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reads a date as `day month year` and reports on it.
#[derive(Parser)]
#[command(name = "calendar_date", version, about = "Gregorian date calculator")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Days to add to the entered date.
    #[arg(long, default_value_t = 40)]
    add: u32,

    /// Days to subtract afterwards.
    #[arg(long, default_value_t = 60)]
    subtract: u32,

    /// Date to compare against, as DD.MM.YYYY.
    #[arg(long, default_value = "01.01.2023")]
    compare: CalendarDate,
}

/// Initialize tracing based on CLI verbosity level.
///
/// `RUST_LOG` env var overrides the CLI flag if set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("calendar_date={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    write!(out, "Enter date (dd mm yyyy): ")?;
    out.flush()?;
    let mut date = CalendarDate::read_from(&mut stdin.lock()).context("reading date")?;
    info!(%date, "date entered");

    write!(out, "Entered date: ")?;
    date.print(&mut out)?;
    writeln!(out, "Leap year? {}", if date.is_leap() { "Yes" } else { "No" })?;

    date.add_days(cli.add)
        .with_context(|| format!("adding {} days", cli.add))?;
    write!(out, "Date after adding {} days: ", cli.add)?;
    date.print(&mut out)?;

    date.subtract_days(cli.subtract)
        .with_context(|| format!("subtracting {} days", cli.subtract))?;
    write!(out, "Date after subtracting {} days: ", cli.subtract)?;
    date.print(&mut out)?;

    let other = &cli.compare;
    write!(out, "Second date: ")?;
    other.print(&mut out)?;

    writeln!(out, "Comparison:")?;
    let verdict = match date.cmp(other) {
        std::cmp::Ordering::Equal => "Dates are equal.",
        std::cmp::Ordering::Less => "First date is earlier.",
        std::cmp::Ordering::Greater => "First date is later.",
    };
    writeln!(out, "{verdict}")?;
    writeln!(out, "Difference in days: {}", &date - other)?;

    let weekday = date.day_of_week();
    writeln!(
        out,
        "Day of week: {} ({weekday}, 0=Monday)",
        weekday.number_from_monday()
    )?;
    writeln!(out, "Week number: {}", date.week_number())?;
    writeln!(out, "Date to string: {date}")?;
    writeln!(
        out,
        "Total created: {}, Existing: {}",
        CalendarDate::total_created(),
        CalendarDate::alive_count()
    )?;
    Ok(())
}
