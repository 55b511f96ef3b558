use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Japanese public holidays and business days.
#[derive(Parser)]
#[command(
    name = "jpbiz",
    version,
    about = "Japanese public holidays and business-day offsets"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List the public holidays of a year.
    Holidays(HolidaysArgs),
    /// List the business days of a month.
    Days(MonthArgs),
    /// Show the settlement dates of a month.
    Schedule(ScheduleArgs),
    /// Find the Nth business day on or after a date.
    Nth(NthArgs),
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Year to list.
    pub year: i32,
}

/// Arguments for the `days` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Month as YYYY-MM.
    pub month: String,
}

/// Arguments for the `schedule` subcommand.
#[derive(clap::Args)]
pub struct ScheduleArgs {
    /// Month as YYYY-MM.
    pub month: String,

    /// Print the dates as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print an AppleScript adding the labelled dates to Calendar.app.
    #[arg(long, conflicts_with = "url")]
    pub applescript: bool,

    /// Print a Script Editor URL for that AppleScript.
    #[arg(long)]
    pub url: bool,
}

/// Arguments for the `nth` subcommand.
#[derive(clap::Args)]
pub struct NthArgs {
    /// First date counted, as YYYY-MM-DD.
    pub start: NaiveDate,

    /// Which business day to find (1 = first).
    pub n: u32,
}
