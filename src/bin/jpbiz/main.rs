mod cli;
mod config;
mod logging;

use std::process;

use anyhow::Result;
use chrono::Datelike;
use clap::Parser;
use jpbiz::export::{applescript, applescript_url, events};
use jpbiz::{HolidaySource, HolidayTable, JapaneseCalendar, Session, YearMonth};

use crate::cli::{Cli, Command, ScheduleArgs};
use crate::config::Config;

type Source = Box<dyn HolidaySource>;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<jpbiz::Error>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let session = open_session(&config);
    match cli.command {
        Command::Holidays(args) => {
            let finder = session.finder()?;
            let holidays = finder.calendar().holidays_for_year(args.year);
            for (date, name) in holidays.iter() {
                println!("{date} {} {name}", date.weekday());
            }
        }
        Command::Days(args) => {
            let month: YearMonth = args.month.parse()?;
            let finder = session.finder()?;
            for date in &finder.business_days_in_month(month.year, month.month)? {
                println!("{date} {}", date.weekday());
            }
        }
        Command::Schedule(args) => schedule(session, &config, &args)?,
        Command::Nth(args) => {
            let finder = session.finder()?;
            println!("{}", finder.nth_business_day_from(args.start, args.n)?);
        }
    }
    Ok(())
}

fn open_session(config: &Config) -> Session<Source> {
    Session::start(
        || -> Result<Source, jpbiz::Error> {
            if let Some(path) = &config.holiday_file {
                return Ok(Box::new(HolidayTable::from_path(path)?));
            }
            let mut calendar = JapaneseCalendar::new();
            for rule in &config.additional_rules {
                calendar.add_holiday_rule(rule.clone());
            }
            Ok(Box::new(calendar))
        },
        config.scan_window_days,
    )
}

fn schedule(mut session: Session<Source>, config: &Config, args: &ScheduleArgs) -> Result<()> {
    let dates = *session.submit(&args.month)?;
    if args.applescript || args.url {
        let script = applescript(&events(&dates, &config.event_labels), &config.event_window);
        if args.url {
            println!("{}", applescript_url(&script));
        } else {
            println!("{script}");
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&dates)?);
    } else {
        for (slot, date) in dates.iter() {
            println!("{:<20} {}", slot.key(), date.format("%Y/%-m/%-d"));
        }
    }
    Ok(())
}
