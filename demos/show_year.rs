use chrono::Datelike;
use jpbiz::{HolidayCalendar, JapaneseCalendar};
/// example to show holidays, with substitute and citizen's holidays, for a range of years
use std::env::args;
use std::process;

fn main() {
    let args: Vec<String> = args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} first [last]", args[0]);
        process::exit(2);
    }
    let parse = |s: &str| {
        s.parse::<i32>().unwrap_or_else(|_| {
            eprintln!("not a year: {s}");
            process::exit(2)
        })
    };
    let first = parse(&args[1]);
    let last = args.get(2).map(|s| parse(s)).unwrap_or(first);

    let calendar = HolidayCalendar::new(JapaneseCalendar::new());
    for year in first..=last {
        let holidays = calendar.holidays_for_year(year);
        println!("{year}: {} holidays", holidays.len());
        for (date, name) in holidays.iter() {
            println!("  {date} {} {name}", date.weekday());
        }
    }
}
