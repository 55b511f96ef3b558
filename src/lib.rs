//! Japanese public holidays and business days.
//!
//! [`calendar::JapaneseCalendar`] derives every public holiday of a year from
//! the rules in [`rules`], then adds substitute holidays (振替休日) and
//! citizen's holidays (国民の休日). [`business::BusinessDayFinder`] answers
//! business-day questions on top of any [`source::HolidaySource`], caching one
//! holiday set per year, and [`schedule::settlement_dates`] picks the monthly
//! settlement dates from them.
//!
//! ```
//! use jpbiz::business::BusinessDayFinder;
//! use jpbiz::calendar::JapaneseCalendar;
//! use jpbiz::schedule::{settlement_dates, YearMonth};
//!
//! let finder = BusinessDayFinder::new(JapaneseCalendar::new());
//! let month: YearMonth = "2024-01".parse().unwrap();
//! let dates = settlement_dates(&finder, month).unwrap();
//! assert_eq!(dates.third.to_string(), "2024-01-04");
//! ```

pub mod business;
pub mod cache;
pub mod calendar;
pub mod error;
pub mod export;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod source;

pub use business::{BusinessDayFinder, MonthBusinessDays, DEFAULT_SCAN_WINDOW_DAYS};
pub use calendar::{CalendarDate, HolidayCalendar, HolidaySet, JapaneseCalendar};
pub use error::{Error, InputError, Shortfall};
pub use schedule::{settlement_dates, SettlementDates, Slot, YearMonth};
pub use session::Session;
pub use source::{HolidayEntry, HolidaySource, HolidayTable};
