//! Business days: Monday to Friday, excluding public holidays.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::calendar::{HolidayCalendar, HolidaySet};
use crate::error::{Error, InputError};
use crate::rules::last_day_of_month;
use crate::source::HolidaySource;

/// Calendar days scanned by [`BusinessDayFinder::nth_business_day_from`] before
/// giving up. A safety bound, not a property of the calendar.
pub const DEFAULT_SCAN_WINDOW_DAYS: u32 = 120;

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business-day queries on top of a [`HolidayCalendar`].
#[derive(Debug)]
pub struct BusinessDayFinder<S> {
    calendar: HolidayCalendar<S>,
    scan_window_days: u32,
}

impl<S: HolidaySource> BusinessDayFinder<S> {
    pub fn new(source: S) -> BusinessDayFinder<S> {
        BusinessDayFinder::with_calendar(HolidayCalendar::new(source))
    }

    pub fn with_calendar(calendar: HolidayCalendar<S>) -> BusinessDayFinder<S> {
        BusinessDayFinder {
            calendar,
            scan_window_days: DEFAULT_SCAN_WINDOW_DAYS,
        }
    }

    /// Change how many calendar days a forward or backward search may examine.
    pub fn with_scan_window(mut self, days: u32) -> BusinessDayFinder<S> {
        self.scan_window_days = days;
        self
    }

    pub fn scan_window_days(&self) -> u32 {
        self.scan_window_days
    }

    pub fn calendar(&self) -> &HolidayCalendar<S> {
        &self.calendar
    }

    /// Returns true if the specified day is a holiday
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.calendar.is_holiday(date)
    }

    /// Returns true if the specified day is a business day
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        is_weekday(date) && !self.calendar.is_holiday(date)
    }

    /// The business days of a month, in chronological order.
    pub fn business_days_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthBusinessDays, Error> {
        let last_day = last_day_of_month(year, month)
            .ok_or(Error::InvalidInput(InputError::MonthOutOfRange { month }))?;
        Ok(MonthBusinessDays {
            year,
            month,
            last_day,
            holidays: self.calendar.holidays_for_year(year),
        })
    }

    /// The date on which the `n`th business day is reached, counting `start` itself.
    pub fn nth_business_day_from(&self, start: NaiveDate, n: u32) -> Result<NaiveDate, Error> {
        if n == 0 {
            return Err(Error::InvalidArgument { n });
        }
        let window = self.scan_window_days;
        let mut holidays: Option<Arc<HolidaySet>> = None;
        let mut count = 0;
        for date in start.iter_days().take(window as usize) {
            // each date is judged by its own year's holidays
            let set = match holidays.take() {
                Some(set) if set.year() == date.year() => set,
                _ => self.calendar.holidays_for_year(date.year()),
            };
            if is_weekday(date) && !set.contains(date) {
                count += 1;
                if count == n {
                    return Ok(date);
                }
            }
            holidays = Some(set);
        }
        tracing::warn!(%start, n, window, found = count, "business day search exhausted");
        Err(Error::SearchExhausted { start, n, window })
    }

    /// Calculate the next business day
    pub fn next_business_day(&self, date: NaiveDate) -> Result<NaiveDate, Error> {
        let next = date.succ_opt().ok_or(Error::SearchExhausted {
            start: date,
            n: 1,
            window: 0,
        })?;
        self.nth_business_day_from(next, 1)
    }

    /// Calculate the previous business day
    pub fn previous_business_day(&self, date: NaiveDate) -> Result<NaiveDate, Error> {
        let window = self.scan_window_days;
        let mut day = date;
        for _ in 0..window {
            day = match day.checked_sub_days(Days::new(1)) {
                Some(day) => day,
                None => break,
            };
            if self.is_business_day(day) {
                return Ok(day);
            }
        }
        tracing::warn!(%date, window, "previous business day search exhausted");
        Err(Error::SearchExhausted {
            start: date,
            n: 1,
            window,
        })
    }
}

/// The business days of one month.
///
/// Holds the year's holiday set, so it can be iterated any number of times
/// without touching the calendar again.
#[derive(Debug, Clone)]
pub struct MonthBusinessDays {
    year: i32,
    month: u32,
    last_day: u32,
    holidays: Arc<HolidaySet>,
}

impl MonthBusinessDays {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.last_day)
            .filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .filter(|date| is_weekday(*date) && !self.holidays.contains(*date))
    }

    /// Business days falling on or after `day` of the month.
    pub fn on_or_after(&self, day: u32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.iter().filter(move |date| date.day() >= day)
    }

    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a MonthBusinessDays {
    type Item = NaiveDate;
    type IntoIter = Box<dyn Iterator<Item = NaiveDate> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
