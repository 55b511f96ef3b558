//! Settlement dates picked from a month's business days.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::business::BusinessDayFinder;
use crate::error::{Error, InputError, Shortfall};
use crate::source::HolidaySource;

/// Days of month from which the second business day is taken.
pub const SECOND_FROM_DAYS: [u32; 4] = [3, 8, 12, 26];

/// A month as picked in a month input (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<YearMonth, Error> {
        if !(1..=12).contains(&month) {
            return Err(InputError::MonthOutOfRange { month }.into());
        }
        Ok(YearMonth { year, month })
    }

    /// The given day of this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(InputError::Empty.into());
        }
        let malformed = || {
            Error::from(InputError::Malformed {
                input: input.to_string(),
            })
        };
        let (year, month) = input.split_once('-').ok_or_else(malformed)?;
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        YearMonth::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Names of the individual settlement dates.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Second,
    Third,
    SecondFromThree,
    SecondFromEight,
    SecondFromTwelve,
    SecondFromTwentySix,
    FifthFromTwentySix,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Second,
        Slot::Third,
        Slot::SecondFromThree,
        Slot::SecondFromEight,
        Slot::SecondFromTwelve,
        Slot::SecondFromTwentySix,
        Slot::FifthFromTwentySix,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Second => "second",
            Slot::Third => "third",
            Slot::SecondFromThree => "secondFromThree",
            Slot::SecondFromEight => "secondFromEight",
            Slot::SecondFromTwelve => "secondFromTwelve",
            Slot::SecondFromTwentySix => "secondFromTwentySix",
            Slot::FifthFromTwentySix => "fifthFromTwentySix",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The business-day offsets computed for one month.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettlementDates {
    pub second: NaiveDate,
    pub third: NaiveDate,
    pub second_from_three: NaiveDate,
    pub second_from_eight: NaiveDate,
    pub second_from_twelve: NaiveDate,
    pub second_from_twenty_six: NaiveDate,
    pub fifth_from_twenty_six: NaiveDate,
}

impl SettlementDates {
    pub fn get(&self, slot: Slot) -> NaiveDate {
        match slot {
            Slot::Second => self.second,
            Slot::Third => self.third,
            Slot::SecondFromThree => self.second_from_three,
            Slot::SecondFromEight => self.second_from_eight,
            Slot::SecondFromTwelve => self.second_from_twelve,
            Slot::SecondFromTwentySix => self.second_from_twenty_six,
            Slot::FifthFromTwentySix => self.fifth_from_twenty_six,
        }
    }

    /// Every slot with its date, in [`Slot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, NaiveDate)> + '_ {
        Slot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

/// Compute the settlement dates of `month`.
///
/// The month needs at least three business days, and at least two on or after
/// each of days 3, 8, 12 and 26; the fifth business day from the 26th is then
/// searched for across the month end.
pub fn settlement_dates<S: HolidaySource>(
    finder: &BusinessDayFinder<S>,
    month: YearMonth,
) -> Result<SettlementDates, Error> {
    let days = finder.business_days_in_month(month.year, month.month)?;
    let all = days.to_vec();
    if all.len() < 3 {
        return Err(Error::InsufficientBusinessDays(Shortfall::Month {
            found: all.len(),
        }));
    }

    let second_from = |day: u32| -> Result<NaiveDate, Error> {
        let from: Vec<NaiveDate> = days.on_or_after(day).collect();
        from.get(1)
            .copied()
            .ok_or(Error::InsufficientBusinessDays(Shortfall::FromDay {
                day,
                found: from.len(),
            }))
    };
    let [three, eight, twelve, twenty_six] = SECOND_FROM_DAYS;
    let second_from_three = second_from(three)?;
    let second_from_eight = second_from(eight)?;
    let second_from_twelve = second_from(twelve)?;
    let second_from_twenty_six = second_from(twenty_six)?;

    let start = month
        .day(twenty_six)
        .ok_or(Error::InvalidInput(InputError::MonthOutOfRange { month: month.month }))?;
    let fifth_from_twenty_six = finder.nth_business_day_from(start, 5)?;

    Ok(SettlementDates {
        second: all[1],
        third: all[2],
        second_from_three,
        second_from_eight,
        second_from_twelve,
        second_from_twenty_six,
        fifth_from_twenty_six,
    })
}
