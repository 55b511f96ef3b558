//! Japanese public holiday rules.
//!
//! Every rule is plain data that evaluates to at most one date per year, so the
//! yearly holiday set is just the union of all rules plus the substitute and
//! citizen's holiday passes in [`crate::calendar`].

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Yearly drift of the equinox approximation, in days.
const EQUINOX_DRIFT: f64 = 0.242194;

/// Base year of the equinox approximation.
const EQUINOX_EPOCH: i32 = 1980;

/// Specifies the nth week of a month
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NthWeek {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// Names of the holidays the calendar knows about.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HolidayName {
    NewYearsDay,
    ComingOfAgeDay,
    NationalFoundationDay,
    EmperorsBirthday,
    VernalEquinoxDay,
    ShowaDay,
    ConstitutionMemorialDay,
    GreeneryDay,
    ChildrensDay,
    MarineDay,
    MountainDay,
    RespectForTheAgedDay,
    AutumnalEquinoxDay,
    SportsDay,
    CultureDay,
    LaborThanksgivingDay,
    SubstituteHoliday,
    CitizensHoliday,
    /// Any holiday added by hand that has no name of its own.
    Special,
}

impl HolidayName {
    /// Display name of the holiday as observed in `year`.
    pub fn label(self, year: i32) -> &'static str {
        match self {
            HolidayName::NewYearsDay => "New Year's Day",
            HolidayName::ComingOfAgeDay => "Coming of Age Day",
            HolidayName::NationalFoundationDay => "National Foundation Day",
            HolidayName::EmperorsBirthday => "Emperor's Birthday",
            HolidayName::VernalEquinoxDay => "Vernal Equinox Day",
            HolidayName::ShowaDay => "Showa Day",
            HolidayName::ConstitutionMemorialDay => "Constitution Memorial Day",
            HolidayName::GreeneryDay => "Greenery Day",
            HolidayName::ChildrensDay => "Children's Day",
            HolidayName::MarineDay => "Marine Day",
            HolidayName::MountainDay => "Mountain Day",
            HolidayName::RespectForTheAgedDay => "Respect for the Aged Day",
            HolidayName::AutumnalEquinoxDay => "Autumnal Equinox Day",
            HolidayName::SportsDay if year < 2020 => "Health-Sports Day",
            HolidayName::SportsDay => "Sports Day",
            HolidayName::CultureDay => "Culture Day",
            HolidayName::LaborThanksgivingDay => "Labor Thanksgiving Day",
            HolidayName::SubstituteHoliday => "Substitute Holiday",
            HolidayName::CitizensHoliday => "Citizen's Holiday",
            HolidayName::Special => "Special Holiday",
        }
    }
}

/// A rule producing zero or one holiday per year.
///
/// `first` and `last` are the first and last year the rule applies (inclusively).
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum HolidayRule {
    /// The same month and day every year.
    FixedDay {
        name: HolidayName,
        month: u32,
        day: u32,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// The nth (or last) weekday of a month, e.g. the second Monday of January.
    MonthWeekday {
        name: HolidayName,
        month: u32,
        weekday: Weekday,
        nth: NthWeek,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// An equinox day approximated by
    /// `floor(base + 0.242194 * (year - 1980)) - floor((year - 1980) / 4)`.
    ///
    /// The approximation holds for 1980..=2099; other years use it unchanged.
    Equinox {
        name: HolidayName,
        month: u32,
        base: f64,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// A single holiday which is valid only once in time.
    SingularDay { name: HolidayName, date: NaiveDate },
}

impl HolidayRule {
    pub fn name(&self) -> HolidayName {
        match self {
            HolidayRule::FixedDay { name, .. }
            | HolidayRule::MonthWeekday { name, .. }
            | HolidayRule::Equinox { name, .. }
            | HolidayRule::SingularDay { name, .. } => *name,
        }
    }

    /// The date this rule yields in `year`, if it applies that year.
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        match self {
            HolidayRule::FixedDay {
                month,
                day,
                first,
                last,
                ..
            } => {
                if !in_years(year, *first, *last) {
                    return None;
                }
                let date = NaiveDate::from_ymd_opt(year, *month, *day);
                if date.is_none() {
                    tracing::warn!(year, month, day, "fixed holiday rule names an invalid date");
                }
                date
            }
            HolidayRule::MonthWeekday {
                month,
                weekday,
                nth,
                first,
                last,
                ..
            } => {
                if !in_years(year, *first, *last) {
                    return None;
                }
                nth_weekday_of_month(year, *month, *weekday, *nth)
            }
            HolidayRule::Equinox {
                month,
                base,
                first,
                last,
                ..
            } => {
                if !in_years(year, *first, *last) {
                    return None;
                }
                let day = equinox_day(year, *base);
                u32::try_from(day)
                    .ok()
                    .and_then(|day| NaiveDate::from_ymd_opt(year, *month, day))
            }
            HolidayRule::SingularDay { date, .. } => (date.year() == year).then_some(*date),
        }
    }
}

fn in_years(year: i32, first: Option<i32>, last: Option<i32>) -> bool {
    first.map_or(true, |first| year >= first) && last.map_or(true, |last| year <= last)
}

/// Day of month of the equinox in `year` for the given base coefficient.
pub fn equinox_day(year: i32, base: f64) -> i64 {
    let elapsed = f64::from(year - EQUINOX_EPOCH);
    (base + EQUINOX_DRIFT * elapsed).floor() as i64 - (elapsed / 4.0).floor() as i64
}

/// The `nth` occurrence of `weekday` in the given month.
///
/// Returns `None` when the month is invalid or when the occurrence would fall
/// outside the month; no clamping is done.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    nth: NthWeek,
) -> Option<NaiveDate> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let weeks = match nth {
        NthWeek::First => 0,
        NthWeek::Second => 1,
        NthWeek::Third => 2,
        NthWeek::Fourth => 3,
        NthWeek::Last => {
            let last_of_month = first_of_month
                .checked_add_days(Days::new(u64::from(last_day_of_month(year, month)?) - 1))?;
            let back = (7 + last_of_month.weekday().num_days_from_monday()
                - weekday.num_days_from_monday())
                % 7;
            return last_of_month.checked_sub_days(Days::new(u64::from(back)));
        }
    };
    let offset = (7 + weekday.num_days_from_monday()
        - first_of_month.weekday().num_days_from_monday())
        % 7;
    let date = first_of_month.checked_add_days(Days::new(u64::from(offset + 7 * weeks)))?;
    if date.month() != month {
        tracing::warn!(year, month, ?weekday, ?nth, "weekday occurrence overflows the month");
        return None;
    }
    Some(date)
}

/// Calculate the last day of a given month in a given year
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
        .map(|date| date.day())
}

/// A one-off relocation of a holiday to another date in a given year.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialShift {
    pub year: i32,
    pub name: HolidayName,
    pub month: u32,
    pub day: u32,
}

impl SpecialShift {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Holidays moved around the Tokyo Olympics (2020, then postponed to 2021).
pub const OLYMPIC_SHIFTS: [SpecialShift; 6] = [
    SpecialShift { year: 2020, name: HolidayName::MarineDay, month: 7, day: 23 },
    SpecialShift { year: 2020, name: HolidayName::SportsDay, month: 7, day: 24 },
    SpecialShift { year: 2020, name: HolidayName::MountainDay, month: 8, day: 10 },
    SpecialShift { year: 2021, name: HolidayName::MarineDay, month: 7, day: 22 },
    SpecialShift { year: 2021, name: HolidayName::SportsDay, month: 7, day: 23 },
    SpecialShift { year: 2021, name: HolidayName::MountainDay, month: 8, day: 8 },
];

fn fixed(
    name: HolidayName,
    month: u32,
    day: u32,
    first: Option<i32>,
    last: Option<i32>,
) -> HolidayRule {
    HolidayRule::FixedDay {
        name,
        month,
        day,
        first,
        last,
    }
}

fn mondays(name: HolidayName, month: u32, nth: NthWeek, first: Option<i32>) -> HolidayRule {
    HolidayRule::MonthWeekday {
        name,
        month,
        weekday: Weekday::Mon,
        nth,
        first,
        last: None,
    }
}

/// The statutory Japanese holiday rules, without substitute or citizen's holidays.
pub fn japanese_rules() -> Vec<HolidayRule> {
    use HolidayName::*;
    vec![
        fixed(NewYearsDay, 1, 1, None, None),
        mondays(ComingOfAgeDay, 1, NthWeek::Second, Some(2000)),
        fixed(ComingOfAgeDay, 1, 15, Some(1949), Some(1999)),
        fixed(NationalFoundationDay, 2, 11, None, None),
        // Heisei era, then Reiwa era; 2019 has neither
        fixed(EmperorsBirthday, 12, 23, Some(1989), Some(2018)),
        fixed(EmperorsBirthday, 2, 23, Some(2020), None),
        HolidayRule::Equinox {
            name: VernalEquinoxDay,
            month: 3,
            base: 20.8431,
            first: None,
            last: None,
        },
        fixed(ShowaDay, 4, 29, None, None),
        fixed(ConstitutionMemorialDay, 5, 3, None, None),
        fixed(GreeneryDay, 5, 4, None, None),
        fixed(ChildrensDay, 5, 5, None, None),
        mondays(MarineDay, 7, NthWeek::Third, Some(2003)),
        fixed(MarineDay, 7, 20, Some(1996), Some(2002)),
        fixed(MountainDay, 8, 11, Some(2016), None),
        mondays(RespectForTheAgedDay, 9, NthWeek::Third, Some(2003)),
        fixed(RespectForTheAgedDay, 9, 15, Some(1966), Some(2002)),
        HolidayRule::Equinox {
            name: AutumnalEquinoxDay,
            month: 9,
            base: 23.2488,
            first: None,
            last: None,
        },
        mondays(SportsDay, 10, NthWeek::Second, Some(2000)),
        fixed(SportsDay, 10, 10, Some(1966), Some(1999)),
        fixed(CultureDay, 11, 3, None, None),
        fixed(LaborThanksgivingDay, 11, 23, None, None),
    ]
}
