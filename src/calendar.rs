//! Implementation of the Japanese public holiday calendar, including substitute
//! holidays (振替休日) and citizen's holidays (国民の休日).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::cache::HolidayCache;
use crate::rules::{japanese_rules, HolidayName, HolidayRule, SpecialShift, OLYMPIC_SHIFTS};
use crate::source::{HolidayEntry, HolidaySource};

/// A date in the proleptic Gregorian calendar.
pub type CalendarDate = NaiveDate;

/// All holidays of a single year, with their names.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    days: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn empty(year: i32) -> HolidaySet {
        HolidaySet {
            year,
            days: BTreeMap::new(),
        }
    }

    /// Build the set for `year` from a list of entries; entries of other years are dropped.
    pub fn from_entries(year: i32, entries: impl IntoIterator<Item = HolidayEntry>) -> HolidaySet {
        HolidaySet {
            year,
            days: entries
                .into_iter()
                .filter(|entry| entry.date.year() == year)
                .map(|entry| (entry.date, entry.name))
                .collect(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if the specified day is in this set
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.days.get(&date).map(String::as_str)
    }

    /// Holidays in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> + '_ {
        self.days.iter().map(|(date, name)| (*date, name.as_str()))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Rule-based Japanese holiday calendar.
#[derive(Debug, Clone)]
pub struct JapaneseCalendar {
    rules: Vec<HolidayRule>,
    shifts: Vec<SpecialShift>,
}

impl Default for JapaneseCalendar {
    fn default() -> Self {
        JapaneseCalendar::new()
    }
}

impl JapaneseCalendar {
    /// Calendar with the statutory rules and the Olympic relocations.
    pub fn new() -> JapaneseCalendar {
        JapaneseCalendar {
            rules: japanese_rules(),
            shifts: OLYMPIC_SHIFTS.to_vec(),
        }
    }

    /// add an ad-hoc holiday rule to the rule list
    pub fn add_holiday_rule(&mut self, rule: HolidayRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Relocate a holiday for one year, replacing its default rules that year.
    pub fn add_special_shift(&mut self, shift: SpecialShift) -> &mut Self {
        self.shifts.push(shift);
        self
    }

    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    /// Holidays given directly by the rules and shifts, before substitute and
    /// citizen's holidays are derived.
    pub fn primary_holidays(&self, year: i32) -> BTreeMap<NaiveDate, HolidayName> {
        let mut holidays = BTreeMap::new();
        let shifted: Vec<&SpecialShift> =
            self.shifts.iter().filter(|shift| shift.year == year).collect();

        for shift in &shifted {
            match shift.date() {
                Some(date) => {
                    holidays.insert(date, shift.name);
                }
                None => tracing::warn!(?shift, "special shift names an invalid date"),
            }
        }
        for rule in &self.rules {
            let name = rule.name();
            if shifted.iter().any(|shift| shift.name == name) {
                continue;
            }
            if let Some(date) = rule.date_in(year) {
                holidays.entry(date).or_insert(name);
            }
        }
        holidays
    }

    /// All holidays of `year` by name.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn observed_holidays(&self, year: i32) -> BTreeMap<NaiveDate, HolidayName> {
        let mut holidays = self.primary_holidays(year);

        // a holiday on a Sunday moves to the next day that is not already a holiday
        let substitutes: Vec<NaiveDate> = holidays
            .keys()
            .filter(|date| date.weekday() == Weekday::Sun)
            .filter_map(|date| {
                let mut candidate = date.succ_opt()?;
                while holidays.contains_key(&candidate) {
                    candidate = candidate.succ_opt()?;
                }
                Some(candidate)
            })
            .collect();
        for date in substitutes {
            holidays.entry(date).or_insert(HolidayName::SubstituteHoliday);
        }

        // a day sandwiched between two holidays becomes one
        let citizens: Vec<NaiveDate> = days_of_year(year)
            .filter(|date| !holidays.contains_key(date))
            .filter(|date| {
                let before = date.pred_opt().is_some_and(|d| holidays.contains_key(&d));
                let after = date.succ_opt().is_some_and(|d| holidays.contains_key(&d));
                before && after
            })
            .collect();
        for date in citizens {
            holidays.insert(date, HolidayName::CitizensHoliday);
        }

        holidays.retain(|date, _| date.year() == year);
        holidays
    }

    /// The complete holiday set of `year`.
    pub fn holiday_set(&self, year: i32) -> HolidaySet {
        HolidaySet {
            year,
            days: self
                .observed_holidays(year)
                .into_iter()
                .map(|(date, name)| (date, name.label(year).to_string()))
                .collect(),
        }
    }
}

impl HolidaySource for JapaneseCalendar {
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        (start.year()..=end.year())
            .flat_map(|year| self.holiday_set(year).days)
            .filter(|(date, _)| *date >= start && *date <= end)
            .map(|(date, name)| HolidayEntry { date, name })
            .collect()
    }
}

/// Every date of `year` from January 1 to December 31.
pub fn days_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    first
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(move |date| date.year() == year)
}

/// Returns true if the specified year is a leap year (i.e. Feb 29th exists for this year)
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Holiday sets per year from a [`HolidaySource`], cached for the life of the calendar.
#[derive(Debug)]
pub struct HolidayCalendar<S> {
    source: S,
    cache: HolidayCache,
}

impl<S: HolidaySource> HolidayCalendar<S> {
    pub fn new(source: S) -> HolidayCalendar<S> {
        HolidayCalendar {
            source,
            cache: HolidayCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The holiday set of `year`; computed on first request, then shared.
    pub fn holidays_for_year(&self, year: i32) -> Arc<HolidaySet> {
        self.cache.get_or_compute(year, || {
            let entries = match (
                NaiveDate::from_ymd_opt(year, 1, 1),
                NaiveDate::from_ymd_opt(year, 12, 31),
            ) {
                (Some(start), Some(end)) => self.source.between(start, end),
                _ => Vec::new(),
            };
            let set = HolidaySet::from_entries(year, entries);
            tracing::debug!(year, holidays = set.len(), "computed holiday set");
            set
        })
    }

    /// Returns true if the specified day is a holiday
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays_for_year(date.year()).contains(date)
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<String> {
        self.holidays_for_year(date.year())
            .name(date)
            .map(str::to_string)
    }

    /// Years computed so far.
    pub fn cached_years(&self) -> Vec<i32> {
        self.cache.cached_years()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::NthWeek;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_fixed_holidays_2024() {
        let set = JapaneseCalendar::new().holiday_set(2024);
        for (month, day) in [(1, 1), (2, 11), (4, 29), (5, 3), (5, 4), (5, 5), (11, 3), (11, 23)] {
            assert!(set.contains(ymd(2024, month, day)), "{month}/{day}");
        }
        assert_eq!(set.name(ymd(2024, 2, 23)), Some("Emperor's Birthday"));
        assert!(!set.contains(ymd(2024, 12, 23)));
    }

    #[test]
    fn test_full_year_2024() {
        let set = JapaneseCalendar::new().holiday_set(2024);
        let expected = [
            (1, 1),
            (1, 8),
            (2, 11),
            (2, 12),
            (2, 23),
            (3, 20),
            (4, 29),
            (5, 3),
            (5, 4),
            (5, 5),
            (5, 6),
            (7, 15),
            (8, 11),
            (8, 12),
            (9, 16),
            (9, 22),
            (9, 23),
            (10, 14),
            (11, 3),
            (11, 4),
            (11, 23),
        ];
        let dates: Vec<NaiveDate> = set.dates().collect();
        let expected: Vec<NaiveDate> = expected.iter().map(|(m, d)| ymd(2024, *m, *d)).collect();
        assert_eq!(dates, expected);
        assert_eq!(set.name(ymd(2024, 5, 6)), Some("Substitute Holiday"));
    }

    #[test]
    fn test_emperors_birthday_eras() {
        let cal = JapaneseCalendar::new();
        assert!(cal.holiday_set(2018).contains(ymd(2018, 12, 23)));
        let set = cal.holiday_set(2019);
        assert!(!set.contains(ymd(2019, 12, 23)));
        assert!(!set.contains(ymd(2019, 2, 23)));
        assert!(cal.holiday_set(2020).contains(ymd(2020, 2, 23)));
        assert!(!cal.holiday_set(1988).contains(ymd(1988, 12, 23)));
    }

    #[test]
    fn test_olympic_shifts() {
        let cal = JapaneseCalendar::new();
        let set = cal.holiday_set(2021);
        assert_eq!(set.name(ymd(2021, 7, 22)), Some("Marine Day"));
        assert_eq!(set.name(ymd(2021, 7, 23)), Some("Sports Day"));
        assert_eq!(set.name(ymd(2021, 8, 8)), Some("Mountain Day"));
        // Mountain Day 2021 is a Sunday
        assert_eq!(set.name(ymd(2021, 8, 9)), Some("Substitute Holiday"));
        assert!(!set.contains(ymd(2021, 7, 19)));
        assert!(!set.contains(ymd(2021, 8, 11)));
        assert!(!set.contains(ymd(2021, 10, 11)));

        let set = cal.holiday_set(2020);
        assert!(set.contains(ymd(2020, 7, 23)));
        assert!(set.contains(ymd(2020, 7, 24)));
        assert!(set.contains(ymd(2020, 8, 10)));
        assert!(!set.contains(ymd(2020, 7, 20)));
        assert!(!set.contains(ymd(2020, 10, 12)));
    }

    #[test]
    fn test_substitute_skips_following_holidays() {
        // May 3 2020 is a Sunday, May 4 and 5 are holidays already
        let set = JapaneseCalendar::new().holiday_set(2020);
        assert_eq!(set.name(ymd(2020, 5, 6)), Some("Substitute Holiday"));
        assert!(!set.contains(ymd(2020, 5, 7)));
    }

    #[test]
    fn test_citizens_holiday_silver_week() {
        let cal = JapaneseCalendar::new();
        assert_eq!(
            cal.holiday_set(2015).name(ymd(2015, 9, 22)),
            Some("Citizen's Holiday")
        );
        assert_eq!(
            cal.holiday_set(2009).name(ymd(2009, 9, 22)),
            Some("Citizen's Holiday")
        );
    }

    #[test]
    fn test_pre_2000_fixed_dates() {
        let set = JapaneseCalendar::new().holiday_set(1998);
        assert_eq!(set.name(ymd(1998, 1, 15)), Some("Coming of Age Day"));
        assert_eq!(set.name(ymd(1998, 7, 20)), Some("Marine Day"));
        assert_eq!(set.name(ymd(1998, 9, 15)), Some("Respect for the Aged Day"));
        assert_eq!(set.name(ymd(1998, 10, 10)), Some("Health-Sports Day"));
    }

    #[test]
    fn test_calendar_with_new_rule() {
        let mut cal = JapaneseCalendar::new();
        cal.add_holiday_rule(HolidayRule::MonthWeekday {
            name: HolidayName::Special,
            month: 6,
            weekday: Weekday::Wed,
            nth: NthWeek::Third,
            first: None,
            last: None,
        });
        assert_eq!(
            cal.holiday_set(2024).name(ymd(2024, 6, 19)),
            Some("Special Holiday")
        );
    }

    #[test]
    fn test_special_shift_replaces_rule() {
        let mut cal = JapaneseCalendar::new();
        cal.add_special_shift(SpecialShift {
            year: 2030,
            name: HolidayName::CultureDay,
            month: 11,
            day: 5,
        });
        let set = cal.holiday_set(2030);
        assert!(set.contains(ymd(2030, 11, 5)));
        assert!(!set.contains(ymd(2030, 11, 3)));
    }

    #[test]
    fn test_between_spans_years() {
        let entries = JapaneseCalendar::new().between(ymd(2024, 12, 1), ymd(2025, 1, 31));
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![ymd(2025, 1, 1), ymd(2025, 1, 13)]);
    }

    #[test]
    fn test_holiday_calendar_caches() {
        let cal = HolidayCalendar::new(JapaneseCalendar::new());
        let a = cal.holidays_for_year(2024);
        let b = cal.holidays_for_year(2024);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(cal.is_holiday(ymd(2025, 1, 1)));
        assert_eq!(cal.cached_years(), vec![2024, 2025]);
        assert_eq!(cal.holiday_name(ymd(2024, 1, 8)).as_deref(), Some("Coming of Age Day"));
    }

    #[test]
    fn test_days_of_year() {
        assert_eq!(days_of_year(2024).count(), 366);
        assert_eq!(days_of_year(2023).count(), 365);
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2100));
    }
}
