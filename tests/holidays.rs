use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use jpbiz::{HolidayCalendar, HolidayEntry, HolidaySource, JapaneseCalendar};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn olympic_year_2021() {
    let calendar = HolidayCalendar::new(JapaneseCalendar::new());
    let set = calendar.holidays_for_year(2021);
    assert_eq!(set.name(ymd(2021, 7, 22)), Some("Marine Day"));
    assert_eq!(set.name(ymd(2021, 7, 23)), Some("Sports Day"));
    assert_eq!(set.name(ymd(2021, 8, 8)), Some("Mountain Day"));
}

#[test]
fn no_emperors_birthday_in_2019() {
    let calendar = HolidayCalendar::new(JapaneseCalendar::new());
    let set = calendar.holidays_for_year(2019);
    assert!(set.iter().all(|(_, name)| name != "Emperor's Birthday"));
}

#[test]
fn constitution_day_on_sunday_2020() {
    let calendar = HolidayCalendar::new(JapaneseCalendar::new());
    assert_eq!(ymd(2020, 5, 3).weekday(), Weekday::Sun);
    let set = calendar.holidays_for_year(2020);
    let may: Vec<NaiveDate> = set.dates().filter(|d| d.month() == 5).collect();
    assert_eq!(
        may,
        vec![ymd(2020, 5, 3), ymd(2020, 5, 4), ymd(2020, 5, 5), ymd(2020, 5, 6)]
    );
    assert_eq!(set.name(ymd(2020, 5, 6)), Some("Substitute Holiday"));
}

#[test]
fn equinoxes_2025() {
    let set = JapaneseCalendar::new().holiday_set(2025);
    assert_eq!(set.name(ymd(2025, 3, 20)), Some("Vernal Equinox Day"));
    assert_eq!(set.name(ymd(2025, 9, 23)), Some("Autumnal Equinox Day"));
}

#[test]
fn every_set_belongs_to_its_year() {
    let calendar = HolidayCalendar::new(JapaneseCalendar::new());
    for year in [1949, 1980, 2000, 2019, 2024, 2099] {
        let set = calendar.holidays_for_year(year);
        assert_eq!(set.year(), year);
        assert!(set.dates().all(|d| d.year() == year), "year {year}");
    }
}

/// Counts how often a year is asked for.
struct CountingSource {
    inner: JapaneseCalendar,
    calls: AtomicUsize,
}

impl HolidaySource for CountingSource {
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.between(start, end)
    }
}

#[test]
fn holiday_set_computed_once_under_concurrency() {
    let calendar = Arc::new(HolidayCalendar::new(CountingSource {
        inner: JapaneseCalendar::new(),
        calls: AtomicUsize::new(0),
    }));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let calendar = Arc::clone(&calendar);
            std::thread::spawn(move || calendar.holidays_for_year(2024))
        })
        .collect();
    let sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(calendar.source().calls.load(Ordering::SeqCst), 1);
    assert!(sets.iter().all(|set| Arc::ptr_eq(set, &sets[0])));
}
