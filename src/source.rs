//! Where holiday dates come from.
//!
//! [`HolidaySource`] is the capability the rest of the crate consumes. The
//! rule-based [`crate::calendar::JapaneseCalendar`] implements it, and so does
//! [`HolidayTable`], a list of dated holidays loaded from JSON.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One holiday: its date and display name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub name: String,
}

/// Anything that can list the holidays between two dates (inclusively).
pub trait HolidaySource {
    /// Holidays with `start <= date <= end`, in chronological order.
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry>;
}

impl<S: HolidaySource + ?Sized> HolidaySource for Box<S> {
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        (**self).between(start, end)
    }
}

impl<S: HolidaySource + ?Sized> HolidaySource for &S {
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        (**self).between(start, end)
    }
}

/// Accepted JSON shapes: a list of entries, or an object keyed by date.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableDocument {
    List(Vec<HolidayEntry>),
    Map(BTreeMap<NaiveDate, String>),
}

/// A fixed table of holidays, typically loaded from a published data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    days: BTreeMap<NaiveDate, String>,
}

impl HolidayTable {
    pub fn new(entries: impl IntoIterator<Item = HolidayEntry>) -> HolidayTable {
        HolidayTable {
            days: entries
                .into_iter()
                .map(|entry| (entry.date, entry.name))
                .collect(),
        }
    }

    /// Parse a table from JSON.
    ///
    /// Both `[{"date": "2024-01-01", "name": "元日"}]` and
    /// `{"2024-01-01": "元日"}` are accepted.
    pub fn from_json_str(json: &str) -> Result<HolidayTable, Error> {
        let document: TableDocument =
            serde_json::from_str(json).map_err(|e| Error::HolidayDataUnavailable {
                reason: format!("invalid holiday table: {e}"),
            })?;
        let days = match document {
            TableDocument::List(entries) => return Ok(HolidayTable::new(entries)),
            TableDocument::Map(days) => days,
        };
        Ok(HolidayTable { days })
    }

    /// Read and parse a JSON table from `path`.
    pub fn from_path(path: &Path) -> Result<HolidayTable, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::HolidayDataUnavailable {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        HolidayTable::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl HolidaySource for HolidayTable {
    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayEntry> {
        if start > end {
            return Vec::new();
        }
        self.days
            .range(start..=end)
            .map(|(date, name)| HolidayEntry {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }
}
