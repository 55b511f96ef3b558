//! Calendar.app export of settlement dates as AppleScript.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schedule::{SettlementDates, Slot};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One calendar event to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub date: NaiveDate,
}

/// Hours of day between which exported events run.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EventWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for EventWindow {
    fn default() -> Self {
        EventWindow {
            start_hour: 8,
            end_hour: 12,
        }
    }
}

/// Labels used when none are configured.
pub fn default_labels() -> BTreeMap<Slot, String> {
    BTreeMap::from([
        (Slot::Second, "楽天売却①、マネックス売却".to_string()),
        (Slot::Third, "三菱UFJe売却".to_string()),
    ])
}

/// One event per labelled slot; slots without a label are skipped.
pub fn events(dates: &SettlementDates, labels: &BTreeMap<Slot, String>) -> Vec<CalendarEvent> {
    dates
        .iter()
        .filter_map(|(slot, date)| {
            labels.get(&slot).map(|summary| CalendarEvent {
                summary: summary.clone(),
                date,
            })
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn event_block(event: &CalendarEvent, window: &EventWindow) -> String {
    let month_name = MONTH_NAMES[event.date.month0() as usize];
    [
        "    set theDate to current date".to_string(),
        format!("    set year of theDate to {}", event.date.year()),
        format!("    set month of theDate to {month_name}"),
        format!("    set day of theDate to {}", event.date.day()),
        format!("    set time of theDate to ({} * hours)", window.start_hour),
        "    copy theDate to theEndDate".to_string(),
        format!("    set time of theEndDate to ({} * hours)", window.end_hour),
        format!(
            "    make new event with properties {{summary:\"{}\", start date:theDate, end date:theEndDate}}",
            escape(&event.summary)
        ),
    ]
    .join("\n")
}

/// AppleScript creating `events` in the first calendar of Calendar.app.
pub fn applescript(events: &[CalendarEvent], window: &EventWindow) -> String {
    let body = events
        .iter()
        .map(|event| event_block(event, window))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "tell application \"Calendar\"\n  activate\n  tell calendar 1\n{body}\n  end tell\nend tell"
    )
}

/// A URL that opens `script` in Script Editor.
pub fn applescript_url(script: &str) -> String {
    format!(
        "applescript://com.apple.scripteditor?action=new&script={}",
        urlencoding::encode(script)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn dates() -> SettlementDates {
        SettlementDates {
            second: ymd(2024, 1, 3),
            third: ymd(2024, 1, 4),
            second_from_three: ymd(2024, 1, 4),
            second_from_eight: ymd(2024, 1, 10),
            second_from_twelve: ymd(2024, 1, 15),
            second_from_twenty_six: ymd(2024, 1, 29),
            fifth_from_twenty_six: ymd(2024, 2, 1),
        }
    }

    #[test]
    fn default_labels_export_second_and_third() {
        let events = events(&dates(), &default_labels());
        assert_eq!(
            events,
            vec![
                CalendarEvent {
                    summary: "楽天売却①、マネックス売却".to_string(),
                    date: ymd(2024, 1, 3),
                },
                CalendarEvent {
                    summary: "三菱UFJe売却".to_string(),
                    date: ymd(2024, 1, 4),
                },
            ]
        );
    }

    #[test]
    fn applescript_for_one_event() {
        let events = vec![CalendarEvent {
            summary: "say \"hi\"".to_string(),
            date: ymd(2024, 2, 1),
        }];
        let script = applescript(&events, &EventWindow::default());
        assert_eq!(
            script,
            r#"tell application "Calendar"
  activate
  tell calendar 1
    set theDate to current date
    set year of theDate to 2024
    set month of theDate to February
    set day of theDate to 1
    set time of theDate to (8 * hours)
    copy theDate to theEndDate
    set time of theEndDate to (12 * hours)
    make new event with properties {summary:"say \"hi\"", start date:theDate, end date:theEndDate}
  end tell
end tell"#
        );
    }

    #[test]
    fn url_is_percent_encoded() {
        let url = applescript_url("tell app \"Calendar\"");
        assert_eq!(
            url,
            "applescript://com.apple.scripteditor?action=new&script=tell%20app%20%22Calendar%22"
        );
    }
}
