//! Error types shared by every fallible operation in the crate.

use chrono::NaiveDate;

/// Why a year-month input was rejected before reaching the calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Nothing was entered.
    #[error("no year-month given")]
    Empty,

    /// The text is not of the form `YYYY-MM`.
    #[error("malformed year-month: {input:?} (expected YYYY-MM)")]
    Malformed {
        /// The rejected text.
        input: String,
    },

    /// The month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    MonthOutOfRange {
        /// The rejected month number.
        month: u32,
    },
}

/// A business-day threshold that a month failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    /// The month has fewer than three business days.
    Month {
        /// Business days found in the month.
        found: usize,
    },

    /// Fewer than two business days fall on or after `day`.
    FromDay {
        /// Day of month the list was filtered from.
        day: u32,
        /// Business days found on or after `day`.
        found: usize,
    },
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shortfall::Month { found } => {
                write!(f, "month has {found} business days (need at least 3)")
            }
            Shortfall::FromDay { day, found } => write!(
                f,
                "{found} business days on or after day {day} (need at least 2)"
            ),
        }
    }
}

/// Error type for all fallible operations in the jpbiz crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The year-month input was empty, unparseable or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// A business-day count below 1 was requested.
    #[error("invalid argument: business day count must be at least 1, got {n}")]
    InvalidArgument {
        /// The rejected count.
        n: u32,
    },

    /// The month does not have enough business days for a selection.
    #[error("insufficient business days: {0}")]
    InsufficientBusinessDays(Shortfall),

    /// The forward scan ran out of calendar days before finding `n` business days.
    #[error("no {n}th business day within {window} days from {start}")]
    SearchExhausted {
        /// First date scanned.
        start: NaiveDate,
        /// Business days requested.
        n: u32,
        /// Calendar days examined.
        window: u32,
    },

    /// The holiday data could not be loaded.
    #[error("holiday data unavailable: {reason}")]
    HolidayDataUnavailable {
        /// What went wrong while loading.
        reason: String,
    },
}

impl Error {
    /// The fixed message shown to the person using the month picker.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(InputError::Empty) => "年月を選択してください。".to_string(),
            Error::InvalidInput(_) => "年月の形式が正しくありません。".to_string(),
            Error::InvalidArgument { .. } => "営業日数は1以上を指定してください。".to_string(),
            Error::InsufficientBusinessDays(Shortfall::Month { .. }) => {
                "この月には平日（祝日除く）が3日未満です。".to_string()
            }
            Error::InsufficientBusinessDays(Shortfall::FromDay { day, .. }) => {
                format!("この月の{day}日以降には平日（祝日除く）が2日未満です。")
            }
            Error::SearchExhausted { start, n, .. } => format!(
                "{}以降の{n}営業日目を求められませんでした。",
                start.format("%Y/%-m/%-d")
            ),
            Error::HolidayDataUnavailable { .. } => {
                "祝日データを読み込めませんでした。再読み込みしてください。".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_search_exhausted() {
        let err = Error::SearchExhausted {
            start: NaiveDate::from_ymd_opt(2024, 12, 26).unwrap(),
            n: 5,
            window: 120,
        };
        assert_eq!(
            err.to_string(),
            "no 5th business day within 120 days from 2024-12-26"
        );
        assert_eq!(err.user_message(), "2024/12/26以降の5営業日目を求められませんでした。");
    }

    #[test]
    fn error_from_input_error() {
        let err: Error = InputError::MonthOutOfRange { month: 13 }.into();
        assert_eq!(err.to_string(), "invalid input: invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn user_messages_are_distinct_per_case() {
        let errors = vec![
            Error::InvalidInput(InputError::Empty),
            Error::InvalidInput(InputError::Malformed {
                input: "x".to_string(),
            }),
            Error::InvalidArgument { n: 0 },
            Error::InsufficientBusinessDays(Shortfall::Month { found: 2 }),
            Error::InsufficientBusinessDays(Shortfall::FromDay { day: 3, found: 1 }),
            Error::InsufficientBusinessDays(Shortfall::FromDay { day: 8, found: 1 }),
            Error::InsufficientBusinessDays(Shortfall::FromDay { day: 12, found: 1 }),
            Error::InsufficientBusinessDays(Shortfall::FromDay { day: 26, found: 0 }),
            Error::SearchExhausted {
                start: NaiveDate::from_ymd_opt(2024, 1, 26).unwrap(),
                n: 5,
                window: 4,
            },
            Error::HolidayDataUnavailable {
                reason: "missing".to_string(),
            },
        ];
        let mut messages: Vec<String> = errors.iter().map(Error::user_message).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<Error>();
    }
}
