//! The month-picker façade: load holiday data once, then answer requests.

use crate::business::BusinessDayFinder;
use crate::error::Error;
use crate::schedule::{settlement_dates, SettlementDates, YearMonth};
use crate::source::HolidaySource;

#[derive(Debug)]
enum State<S> {
    Ready(BusinessDayFinder<S>),
    Unavailable(Error),
}

/// A session over one holiday source.
///
/// The source is loaded exactly once in [`Session::start`]. If loading fails the
/// session stays unavailable and every request reports the load error. Only the
/// result of the most recent successful request is kept; a failed request
/// clears it.
#[derive(Debug)]
pub struct Session<S> {
    state: State<S>,
    last: Option<SettlementDates>,
}

impl<S: HolidaySource> Session<S> {
    /// Run the loader and open the session.
    pub fn start<F>(load: F, scan_window_days: u32) -> Session<S>
    where
        F: FnOnce() -> Result<S, Error>,
    {
        let state = match load() {
            Ok(source) => {
                tracing::info!("holiday data ready");
                State::Ready(BusinessDayFinder::new(source).with_scan_window(scan_window_days))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load holiday data");
                State::Unavailable(e)
            }
        };
        Session { state, last: None }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// The finder, once holiday data is available.
    pub fn finder(&self) -> Result<&BusinessDayFinder<S>, Error> {
        match &self.state {
            State::Ready(finder) => Ok(finder),
            State::Unavailable(e) => Err(e.clone()),
        }
    }

    /// Compute the settlement dates for a `YYYY-MM` input.
    pub fn submit(&mut self, input: &str) -> Result<&SettlementDates, Error> {
        self.last = None;
        let finder = self.finder()?;
        let month: YearMonth = input.parse()?;
        let dates = settlement_dates(finder, month)?;
        Ok(self.last.insert(dates))
    }

    /// The result of the last successful [`Session::submit`], if the latest one succeeded.
    pub fn last_computed(&self) -> Option<&SettlementDates> {
        self.last.as_ref()
    }
}
