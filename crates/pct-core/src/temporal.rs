//! # Temporal Types — Evaluation Dates and Spreadsheet Serials
//!
//! Defines `EvaluationDate`, the single calendar date every record in a
//! classification pass is judged against, and the conversion from legacy
//! spreadsheet date serials to calendar dates.
//!
//! ## Invariant
//!
//! An evaluation date is captured once per pass. Nothing in the stack
//! samples "now" per record; a pass that crosses midnight still judges every
//! record against the same day.
//!
//! ## Spreadsheet Epoch
//!
//! Serials count days from 1899-12-30. Spreadsheet software treats 1900 as
//! a leap year, so serial 60 is the nonexistent 1900-02-29; anchoring the
//! epoch one day early makes every serial from 61 onward land on the date
//! the spreadsheet displays. Serials are read with that epoch as-is.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PctError;

/// Days-since epoch used by spreadsheet date serials.
pub const SPREADSHEET_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// The date a classification pass is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationDate(NaiveDate);

impl EvaluationDate {
    /// Capture today's local calendar date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Use an explicit calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse an evaluation date from `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`PctError::InvalidValue`] if the string is not a valid
    /// calendar date in that format.
    pub fn parse(s: &str) -> Result<Self, PctError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| {
                PctError::InvalidValue(format!("invalid evaluation date {s:?} (expected YYYY-MM-DD): {e}"))
            })
    }

    /// Access the inner calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::str::FromStr for EvaluationDate {
    type Err = PctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for EvaluationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Convert a spreadsheet date serial to a calendar date.
///
/// Fractional days (time of day) are dropped toward the earlier date.
/// Returns `None` for non-finite values and for serials outside the
/// representable date range.
pub fn spreadsheet_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor();
    if days.abs() > i32::MAX as f64 {
        return None;
    }
    let (y, m, d) = SPREADSHEET_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::try_days(days as i64)?)
}
