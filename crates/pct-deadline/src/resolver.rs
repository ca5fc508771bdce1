//! # Deadline Date Resolution
//!
//! Turns one raw `Deadline` cell into a calendar date, or `Unresolved`.
//!
//! Native dates and date-times short-circuit to their date part. Text (and
//! numbers, via their canonical text) runs through an ordered chain of pure
//! attempts; the first attempt that yields a date wins:
//!
//! | # | Rule | Example | Result |
//! |---|------|---------|--------|
//! | 1 | Quarter | `Estimated Q2 2026` | 2026-06-30 |
//! | 2 | Bare year | `2027` | 2027-12-31 |
//! | 3 | Embedded fragment | `Estimated 2026-01-01` | 2026-01-01 |
//! | 4 | Spreadsheet serial | `45000` | 2023-03-15 |
//! | 5 | Free-text date | `1 March 2026` | 2026-03-01 |
//!
//! Order matters: text holding both a quarter token and an ISO date resolves
//! through the quarter rule.
//!
//! No attempt can fail the caller. An attempt that cannot produce a date
//! returns `None` and the chain moves on.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use pct_core::{spreadsheet_serial_to_date, CellValue};

/// Numeric values at or below this are never read as spreadsheet serials.
pub const SERIAL_THRESHOLD: f64 = 20_000.0;

/// Outcome of resolving one deadline cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedDate {
    /// A concrete calendar date.
    Known(NaiveDate),
    /// No date could be derived.
    Unresolved,
}

impl ResolvedDate {
    /// The date, if known.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Known(d) => Some(*d),
            Self::Unresolved => None,
        }
    }

    /// True if no date was derived.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

impl From<Option<NaiveDate>> for ResolvedDate {
    fn from(d: Option<NaiveDate>) -> Self {
        d.map(Self::Known).unwrap_or(Self::Unresolved)
    }
}

/// Which rule produced a resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    /// The cell already held a native date or date-time.
    Native,
    /// `Q<1-4> <year>` → last day of the quarter.
    Quarter,
    /// Exactly four digits → December 31 of that year.
    BareYear,
    /// A date fragment embedded anywhere in the text.
    Fragment(FragmentFormat),
    /// Days since 1899-12-30.
    SpreadsheetSerial,
    /// Last-resort free-text date parser.
    FreeText,
}

/// Embedded date fragment layouts, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentFormat {
    /// `YYYY-MM-DD`
    IsoDash,
    /// `DD-MM-YYYY`
    DayFirstDash,
    /// `DD/MM/YYYY`
    DayFirstSlash,
    /// `YYYY/MM/DD`
    YearFirstSlash,
}

impl FragmentFormat {
    /// All fragment layouts, ISO first.
    pub const ALL: [FragmentFormat; 4] = [
        Self::IsoDash,
        Self::DayFirstDash,
        Self::DayFirstSlash,
        Self::YearFirstSlash,
    ];

    fn pattern(self) -> &'static str {
        match self {
            Self::IsoDash => r"([0-9]{4})-([0-9]{2})-([0-9]{2})",
            Self::DayFirstDash => r"([0-9]{2})-([0-9]{2})-([0-9]{4})",
            Self::DayFirstSlash => r"([0-9]{2})/([0-9]{2})/([0-9]{4})",
            Self::YearFirstSlash => r"([0-9]{4})/([0-9]{2})/([0-9]{2})",
        }
    }

    fn year_first(self) -> bool {
        matches!(self, Self::IsoDash | Self::YearFirstSlash)
    }

    fn regex(self) -> Option<&'static Regex> {
        static CELLS: [OnceLock<Option<Regex>>; 4] =
            [OnceLock::new(), OnceLock::new(), OnceLock::new(), OnceLock::new()];
        let idx = self as usize;
        CELLS[idx]
            .get_or_init(|| Regex::new(self.pattern()).ok())
            .as_ref()
    }

    /// Find the first occurrence of this layout in `text` that is a real
    /// calendar date and is not glued to further digits on either side.
    fn find(self, text: &str) -> Option<NaiveDate> {
        self.regex()?
            .captures_iter(text)
            .filter(|caps| caps.get(0).is_some_and(|m| stands_alone(text, m.start(), m.end())))
            .find_map(|caps| self.date_from(&caps))
    }

    fn date_from(self, caps: &regex::Captures<'_>) -> Option<NaiveDate> {
        let a: u32 = caps.get(1)?.as_str().parse().ok()?;
        let b: u32 = caps.get(2)?.as_str().parse().ok()?;
        let c: u32 = caps.get(3)?.as_str().parse().ok()?;
        let (y, m, d) = if self.year_first() { (a, b, c) } else { (c, b, a) };
        NaiveDate::from_ymd_opt(i32::try_from(y).ok()?, m, d)
    }
}

fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before = start.checked_sub(1).and_then(|i| bytes.get(i));
    let after = bytes.get(end);
    !before.is_some_and(u8::is_ascii_digit) && !after.is_some_and(u8::is_ascii_digit)
}

/// A resolved date together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The calendar date.
    pub date: NaiveDate,
    /// The rule that matched.
    pub rule: ResolutionRule,
}

type Attempt = fn(&str) -> Option<Resolution>;

/// Ordered text attempts. The first `Some` wins.
const TEXT_ATTEMPTS: &[(&str, Attempt)] = &[
    ("quarter", attempt_quarter),
    ("bare_year", attempt_bare_year),
    ("fragment", attempt_fragment),
    ("spreadsheet_serial", attempt_serial),
    ("free_text", attempt_free_text),
];

/// Resolve a raw deadline cell to a date or `Unresolved`.
pub fn resolve(raw: &CellValue) -> ResolvedDate {
    resolve_with_rule(raw).map(|r| r.date).into()
}

/// Resolve a raw deadline cell, reporting which rule matched.
pub fn resolve_with_rule(raw: &CellValue) -> Option<Resolution> {
    match raw {
        CellValue::Date(d) => Some(Resolution {
            date: *d,
            rule: ResolutionRule::Native,
        }),
        CellValue::DateTime(dt) => Some(Resolution {
            date: dt.date_naive(),
            rule: ResolutionRule::Native,
        }),
        CellValue::Text(s) => resolve_text(s),
        CellValue::Integer(i) => resolve_text(&i.to_string()),
        CellValue::Number(n) if n.is_finite() => resolve_text(&raw.display_text()),
        CellValue::Number(_)
        | CellValue::Empty
        | CellValue::Bool(_)
        | CellValue::Unsupported(_) => None,
    }
}

/// Resolve free text through the ordered attempt chain.
pub fn resolve_text(text: &str) -> Option<Resolution> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let found = TEXT_ATTEMPTS
        .iter()
        .find_map(|(name, attempt)| attempt(trimmed).map(|r| (*name, r)));
    match found {
        Some((name, resolution)) => {
            tracing::trace!(input = trimmed, rule = name, date = %resolution.date, "deadline resolved");
            Some(resolution)
        }
        None => {
            tracing::trace!(input = trimmed, "deadline unresolved");
            None
        }
    }
}

fn quarter_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bQ([1-4])\s+([0-9]{4})\b").ok())
        .as_ref()
}

fn attempt_quarter(text: &str) -> Option<Resolution> {
    let caps = quarter_regex()?.captures(text)?;
    let quarter: u32 = caps.get(1)?.as_str().parse().ok()?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    Some(Resolution {
        date: quarter_end(year, quarter)?,
        rule: ResolutionRule::Quarter,
    })
}

fn attempt_bare_year(text: &str) -> Option<Resolution> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = text.parse().ok()?;
    Some(Resolution {
        date: NaiveDate::from_ymd_opt(year, 12, 31)?,
        rule: ResolutionRule::BareYear,
    })
}

fn attempt_fragment(text: &str) -> Option<Resolution> {
    FragmentFormat::ALL.iter().find_map(|fmt| {
        fmt.find(text).map(|date| Resolution {
            date,
            rule: ResolutionRule::Fragment(*fmt),
        })
    })
}

fn attempt_serial(text: &str) -> Option<Resolution> {
    let value: f64 = text.parse().ok()?;
    if value.is_nan() || value <= SERIAL_THRESHOLD {
        return None;
    }
    Some(Resolution {
        date: spreadsheet_serial_to_date(value)?,
        rule: ResolutionRule::SpreadsheetSerial,
    })
}

fn attempt_free_text(text: &str) -> Option<Resolution> {
    let date = parse_free_text(text).or_else(|| parse_free_text(strip_qualifier(text)?))?;
    Some(Resolution {
        date,
        rule: ResolutionRule::FreeText,
    })
}

/// Leading words that qualify a date without changing it.
const QUALIFIERS: &[&str] = &[
    "estimated",
    "expected",
    "approx.",
    "approximately",
    "by",
    "from",
    "before",
    "until",
];

fn strip_qualifier(text: &str) -> Option<&str> {
    let (first, rest) = text.split_once(char::is_whitespace)?;
    let first = first.trim_end_matches(':');
    QUALIFIERS
        .iter()
        .any(|q| q.eq_ignore_ascii_case(first))
        .then(|| rest.trim())
}

/// Full-date layouts tried by the free-text parser, after normalising
/// commas and repeated whitespace.
const FREE_TEXT_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
];

fn parse_free_text(text: &str) -> Option<NaiveDate> {
    let normalised = text
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let date = parse_month_year(&normalised)
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            FREE_TEXT_LAYOUTS.iter().find_map(|layout| {
                chrono::NaiveDateTime::parse_from_str(&normalised, layout)
                    .map(|dt| dt.date())
                    .or_else(|_| NaiveDate::parse_from_str(&normalised, layout))
                    .ok()
            })
        })?;
    // chrono's %Y also takes short years, so "12 Aug 26" would land in year 26.
    (date.year() >= MIN_FREE_TEXT_YEAR).then_some(date)
}

/// Free-text dates before this year are truncated years, not deadlines.
const MIN_FREE_TEXT_YEAR: i32 = 1000;

/// `June 2026` / `Jun 2026` → last day of that month. The year must be
/// four digits.
fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let (month, year) = text.split_once(' ')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ["%d %B %Y", "%d %b %Y"].iter().find_map(|layout| {
        let first = NaiveDate::parse_from_str(&format!("1 {month} {year}"), layout).ok()?;
        month_end(first.year(), first.month())
    })
}

/// Last calendar day of `month` in `year`.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Last calendar day of `quarter` (1-4) in `year`.
pub fn quarter_end(year: i32, quarter: u32) -> Option<NaiveDate> {
    match quarter {
        1..=4 => month_end(year, quarter * 3),
        _ => None,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
