//! # Raw Cell Values
//!
//! `CellValue` is the raw content of one spreadsheet cell, before any
//! interpretation. Source spreadsheets are hand-edited, so a `Deadline`
//! column routinely mixes native dates, free text, bare numbers and error
//! cells; the type keeps that heterogeneity visible instead of flattening
//! everything to strings at load time.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// One raw cell of the trigger dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or blank cell.
    Empty,
    /// Free text.
    Text(String),
    /// Integer number.
    Integer(i64),
    /// Floating-point number.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// Native calendar date.
    Date(NaiveDate),
    /// Native date-time carrying its UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Anything else: spreadsheet error cells, nested JSON, and the like.
    /// The payload is a human-readable rendering.
    Unsupported(String),
}

impl CellValue {
    /// Build a text cell, mapping blank strings to [`CellValue::Empty`].
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }

    /// True for `Empty` and for whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The text payload, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell the way it is shown in tables, searched by keyword,
    /// and written to CSV exports.
    ///
    /// Integral floats render without a fractional part, so a serial read as
    /// `45000.0` displays as `45000`.
    pub fn display_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Number(n) => render_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Unsupported(s) => s.clone(),
        }
    }
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::from_text(&s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for CellValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Empty)
    }
}

impl From<serde_json::Value> for CellValue {
    /// JSON strings become text, numbers stay numeric, `null` is empty.
    /// Arrays and objects are kept as `Unsupported` so they can never be
    /// mistaken for a date.
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n
                    .as_f64()
                    .map(Self::Number)
                    .unwrap_or_else(|| Self::Unsupported(n.to_string())),
            },
            Value::String(s) => Self::from_text(&s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Unsupported(other.to_string()),
        }
    }
}
