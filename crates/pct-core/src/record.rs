//! # Trigger Records and Datasets
//!
//! A `Dataset` is the in-memory form of the source spreadsheet: an ordered
//! column list (header row) and one `TriggerRecord` per data row. Column
//! order is preserved so exports reproduce the source layout.

use std::collections::BTreeMap;

use crate::cell::CellValue;

/// Column names the tool reads or writes.
pub mod columns {
    /// Free-text deadline cell. Required.
    pub const DEADLINE: &str = "Deadline";
    /// Optional free-text status cell.
    pub const STATUS: &str = "Status";
    /// Derived column holding the stable category label.
    pub const DEADLINE_CATEGORY: &str = "Deadline Category";
    /// Semicolon-separated company types.
    pub const COMPANY_TYPE: &str = "Company type";
    /// Responsible department.
    pub const DEPARTMENT: &str = "Department";
    /// Product type, `Food` for food packaging.
    pub const PRODUCT_TYPE: &str = "Product Type";
    /// Short trigger name.
    pub const TRIGGER: &str = "Trigger";

    /// Columns shown in result tables, in order.
    pub const DISPLAY: &[&str] = &[
        "Trigger",
        "Description",
        "Regulation",
        "Reference",
        "Applicability",
        "Consequence",
        "Deadline",
        "Status",
        "Evidence to Collect",
        "Deadline Category",
    ];
}

static EMPTY: CellValue = CellValue::Empty;

/// One row of the compliance dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerRecord {
    values: BTreeMap<String, CellValue>,
}

impl TriggerRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The cell under `column`. Missing columns read as [`CellValue::Empty`].
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&EMPTY)
    }

    /// Display text of the cell under `column` (empty if missing).
    pub fn text(&self, column: &str) -> String {
        self.get(column).display_text()
    }

    /// Set the cell under `column`, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(column.into(), value.into());
    }

    /// Iterate over every populated cell.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The full trigger table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<TriggerRecord>,
}

impl Dataset {
    /// Create a dataset from a header row and its records.
    pub fn new(columns: Vec<String>, records: Vec<TriggerRecord>) -> Self {
        Self { columns, records }
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True if the header row contains `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append `column` to the header row unless it is already present.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// All records.
    pub fn records(&self) -> &[TriggerRecord] {
        &self.records
    }

    /// Mutable access to all records.
    pub fn records_mut(&mut self) -> &mut [TriggerRecord] {
        &mut self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
