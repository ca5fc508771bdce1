//! # Dataset Loading
//!
//! Reads the trigger table from a spreadsheet workbook (`.xlsx`, `.xlsm`,
//! `.xls`, `.ods`) or a `.csv` file into a [`Dataset`].
//!
//! The first row is the header row; header names are trimmed, because the
//! source workbooks are hand-edited and routinely carry trailing spaces.
//! The `Deadline` column is required.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, Trim};

use pct_core::{columns, spreadsheet_serial_to_date, CellValue, Dataset, PctError, TriggerRecord};

/// Source format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Spreadsheet workbook.
    Workbook,
    /// Comma-separated values.
    Csv,
}

impl SourceFormat {
    /// Detect the format of `path` from its extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PctError::UnsupportedFormat`] for any other extension.
    pub fn detect(path: &Path) -> Result<Self, PctError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(PctError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Load a dataset from `path`.
///
/// `sheet` selects a workbook sheet by name; `None` reads the first sheet.
/// It is ignored for CSV input.
pub fn load_dataset(path: &Path, sheet: Option<&str>) -> Result<Dataset, PctError> {
    let dataset = match SourceFormat::detect(path)? {
        SourceFormat::Workbook => load_workbook(path, sheet)?,
        SourceFormat::Csv => load_csv(path)?,
    };
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "loaded trigger dataset"
    );
    Ok(dataset)
}

/// Load the first (or named) sheet of a workbook.
pub fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<Dataset, PctError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PctError::Workbook(format!("failed to open {}: {e}", path.display())))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| PctError::Workbook(format!("failed to read sheet {name:?}: {e}")))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PctError::Workbook(format!("no worksheet found in {}", path.display())))?
            .map_err(|e| PctError::Workbook(format!("failed to read first sheet: {e}")))?,
    };

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|c| header_name(&cell_from_workbook(c))).collect())
        .unwrap_or_default();
    let body = rows.map(|cells| cells.iter().map(cell_from_workbook).collect());
    build_dataset(header, body)
}

/// Load a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Dataset, PctError> {
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content)
}

/// Parse CSV content with a header row.
pub fn parse_csv(content: &str) -> Result<Dataset, PctError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| PctError::Csv(format!("failed to read CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut body = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| PctError::Csv(format!("failed to parse CSV row {}: {e}", index + 1)))?;
        body.push(record.iter().map(CellValue::from_text).collect::<Vec<_>>());
    }
    build_dataset(header, body)
}

/// Zip a header row with body rows into a dataset.
///
/// Short rows read as empty cells; cells past the header width are dropped.
/// Columns with a blank header are skipped. A repeated header gets a
/// `.1`, `.2`, ... suffix so both columns survive.
pub fn build_dataset<I>(header: Vec<String>, body: I) -> Result<Dataset, PctError>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let header = unique_headers(header);
    if !header.iter().any(|h| h == columns::DEADLINE) {
        return Err(PctError::MissingColumn(columns::DEADLINE.to_string()));
    }
    for optional in [columns::STATUS, columns::COMPANY_TYPE, columns::DEPARTMENT] {
        if !header.iter().any(|h| h == optional) {
            tracing::warn!(column = optional, "optional column missing; treating as empty");
        }
    }

    let records: Vec<TriggerRecord> = body
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_blank()))
        .map(|row| {
            let mut record = TriggerRecord::new();
            let mut cells = row.into_iter();
            for name in &header {
                let cell = cells.next().unwrap_or(CellValue::Empty);
                if !name.is_empty() {
                    record.insert(name.clone(), cell);
                }
            }
            record
        })
        .collect();

    let columns = header.into_iter().filter(|h| !h.is_empty()).collect();
    Ok(Dataset::new(columns, records))
}

/// Days between the 1904 and 1900 workbook date systems.
const DATE_1904_OFFSET_DAYS: f64 = 1462.0;

/// Map one workbook cell to a raw cell value.
///
/// Date cells become calendar dates in either workbook date system.
pub fn cell_from_workbook(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let serial = if dt.is_1904() {
                dt.as_f64() + DATE_1904_OFFSET_DAYS
            } else {
                dt.as_f64()
            };
            spreadsheet_serial_to_date(serial)
                .map(CellValue::Date)
                .unwrap_or_else(|| CellValue::Unsupported(cell.to_string()))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Error(e) => CellValue::Unsupported(format!("{e:?}")),
    }
}

fn unique_headers(header: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut names = Vec::with_capacity(header.len());
    for name in header {
        if name.is_empty() || seen.insert(name.clone()) {
            names.push(name);
            continue;
        }
        let renamed = (1..)
            .map(|n| format!("{name}.{n}"))
            .find(|candidate| !seen.contains(candidate))
            .unwrap_or_default();
        tracing::warn!(column = %name, renamed = %renamed, "duplicate column header renamed");
        seen.insert(renamed.clone());
        names.push(renamed);
    }
    names
}

fn header_name(cell: &CellValue) -> String {
    cell.display_text().trim().to_string()
}
