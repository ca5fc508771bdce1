//! # CSV Export
//!
//! Writes a filtered view of the dataset as UTF-8 CSV: a header row with
//! every dataset column, then one row per selected record. No index column.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use pct_core::{Dataset, PctError};

/// File name offered for downloads of the filtered table.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "filtered_compliance_results.csv";

/// Write the records at `indices` to `writer` as CSV.
pub fn write_csv<W: Write>(dataset: &Dataset, indices: &[usize], writer: W) -> Result<(), PctError> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(dataset.columns())
        .map_err(|e| PctError::Csv(format!("failed to write CSV header: {e}")))?;

    for &index in indices {
        let Some(record) = dataset.records().get(index) else {
            return Err(PctError::InvalidValue(format!(
                "record index {index} out of range ({} records)",
                dataset.len()
            )));
        };
        let row = dataset.columns().iter().map(|c| record.text(c));
        csv.write_record(row)
            .map_err(|e| PctError::Csv(format!("failed to write CSV row {index}: {e}")))?;
    }

    csv.flush()?;
    Ok(())
}

/// Render the records at `indices` as CSV bytes.
pub fn export_csv(dataset: &Dataset, indices: &[usize]) -> Result<Vec<u8>, PctError> {
    let mut buf = Vec::new();
    write_csv(dataset, indices, &mut buf)?;
    Ok(buf)
}

/// Write the records at `indices` to a CSV file at `path`.
pub fn export_csv_file(dataset: &Dataset, indices: &[usize], path: &Path) -> Result<(), PctError> {
    let file = std::fs::File::create(path)?;
    write_csv(dataset, indices, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), rows = indices.len(), "exported filtered triggers");
    Ok(())
}
