//! # CSV Pipeline Tests
//!
//! Load a CSV file from disk, filter it, and export the result, the way the
//! CLI drives the dataset crate.

use std::io::Write;

use pct_core::{columns, DeadlineCategory, PctError, TriggerRecord};
use pct_dataset::{
    company_type_options, department_options, export_csv, export_csv_file, load_dataset,
    PackagingType, TriggerFilter,
};

const SOURCE: &str = "\
Trigger ,Description,Company type,Department,Product Type,Deadline,Status,Deadline Category
EPR registration,Register with the producer organisation,Producer; Importer,Legal,Food,In force,In force,In force
Label recyclability,Print sorting labels,Distributor,Operations,Non-food,Estimated 2025-06-01,,Due < 1 year
Reuse targets,PPWR reuse quota,Importer,Legal,Food,Q4 2027,,Due > 1 year
";

fn write_source(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("final_table.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SOURCE.as_bytes()).unwrap();
    path
}

#[test]
fn load_filter_export_round() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_dataset(&write_source(&dir), None).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.columns()[0], "Trigger");

    let filter = TriggerFilter {
        company_types: vec!["Importer".into()],
        packaging: PackagingType::Food,
        deadline_categories: vec![DeadlineCategory::DueBeyondYear],
        ..Default::default()
    };
    let selected = filter.apply(&ds);
    assert_eq!(selected, vec![2]);

    let out = dir.path().join("filtered.csv");
    export_csv_file(&ds, &selected, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("Trigger,Description,Company type,Department,Product Type,Deadline,Status,Deadline Category")
    );
    assert_eq!(
        lines.next(),
        Some("Reuse targets,PPWR reuse quota,Importer,Legal,Food,Q4 2027,,Due > 1 year")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn facets_from_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_dataset(&write_source(&dir), None).unwrap();
    assert_eq!(
        company_type_options(&ds),
        vec!["Distributor", "Importer", "Producer"]
    );
    assert_eq!(department_options(&ds), vec!["Legal", "Operations"]);
}

#[test]
fn exported_csv_loads_back_with_same_cells() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_dataset(&write_source(&dir), None).unwrap();
    let all: Vec<usize> = (0..ds.len()).collect();
    let bytes = export_csv(&ds, &all).unwrap();

    let again = pct_dataset::loader::parse_csv(std::str::from_utf8(&bytes).unwrap()).unwrap();
    assert_eq!(again.columns(), ds.columns());
    let texts = |r: &TriggerRecord| r.text(columns::DEADLINE);
    assert_eq!(
        again.records().iter().map(texts).collect::<Vec<_>>(),
        ds.records().iter().map(texts).collect::<Vec<_>>()
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(&dir.path().join("absent.csv"), None).unwrap_err();
    assert!(matches!(err, PctError::Io(_)));
}

#[test]
fn corrupt_workbook_is_workbook_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();
    let err = load_dataset(&path, None).unwrap_err();
    assert!(matches!(err, PctError::Workbook(_)));
}
