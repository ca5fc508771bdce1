//! # Session Pipeline Tests
//!
//! Drive the CLI library the way `pct` does: a config file next to a CSV
//! dataset, one classification pass, then list and export.

use std::path::Path;

use pct_cli::export::{export_filtered, ExportArgs};
use pct_cli::filter_args::FilterArgs;
use pct_cli::list::{render_text, visible_columns};
use pct_cli::{GlobalOptions, Session};
use pct_core::{columns, DeadlineCategory, EvaluationDate};

const TRIGGERS: &str = "\
Trigger,Description,Company type,Department,Product Type,Deadline,Status
EPR registration,Register with the PRO,Producer; Importer,Legal,Food,In Force,
Label recyclability,Print sorting labels,Distributor,Operations,Non-food,Estimated 2025-06-01,
Reuse targets,PPWR reuse quota,Importer,Legal,Food,Q4 2027,
Recycled content,Minimum PCR share,Producer,R&D,Non-food,2030,
Deposit return,Join DRS,Producer,Sales,Food,,
Plastic tax,Report plastic tax,Importer,Finance,Non-food,2026-01-01,Rule is IN FORCE since 2020
";

fn workspace(dir: &Path) -> GlobalOptions {
    std::fs::write(dir.join("final_table.csv"), TRIGGERS).unwrap();
    std::fs::write(
        dir.join("pct.yaml"),
        "dataset: final_table.csv\n\
         display_columns: [Trigger, Deadline, Deadline Category]\n\
         export_file_name: results.csv\n",
    )
    .unwrap();
    GlobalOptions {
        config: Some(dir.join("pct.yaml")),
        data: None,
        as_of: Some(EvaluationDate::parse("2025-01-01").unwrap()),
    }
}

#[test]
fn classification_matches_dashboard_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(&workspace(dir.path())).unwrap();

    let labels: Vec<String> = session
        .dataset
        .records()
        .iter()
        .map(|r| r.text(columns::DEADLINE_CATEGORY))
        .collect();
    assert_eq!(
        labels,
        [
            "In force",
            "Due < 1 year",
            "Due > 1 year",
            "Due > 1 year",
            "Due > 1 year",
            "In force",
        ]
    );
    assert_eq!(session.summary.count(DeadlineCategory::InForce), 2);
    assert_eq!(session.summary.total(), 6);
}

#[test]
fn list_uses_configured_display_columns() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(&workspace(dir.path())).unwrap();

    let filters = FilterArgs {
        company_types: vec!["Importer".into()],
        ..Default::default()
    };
    let selected = filters.to_filter().apply(&session.dataset);
    let cols = visible_columns(&session.dataset, &session.config.display_columns);
    assert_eq!(
        render_text(&session.dataset, &selected, &cols),
        "Filtered Results — 3 records shown\n\n\
         Trigger | Deadline | Deadline Category\n\
         EPR registration | In Force | In force\n\
         Reuse targets | Q4 2027 | Due > 1 year\n\
         Plastic tax | 2026-01-01 | In force\n"
    );
}

#[test]
fn export_writes_every_column_of_filtered_rows() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(&workspace(dir.path())).unwrap();
    assert_eq!(session.config.export_file_name, "results.csv");

    let out = dir.path().join(&session.config.export_file_name);
    let args = ExportArgs {
        filters: FilterArgs {
            keyword: Some("pcr".into()),
            ..Default::default()
        },
        out: None,
    };
    assert_eq!(export_filtered(&args, &session, &out).unwrap(), 1);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "Trigger,Description,Company type,Department,Product Type,Deadline,Status,Deadline Category\n\
         Recycled content,Minimum PCR share,Producer,R&D,Non-food,2030,,Due > 1 year\n"
    );
}

#[test]
fn csv_without_deadline_column_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("bad.csv");
    std::fs::write(&data, "Trigger,Status\nEPR,In force\n").unwrap();
    let options = GlobalOptions {
        data: Some(data),
        ..Default::default()
    };
    let err = Session::open(&options).unwrap_err();
    assert!(format!("{err:#}").contains("Deadline"));
}
