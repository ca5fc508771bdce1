//! # Export Subcommand
//!
//! Writes the filtered trigger table to a CSV file, every column included.
//! The output file defaults to `export_file_name` from the configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::filter_args::FilterArgs;
use crate::Session;

/// Arguments for `pct export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output CSV file. Defaults to the configured export file name.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, session: &Session) -> Result<u8> {
    let out = output_path(args, session);
    let written = export_filtered(args, session, &out)?;
    println!("Wrote {written} records to {}", out.display());
    Ok(0)
}

/// The file `pct export` writes to.
pub fn output_path(args: &ExportArgs, session: &Session) -> PathBuf {
    args.out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&session.config.export_file_name))
}

/// Filter the session dataset and write it to `out`. Returns the row count.
pub fn export_filtered(args: &ExportArgs, session: &Session, out: &Path) -> Result<usize> {
    let selected = args.filters.to_filter().apply(&session.dataset);
    pct_dataset::export_csv_file(&session.dataset, &selected, out)
        .with_context(|| format!("failed to export to {}", out.display()))?;
    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use pct_core::DeadlineCategory;

    #[test]
    fn default_output_comes_from_config() {
        let session = testing::session();
        let path = output_path(&ExportArgs::default(), &session);
        assert_eq!(path, PathBuf::from("filtered_compliance_results.csv"));
    }

    #[test]
    fn writes_filtered_rows_with_category_column() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("food.csv");
        let args = ExportArgs {
            filters: FilterArgs {
                packaging: pct_dataset::PackagingType::Food,
                deadline_categories: vec![DeadlineCategory::InForce, DeadlineCategory::DueBeyondYear],
                ..Default::default()
            },
            out: Some(out.clone()),
        };
        let session = testing::session();
        assert_eq!(export_filtered(&args, &session, &out).unwrap(), 3);

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(",Deadline Category"));
        assert!(lines[1].starts_with("EPR registration,"));
        assert!(lines[1].ends_with(",In force"));
        assert!(lines[2].starts_with("Reuse targets,"));
        assert!(lines[3].starts_with("Deposit return,"));
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let session = testing::session();
        let out = PathBuf::from("/nonexistent/dir/out.csv");
        let err = export_filtered(&ExportArgs::default(), &session, &out).unwrap_err();
        assert!(format!("{err:#}").contains("failed to export"));
    }
}
