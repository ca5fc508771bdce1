//! # List Subcommand
//!
//! Prints the filtered trigger table, restricted to the configured display
//! columns, headed by the record count:
//!
//! ```text
//! Filtered Results — 2 records shown
//!
//! Trigger | Description | ... | Deadline Category
//! Reuse targets | PPWR reuse quota | ... | Due > 1 year
//! ```
//!
//! With `--format json` the rows are printed as a JSON array of objects
//! keyed by column name instead.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::{Map, Value};

use pct_core::Dataset;

use crate::filter_args::FilterArgs;
use crate::Session;

/// Output format for `pct list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pipe-separated table.
    #[default]
    Text,
    /// JSON array of row objects.
    Json,
}

/// Arguments for `pct list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, session: &Session) -> Result<u8> {
    let selected = args.filters.to_filter().apply(&session.dataset);
    let columns = visible_columns(&session.dataset, &session.config.display_columns);
    let rendered = match args.format {
        OutputFormat::Text => render_text(&session.dataset, &selected, &columns),
        OutputFormat::Json => render_json(&session.dataset, &selected, &columns)?,
    };
    print!("{rendered}");
    Ok(0)
}

/// Heading line above the filtered table.
pub fn count_line(shown: usize) -> String {
    format!("Filtered Results — {shown} records shown")
}

/// The configured display columns that the dataset actually has, in
/// configured order.
pub fn visible_columns(dataset: &Dataset, display: &[String]) -> Vec<String> {
    let missing: Vec<&str> = display
        .iter()
        .filter(|c| !dataset.has_column(c))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        tracing::debug!(?missing, "display columns absent from dataset");
    }
    display
        .iter()
        .filter(|c| dataset.has_column(c))
        .cloned()
        .collect()
}

/// Render the count line and a pipe-separated table.
pub fn render_text(dataset: &Dataset, indices: &[usize], columns: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", count_line(indices.len()));
    out.push('\n');
    let _ = writeln!(out, "{}", columns.join(" | "));
    for record in indices.iter().filter_map(|&i| dataset.records().get(i)) {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| single_line(&record.text(c)))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | "));
    }
    out
}

/// Render the selected rows as a pretty-printed JSON array.
pub fn render_json(dataset: &Dataset, indices: &[usize], columns: &[String]) -> Result<String> {
    let rows: Vec<Value> = indices
        .iter()
        .filter_map(|&i| dataset.records().get(i))
        .map(|record| {
            let object: Map<String, Value> = columns
                .iter()
                .map(|c| (c.clone(), Value::String(record.text(c))))
                .collect();
            Value::Object(object)
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&rows).context("failed to serialize rows")?;
    json.push('\n');
    Ok(json)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use pct_core::{DeadlineCategory, TriggerRecord};

    fn columns() -> Vec<String> {
        vec!["Trigger".into(), "Deadline".into(), "Deadline Category".into()]
    }

    #[test]
    fn count_line_text() {
        assert_eq!(count_line(3), "Filtered Results — 3 records shown");
    }

    #[test]
    fn visible_columns_keeps_configured_order_and_drops_missing() {
        let session = testing::session();
        let cols = visible_columns(&session.dataset, &session.config.display_columns);
        assert_eq!(
            cols,
            vec!["Trigger", "Description", "Deadline", "Status", "Evidence to Collect", "Deadline Category"]
        );
    }

    #[test]
    fn text_table_for_filtered_rows() {
        let session = testing::session();
        let filter = pct_dataset::TriggerFilter {
            deadline_categories: vec![DeadlineCategory::DueBeyondYear],
            departments: vec!["Legal".into()],
            ..Default::default()
        };
        let selected = filter.apply(&session.dataset);
        let text = render_text(&session.dataset, &selected, &columns());
        assert_eq!(
            text,
            "Filtered Results — 1 records shown\n\n\
             Trigger | Deadline | Deadline Category\n\
             Reuse targets | Q4 2027 | Due > 1 year\n"
        );
    }

    #[test]
    fn text_cells_are_flattened_to_one_line() {
        let ds = Dataset::new(
            vec!["Trigger".into()],
            vec![TriggerRecord::from_pairs([("Trigger", "line one\nline  two")])],
        );
        let text = render_text(&ds, &[0], &["Trigger".to_string()]);
        assert!(text.ends_with("Trigger\nline one line two\n"));
    }

    #[test]
    fn json_rows_are_keyed_by_column() {
        let session = testing::session();
        let json = render_json(&session.dataset, &[0, 1], &columns()).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Trigger"], "EPR registration");
        assert_eq!(rows[0]["Deadline Category"], "In force");
        assert_eq!(rows[1]["Deadline Category"], "Due < 1 year");
    }

    #[test]
    fn empty_selection_still_prints_header() {
        let session = testing::session();
        let text = render_text(&session.dataset, &[], &columns());
        assert!(text.starts_with("Filtered Results — 0 records shown\n"));
        assert!(text.ends_with("Trigger | Deadline | Deadline Category\n"));
    }
}
