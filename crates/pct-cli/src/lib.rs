//! # pct-cli — Packaging Compliance Tool CLI
//!
//! Provides the `pct` command-line interface over the trigger dataset.
//!
//! ## Subcommands
//!
//! - `pct classify` — Deadline category of every trigger, with counts.
//! - `pct list` — Filtered trigger table (text or JSON).
//! - `pct export` — Filtered trigger table as CSV.
//! - `pct facets` — Company-type and department filter options.
//!
//! ```bash
//! pct --data data/final_table.xlsx classify
//! pct list --company-type Importer --packaging food --deadline "Due < 1 year"
//! pct --as-of 2025-01-01 export --keyword reuse --out reuse.csv
//! ```
//!
//! Every subcommand loads the dataset once and classifies it against a
//! single evaluation date (`--as-of`, or today) before doing anything else,
//! so the `Deadline Category` column is always present for filtering and
//! export.

pub mod classify;
pub mod config;
pub mod export;
pub mod facets;
pub mod filter_args;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pct_core::{Dataset, EvaluationDate};
use pct_deadline::CategorySummary;

pub use config::DashboardConfig;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// YAML configuration file.
    pub config: Option<PathBuf>,
    /// Dataset path overriding the configured one.
    pub data: Option<PathBuf>,
    /// Evaluation date overriding today.
    pub as_of: Option<EvaluationDate>,
}

/// Load the configuration named by `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(p) => DashboardConfig::load(p)
            .with_context(|| format!("failed to load configuration {}", p.display())),
        None => Ok(DashboardConfig::default()),
    }
}

/// A loaded and classified dataset, ready for a subcommand.
#[derive(Debug, Clone)]
pub struct Session {
    /// Effective configuration after CLI overrides.
    pub config: DashboardConfig,
    /// The trigger table, with `Deadline Category` filled in.
    pub dataset: Dataset,
    /// The date every record was judged against.
    pub evaluation_date: EvaluationDate,
    /// Record counts per category.
    pub summary: CategorySummary,
}

impl Session {
    /// Load configuration and dataset, then classify every record.
    pub fn open(options: &GlobalOptions) -> Result<Self> {
        let mut config = load_config(options.config.as_deref())?;
        if let Some(data) = &options.data {
            config.dataset = data.clone();
        }
        let evaluation_date = options.as_of.unwrap_or_else(EvaluationDate::today);
        Self::from_config(config, evaluation_date)
    }

    /// Load the dataset named by `config` and classify it.
    pub fn from_config(config: DashboardConfig, evaluation_date: EvaluationDate) -> Result<Self> {
        let dataset = pct_dataset::load_dataset(&config.dataset, config.sheet.as_deref())
            .with_context(|| format!("failed to load dataset {}", config.dataset.display()))?;
        Ok(Self::from_dataset(config, dataset, evaluation_date))
    }

    /// Classify an already-loaded dataset.
    pub fn from_dataset(
        config: DashboardConfig,
        mut dataset: Dataset,
        evaluation_date: EvaluationDate,
    ) -> Self {
        let summary = pct_deadline::annotate(&mut dataset, evaluation_date);
        Self {
            config,
            dataset,
            evaluation_date,
            summary,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pct_core::{columns, DeadlineCategory};

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn session_from_dataset_classifies_every_record() {
        let session = testing::session();
        assert!(session.dataset.has_column(columns::DEADLINE_CATEGORY));
        let labels: Vec<String> = session
            .dataset
            .records()
            .iter()
            .map(|r| r.text(columns::DEADLINE_CATEGORY))
            .collect();
        assert_eq!(
            labels,
            ["In force", "Due < 1 year", "Due > 1 year", "Due > 1 year", "Due > 1 year"]
        );
        assert_eq!(session.summary.count(DeadlineCategory::DueBeyondYear), 3);
    }

    #[test]
    fn open_applies_data_override_and_as_of() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("triggers.csv");
        std::fs::write(&data, "Trigger,Deadline\nReuse,2025-03-01\n").unwrap();
        let config = dir.path().join("pct.yaml");
        std::fs::write(&config, "dataset: does-not-exist.xlsx\n").unwrap();

        let options = GlobalOptions {
            config: Some(config),
            data: Some(data.clone()),
            as_of: Some(EvaluationDate::parse("2025-01-01").unwrap()),
        };
        let session = Session::open(&options).unwrap();
        assert_eq!(session.config.dataset, data);
        assert_eq!(session.evaluation_date.to_string(), "2025-01-01");
        assert_eq!(session.summary.count(DeadlineCategory::DueWithinYear), 1);
    }

    #[test]
    fn open_reports_missing_dataset() {
        let options = GlobalOptions {
            data: Some(PathBuf::from("/nonexistent/final_table.csv")),
            ..Default::default()
        };
        let err = Session::open(&options).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load dataset"));
    }
}
