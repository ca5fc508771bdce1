//! # Dashboard Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, so an
//! empty file (or no file) reproduces the stock dashboard:
//!
//! ```yaml
//! dataset: data/final_table.xlsx
//! sheet: Obligations          # first sheet when omitted
//! display_columns: [Trigger, Description, Deadline, Status, Deadline Category]
//! export_file_name: filtered_compliance_results.csv
//! ```
//!
//! A relative `dataset` path is resolved against the directory holding the
//! config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pct_core::{columns, PctError};
use pct_dataset::DEFAULT_EXPORT_FILE_NAME;

/// Dataset path used when neither the config nor `--data` names one.
pub const DEFAULT_DATASET_PATH: &str = "data/final_table.xlsx";

/// Dashboard settings loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Source workbook or CSV file.
    pub dataset: PathBuf,
    /// Workbook sheet name; first sheet when `None`.
    pub sheet: Option<String>,
    /// Columns shown by `pct list`, in order.
    pub display_columns: Vec<String>,
    /// Default output file for `pct export`.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            sheet: None,
            display_columns: columns::DISPLAY.iter().map(|c| c.to_string()).collect(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration from YAML text. An empty document yields the
    /// defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PctError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| PctError::Config(format!("invalid configuration: {e}")))
    }

    /// Read a configuration file and resolve its relative dataset path
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, PctError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            PctError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_yaml_str(&yaml)?;
        if let Some(dir) = path.parent() {
            config.dataset = resolve_path(&config.dataset, dir);
        }
        tracing::debug!(
            config = %path.display(),
            dataset = %config.dataset.display(),
            "loaded dashboard configuration"
        );
        Ok(config)
    }
}

/// Resolve a path that may be relative to `base`.
///
/// Absolute paths are returned as-is; relative paths are joined onto `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
