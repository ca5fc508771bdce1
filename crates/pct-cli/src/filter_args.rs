//! # Filter Flags
//!
//! Flags shared by `pct list` and `pct export`. Each maps onto one
//! [`TriggerFilter`] criterion; repeated flags select several values.

use clap::Args;

use pct_core::DeadlineCategory;
use pct_dataset::{PackagingType, TriggerFilter};

/// Dashboard filter criteria as command-line flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep triggers whose company type contains this value (repeatable).
    #[arg(long = "company-type", value_name = "TYPE")]
    pub company_types: Vec<String>,

    /// Keep triggers for this department (repeatable).
    #[arg(long = "department", value_name = "DEPARTMENT")]
    pub departments: Vec<String>,

    /// Packaging type: `all` or `food`.
    #[arg(long, value_name = "TYPE", default_value = "all")]
    pub packaging: PackagingType,

    /// Keep triggers with any cell containing this text (case-insensitive).
    #[arg(long, value_name = "TEXT")]
    pub keyword: Option<String>,

    /// Keep triggers in this deadline category, by label or id (repeatable).
    #[arg(long = "deadline", value_name = "CATEGORY")]
    pub deadline_categories: Vec<DeadlineCategory>,
}

impl FilterArgs {
    /// Build the filter these flags describe.
    pub fn to_filter(&self) -> TriggerFilter {
        TriggerFilter {
            company_types: self.company_types.clone(),
            departments: self.departments.clone(),
            packaging: self.packaging,
            keyword: self.keyword.clone().filter(|k| !k.trim().is_empty()),
            deadline_categories: self.deadline_categories.clone(),
        }
    }
}
