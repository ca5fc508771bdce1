//! # Trigger Filters and Facets
//!
//! The dashboard narrows the trigger table with five independent criteria,
//! combined with AND. An empty criterion keeps every record.
//!
//! | Criterion | Column | Match |
//! |-----------|--------|-------|
//! | Company types | `Company type` | cell contains any selected type |
//! | Departments | `Department` | cell equals a selected department |
//! | Packaging | `Product Type` | `Food` only, when food packaging is selected |
//! | Keyword | every column | any cell contains the keyword, ignoring case |
//! | Deadline categories | `Deadline Category` | cell equals a selected label |

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pct_core::{columns, Dataset, DeadlineCategory, PctError, TriggerRecord};

/// Packaging-type selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackagingType {
    /// Every record.
    #[default]
    All,
    /// Only records whose `Product Type` is `Food`.
    Food,
}

/// `Product Type` value selected by [`PackagingType::Food`].
pub const FOOD_PRODUCT_TYPE: &str = "Food";

impl PackagingType {
    /// Label offered in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Food => "Food Packaging",
        }
    }
}

impl FromStr for PackagingType {
    type Err = PctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "food" | "food packaging" => Ok(Self::Food),
            other => Err(PctError::InvalidValue(format!(
                "unknown packaging type: {other:?} (expected \"all\" or \"food\")"
            ))),
        }
    }
}

/// The full set of filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Selected company types.
    pub company_types: Vec<String>,
    /// Selected departments.
    pub departments: Vec<String>,
    /// Packaging selector.
    pub packaging: PackagingType,
    /// Keyword searched across every cell.
    pub keyword: Option<String>,
    /// Selected deadline categories.
    pub deadline_categories: Vec<DeadlineCategory>,
}

impl TriggerFilter {
    /// True if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.company_types.is_empty()
            && self.departments.is_empty()
            && self.packaging == PackagingType::All
            && self.keyword.as_deref().map_or(true, str::is_empty)
            && self.deadline_categories.is_empty()
    }

    /// True if `record` passes every criterion.
    pub fn matches(&self, record: &TriggerRecord) -> bool {
        self.matches_company_type(record)
            && self.matches_department(record)
            && self.matches_packaging(record)
            && self.matches_keyword(record)
            && self.matches_deadline_category(record)
    }

    /// Indices of the records of `dataset` that pass, in order.
    pub fn apply(&self, dataset: &Dataset) -> Vec<usize> {
        let selected: Vec<usize> = dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, rec)| self.matches(rec))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            total = dataset.len(),
            selected = selected.len(),
            "applied trigger filter"
        );
        selected
    }

    fn matches_company_type(&self, record: &TriggerRecord) -> bool {
        if self.company_types.is_empty() {
            return true;
        }
        let cell = record.text(columns::COMPANY_TYPE);
        self.company_types.iter().any(|ct| cell.contains(ct.as_str()))
    }

    fn matches_department(&self, record: &TriggerRecord) -> bool {
        if self.departments.is_empty() {
            return true;
        }
        let cell = record.text(columns::DEPARTMENT);
        self.departments.iter().any(|d| *d == cell)
    }

    fn matches_packaging(&self, record: &TriggerRecord) -> bool {
        match self.packaging {
            PackagingType::All => true,
            PackagingType::Food => record.text(columns::PRODUCT_TYPE) == FOOD_PRODUCT_TYPE,
        }
    }

    fn matches_keyword(&self, record: &TriggerRecord) -> bool {
        let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) else {
            return true;
        };
        let needle = keyword.to_lowercase();
        record
            .cells()
            .any(|(_, cell)| cell.display_text().to_lowercase().contains(&needle))
    }

    fn matches_deadline_category(&self, record: &TriggerRecord) -> bool {
        if self.deadline_categories.is_empty() {
            return true;
        }
        let cell = record.text(columns::DEADLINE_CATEGORY);
        self.deadline_categories.iter().any(|c| c.label() == cell)
    }
}

/// Company-type options: every `;`-separated part of every `Company type`
/// cell, trimmed, de-duplicated and sorted.
pub fn company_type_options(dataset: &Dataset) -> Vec<String> {
    let options: BTreeSet<String> = dataset
        .records()
        .iter()
        .map(|rec| rec.get(columns::COMPANY_TYPE))
        .filter(|cell| !cell.is_blank())
        .flat_map(|cell| {
            cell.display_text()
                .split(';')
                .map(|part| part.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|part| !part.is_empty())
        .collect();
    options.into_iter().collect()
}

/// Department options: the sorted unique non-empty `Department` values.
pub fn department_options(dataset: &Dataset) -> Vec<String> {
    let options: BTreeSet<String> = dataset
        .records()
        .iter()
        .map(|rec| rec.get(columns::DEPARTMENT))
        .filter(|cell| !cell.is_blank())
        .map(|cell| cell.display_text())
        .collect();
    options.into_iter().collect()
}
