//! # Deadline Category — Single Source of Truth
//!
//! Defines the `DeadlineCategory` enum with the three status buckets a
//! trigger can fall into. The external labels produced here are used as
//! exact-match filter keys by every consumer, so they are defined once and
//! must stay stable across releases.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PctError;

/// The deadline status bucket of a compliance trigger.
///
/// | Variant | Label | Meaning |
/// |---------|-------|---------|
/// | `InForce` | `In force` | Deadline passed, or the obligation is marked active |
/// | `DueWithinYear` | `Due < 1 year` | Deadline falls within the next 365 days |
/// | `DueBeyondYear` | `Due > 1 year` | Deadline is further out, or unknown |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeadlineCategory {
    /// The obligation already applies.
    #[serde(rename = "In force")]
    InForce,
    /// The obligation applies within one year of the evaluation date.
    #[serde(rename = "Due < 1 year")]
    DueWithinYear,
    /// The obligation applies more than a year out, or its date is unknown.
    #[serde(rename = "Due > 1 year")]
    DueBeyondYear,
}

/// Total number of deadline categories.
pub const DEADLINE_CATEGORY_COUNT: usize = 3;

impl DeadlineCategory {
    /// Returns all categories in display order.
    pub fn all() -> &'static [DeadlineCategory] {
        &[Self::InForce, Self::DueWithinYear, Self::DueBeyondYear]
    }

    /// The stable external label. Matches the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InForce => "In force",
            Self::DueWithinYear => "Due < 1 year",
            Self::DueBeyondYear => "Due > 1 year",
        }
    }

    /// The snake_case identifier, convenient on a command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::InForce => "in_force",
            Self::DueWithinYear => "due_within_year",
            Self::DueBeyondYear => "due_beyond_year",
        }
    }
}

impl std::fmt::Display for DeadlineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeadlineCategory {
    type Err = PctError;

    /// Parse a category from its exact label or its snake_case id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.label() == s || c.id() == s)
            .ok_or_else(|| {
                PctError::InvalidValue(format!(
                    "unknown deadline category: {s:?} (expected one of \"In force\", \"Due < 1 year\", \"Due > 1 year\")"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_count() {
        assert_eq!(DeadlineCategory::all().len(), DEADLINE_CATEGORY_COUNT);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(DeadlineCategory::InForce.label(), "In force");
        assert_eq!(DeadlineCategory::DueWithinYear.label(), "Due < 1 year");
        assert_eq!(DeadlineCategory::DueBeyondYear.label(), "Due > 1 year");
    }

    #[test]
    fn test_parse_label_and_id() {
        for c in DeadlineCategory::all() {
            assert_eq!(c.label().parse::<DeadlineCategory>().unwrap(), *c);
            assert_eq!(c.id().parse::<DeadlineCategory>().unwrap(), *c);
        }
    }

    #[test]
    fn test_parse_invalid() {
        assert!("in force".parse::<DeadlineCategory>().is_err()); // case-sensitive
        assert!("".parse::<DeadlineCategory>().is_err());
        assert!("Due < 2 years".parse::<DeadlineCategory>().is_err());
    }

    #[test]
    fn test_serde_format_matches_label() {
        for c in DeadlineCategory::all() {
            let json = serde_json::to_string(c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.label()));
            let back: DeadlineCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *c);
        }
    }

    #[test]
    fn test_display_matches_label() {
        for c in DeadlineCategory::all() {
            assert_eq!(c.to_string(), c.label());
        }
    }
}
