//! # Deadline Classification Policy
//!
//! Buckets a resolved deadline into one of the three [`DeadlineCategory`]
//! values, relative to an [`EvaluationDate`].
//!
//! Precedence:
//!
//! 1. Override text containing "in force" (any case) → `InForce`.
//! 2. Unresolved date → `DueBeyondYear`.
//! 3. Date on or before the evaluation date → `InForce`; up to
//!    [`DUE_HORIZON_DAYS`] days after → `DueWithinYear`; later →
//!    `DueBeyondYear`.
//!
//! An unknown deadline lands in the furthest bucket. It is never reported as
//! already in force.

use pct_core::{columns, CellValue, DeadlineCategory, EvaluationDate, TriggerRecord};

use crate::resolver::{resolve, ResolvedDate};

/// Phrase that marks an obligation as currently binding.
pub const IN_FORCE_MARKER: &str = "in force";

/// Days after the evaluation date that still count as "due within a year".
pub const DUE_HORIZON_DAYS: i64 = 365;

/// True if `text` contains [`IN_FORCE_MARKER`], ignoring case.
pub fn mentions_in_force(text: &str) -> bool {
    text.to_lowercase().contains(IN_FORCE_MARKER)
}

/// True if a raw cell's text mentions [`IN_FORCE_MARKER`].
pub fn cell_mentions_in_force(cell: &CellValue) -> bool {
    match cell {
        CellValue::Text(s) => mentions_in_force(s),
        _ => false,
    }
}

/// Classify one resolved deadline.
pub fn classify(
    resolved: ResolvedDate,
    status_text: Option<&str>,
    evaluation_date: EvaluationDate,
) -> DeadlineCategory {
    let overridden = status_text.is_some_and(mentions_in_force);
    classify_with_override(resolved, overridden, evaluation_date)
}

/// Classify with the override signal already evaluated.
pub fn classify_with_override(
    resolved: ResolvedDate,
    in_force_override: bool,
    evaluation_date: EvaluationDate,
) -> DeadlineCategory {
    if in_force_override {
        return DeadlineCategory::InForce;
    }
    let Some(date) = resolved.date() else {
        return DeadlineCategory::DueBeyondYear;
    };
    let days_ahead = (date - evaluation_date.date()).num_days();
    if days_ahead <= 0 {
        DeadlineCategory::InForce
    } else if days_ahead <= DUE_HORIZON_DAYS {
        DeadlineCategory::DueWithinYear
    } else {
        DeadlineCategory::DueBeyondYear
    }
}

/// Applies the classification policy against one fixed evaluation date.
///
/// Construct one classifier per pass so every record in that pass is judged
/// against the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineClassifier {
    evaluation_date: EvaluationDate,
}

impl DeadlineClassifier {
    /// Create a classifier pinned to `evaluation_date`.
    pub fn new(evaluation_date: EvaluationDate) -> Self {
        Self { evaluation_date }
    }

    /// Create a classifier pinned to today's local date.
    pub fn for_today() -> Self {
        Self::new(EvaluationDate::today())
    }

    /// The date this classifier judges against.
    pub fn evaluation_date(&self) -> EvaluationDate {
        self.evaluation_date
    }

    /// Classify a resolved date with optional status text.
    pub fn classify(&self, resolved: ResolvedDate, status_text: Option<&str>) -> DeadlineCategory {
        classify(resolved, status_text, self.evaluation_date)
    }

    /// Classify a whole record.
    ///
    /// The override signal is read from both the `Status` cell and the raw
    /// `Deadline` cell, so a deadline cell that simply says "In force" is
    /// classified as such.
    pub fn classify_record(&self, record: &TriggerRecord) -> DeadlineCategory {
        let deadline = record.get(columns::DEADLINE);
        let overridden = record_override(record);
        classify_with_override(resolve(deadline), overridden, self.evaluation_date)
    }
}

/// The in-force override signal of a record: `Status` or `Deadline` text
/// mentions "in force".
pub fn record_override(record: &TriggerRecord) -> bool {
    cell_mentions_in_force(record.get(columns::STATUS))
        || cell_mentions_in_force(record.get(columns::DEADLINE))
}
