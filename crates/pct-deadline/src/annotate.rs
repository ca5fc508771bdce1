//! # Classification Passes
//!
//! [`ResolvedDeadlines`] resolves every record's `Deadline` cell once, so a
//! dataset can be re-classified (a new evaluation date, a re-render after a
//! filter change) without re-parsing free text. [`annotate`] runs one pass
//! and writes the stable category label into each record's
//! `Deadline Category` column.

use std::collections::BTreeMap;

use serde::Serialize;

use pct_core::{columns, Dataset, DeadlineCategory, EvaluationDate};

use crate::classifier::{classify_with_override, record_override};
use crate::resolver::{resolve, ResolvedDate};

/// Per-record resolution cache for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeadlines {
    entries: Vec<(ResolvedDate, bool)>,
}

impl ResolvedDeadlines {
    /// Resolve every record of `dataset` once.
    pub fn build(dataset: &Dataset) -> Self {
        let entries: Vec<_> = dataset
            .records()
            .iter()
            .map(|rec| (resolve(rec.get(columns::DEADLINE)), record_override(rec)))
            .collect();
        let unresolved = entries.iter().filter(|(r, _)| r.is_unresolved()).count();
        tracing::debug!(
            records = entries.len(),
            unresolved,
            "resolved deadline cells"
        );
        Self { entries }
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached resolution of record `index`.
    pub fn resolved(&self, index: usize) -> Option<ResolvedDate> {
        self.entries.get(index).map(|(r, _)| *r)
    }

    /// Classify every cached record against one evaluation date.
    pub fn categories(&self, evaluation_date: EvaluationDate) -> Vec<DeadlineCategory> {
        self.entries
            .iter()
            .map(|(resolved, overridden)| {
                classify_with_override(*resolved, *overridden, evaluation_date)
            })
            .collect()
    }
}

/// Per-category record counts from one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    counts: BTreeMap<DeadlineCategory, usize>,
}

impl CategorySummary {
    /// Count categories.
    pub fn from_categories(categories: &[DeadlineCategory]) -> Self {
        let mut counts = BTreeMap::new();
        for c in DeadlineCategory::all() {
            counts.insert(*c, 0);
        }
        for c in categories {
            *counts.entry(*c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Records in `category`.
    pub fn count(&self, category: DeadlineCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Records across all categories.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(category, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DeadlineCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

/// Classify `dataset` against `evaluation_date` and write each label into the
/// `Deadline Category` column, appending that column if absent.
pub fn annotate(dataset: &mut Dataset, evaluation_date: EvaluationDate) -> CategorySummary {
    let cache = ResolvedDeadlines::build(dataset);
    annotate_with(dataset, &cache, evaluation_date)
}

/// Like [`annotate`], reusing an existing resolution cache.
///
/// `cache` must have been built from `dataset`.
pub fn annotate_with(
    dataset: &mut Dataset,
    cache: &ResolvedDeadlines,
    evaluation_date: EvaluationDate,
) -> CategorySummary {
    let categories = cache.categories(evaluation_date);
    dataset.ensure_column(columns::DEADLINE_CATEGORY);
    for (record, category) in dataset.records_mut().iter_mut().zip(&categories) {
        record.insert(columns::DEADLINE_CATEGORY, category.label());
    }
    let summary = CategorySummary::from_categories(&categories);
    tracing::info!(
        evaluation_date = %evaluation_date,
        in_force = summary.count(DeadlineCategory::InForce),
        due_within_year = summary.count(DeadlineCategory::DueWithinYear),
        due_beyond_year = summary.count(DeadlineCategory::DueBeyondYear),
        "classified triggers"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pct_core::{CellValue, TriggerRecord};

    fn dataset(deadlines: &[&str]) -> Dataset {
        let records = deadlines
            .iter()
            .map(|d| TriggerRecord::from_pairs([("Trigger", "t"), ("Deadline", *d)]))
            .collect();
        Dataset::new(vec!["Trigger".into(), "Deadline".into()], records)
    }

    fn eval(s: &str) -> EvaluationDate {
        EvaluationDate::parse(s).unwrap()
    }

    #[test]
    fn cache_resolves_once_and_reclassifies() {
        let ds = dataset(&["2025-06-01", "TBD"]);
        let cache = ResolvedDeadlines::build(&ds);
        assert_eq!(cache.len(), 2);
        assert!(cache.resolved(1).unwrap().is_unresolved());
        assert_eq!(
            cache.categories(eval("2025-01-01")),
            vec![DeadlineCategory::DueWithinYear, DeadlineCategory::DueBeyondYear]
        );
        assert_eq!(
            cache.categories(eval("2025-06-01")),
            vec![DeadlineCategory::InForce, DeadlineCategory::DueBeyondYear]
        );
    }

    #[test]
    fn annotate_adds_column_and_labels() {
        let mut ds = dataset(&["In force", "2030"]);
        let summary = annotate(&mut ds, eval("2025-01-01"));
        assert_eq!(ds.columns().last().map(String::as_str), Some("Deadline Category"));
        assert_eq!(
            ds.records()[0].get("Deadline Category"),
            &CellValue::Text("In force".into())
        );
        assert_eq!(ds.records()[1].text("Deadline Category"), "Due > 1 year");
        assert_eq!(summary.count(DeadlineCategory::InForce), 1);
        assert_eq!(summary.count(DeadlineCategory::DueWithinYear), 0);
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn annotate_twice_overwrites_labels() {
        let mut ds = dataset(&["2025-06-01"]);
        annotate(&mut ds, eval("2025-01-01"));
        annotate(&mut ds, eval("2025-07-01"));
        assert_eq!(ds.records()[0].text("Deadline Category"), "In force");
        assert_eq!(
            ds.columns().iter().filter(|c| *c == "Deadline Category").count(),
            1
        );
    }

    #[test]
    fn summary_lists_every_category() {
        let summary = CategorySummary::from_categories(&[]);
        assert_eq!(summary.iter().count(), 3);
        assert_eq!(summary.total(), 0);
    }
}
