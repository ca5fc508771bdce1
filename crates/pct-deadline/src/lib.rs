//! # pct-deadline — Deadline Classification Engine
//!
//! Resolves heterogeneous `Deadline` cells (ISO dates, "Estimated <date>",
//! bare years, quarter notation, spreadsheet serials, native dates) to
//! calendar dates and buckets every trigger into one of three
//! [`DeadlineCategory`](pct_core::DeadlineCategory) values.
//!
//! ## Architecture
//!
//! ```text
//! CellValue ──resolve──▶ ResolvedDate ──classify──▶ DeadlineCategory
//!                 ▲                         ▲
//!          ordered attempt chain     Status override, evaluation date
//! ```
//!
//! - [`resolver`]: pure, total date resolution. Never fails.
//! - [`classifier`]: the three-bucket policy.
//! - [`annotate`]: per-dataset resolution cache and the annotation pass.
//!
//! Both `resolve` and `classify` are total functions: an unparseable deadline
//! is the value `Unresolved`, which the policy maps to `Due > 1 year`.

pub mod annotate;
pub mod classifier;
pub mod resolver;

pub use annotate::{annotate, annotate_with, CategorySummary, ResolvedDeadlines};
pub use classifier::{
    classify, mentions_in_force, DeadlineClassifier, DUE_HORIZON_DAYS, IN_FORCE_MARKER,
};
pub use resolver::{
    resolve, resolve_with_rule, FragmentFormat, Resolution, ResolutionRule, ResolvedDate,
};
