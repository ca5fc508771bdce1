//! # pct-core — Foundational Types for the Packaging Compliance Tool
//!
//! This crate defines the types shared by the deadline engine, the dataset
//! collaborators, and the CLI. Every other crate in the workspace depends on
//! `pct-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Raw cells stay raw.** `CellValue` keeps native dates, numbers and
//!    text apart so the deadline resolver can treat each on its own terms.
//!
//! 2. **Single `DeadlineCategory` enum.** One definition, three variants,
//!    one set of external labels. The labels are exact-match filter keys.
//!
//! 3. **One evaluation date per pass.** `EvaluationDate` is captured once
//!    and passed down; nothing samples the clock per record.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pct-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod cell;
pub mod error;
pub mod record;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use category::{DeadlineCategory, DEADLINE_CATEGORY_COUNT};
pub use cell::CellValue;
pub use error::PctError;
pub use record::{columns, Dataset, TriggerRecord};
pub use temporal::{spreadsheet_serial_to_date, EvaluationDate};
