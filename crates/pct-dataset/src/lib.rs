//! # pct-dataset — Trigger Dataset Collaborators
//!
//! Everything around the deadline engine that touches the trigger table as a
//! whole:
//!
//! - [`loader`]: workbook (`calamine`) and CSV (`csv`) loading into a
//!   [`Dataset`](pct_core::Dataset), with trimmed headers and a required
//!   `Deadline` column.
//! - [`filter`]: the dashboard criteria (company type, department, packaging
//!   type, keyword, deadline category) and the facet option lists.
//! - [`export`]: CSV export of a filtered view.
//!
//! Filtering works on record indices, so the same loaded dataset serves any
//! number of filter passes without copying rows.

pub mod export;
pub mod filter;
pub mod loader;

pub use export::{export_csv, export_csv_file, write_csv, DEFAULT_EXPORT_FILE_NAME};
pub use filter::{company_type_options, department_options, PackagingType, TriggerFilter};
pub use loader::{load_dataset, SourceFormat};
