//! # Classify Subcommand
//!
//! Prints the deadline category assigned to every trigger, followed by the
//! per-category counts.
//!
//! ```text
//! Evaluation date: 2025-01-01
//!
//! Trigger | Deadline | Deadline Category
//! EPR registration | In Force | In force
//! ...
//!
//! In force: 1
//! Due < 1 year: 1
//! Due > 1 year: 3
//! Total: 5
//! ```

use std::fmt::Write;

use anyhow::Result;
use clap::Args;

use pct_core::columns;

use crate::Session;

/// Arguments for `pct classify`.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Print only the per-category counts.
    #[arg(long)]
    pub summary_only: bool,
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs, session: &Session) -> Result<u8> {
    print!("{}", render_classification(session, args.summary_only));
    Ok(0)
}

/// Render the classification report.
pub fn render_classification(session: &Session, summary_only: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Evaluation date: {}", session.evaluation_date);
    out.push('\n');

    if !summary_only {
        let _ = writeln!(
            out,
            "{} | {} | {}",
            columns::TRIGGER,
            columns::DEADLINE,
            columns::DEADLINE_CATEGORY
        );
        for record in session.dataset.records() {
            let _ = writeln!(
                out,
                "{} | {} | {}",
                record.text(columns::TRIGGER),
                record.text(columns::DEADLINE),
                record.text(columns::DEADLINE_CATEGORY)
            );
        }
        out.push('\n');
    }

    for (category, count) in session.summary.iter() {
        let _ = writeln!(out, "{category}: {count}");
    }
    let _ = writeln!(out, "Total: {}", session.summary.total());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn full_report_lists_every_trigger() {
        let text = render_classification(&testing::session(), false);
        assert!(text.starts_with("Evaluation date: 2025-01-01\n\n"));
        assert!(text.contains("Trigger | Deadline | Deadline Category\n"));
        assert!(text.contains("EPR registration | In Force | In force\n"));
        assert!(text.contains("Label recyclability | Estimated 2025-06-01 | Due < 1 year\n"));
        assert!(text.contains("Deposit return |  | Due > 1 year\n"));
        assert!(text.ends_with("Due > 1 year: 3\nTotal: 5\n"));
    }

    #[test]
    fn summary_only_skips_rows() {
        let text = render_classification(&testing::session(), true);
        assert!(!text.contains("EPR registration"));
        assert!(text.contains("In force: 1\n"));
        assert!(text.contains("Due < 1 year: 1\n"));
    }
}
