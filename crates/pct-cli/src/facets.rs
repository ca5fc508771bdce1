//! # Facets Subcommand
//!
//! Lists the values offered by the company-type and department filters.

use std::fmt::Write;

use anyhow::Result;
use clap::Args;

use pct_dataset::{company_type_options, department_options, PackagingType};

use crate::Session;

/// Arguments for `pct facets`.
#[derive(Args, Debug, Clone, Default)]
pub struct FacetsArgs {}

/// Execute the facets subcommand.
pub fn run_facets(_args: &FacetsArgs, session: &Session) -> Result<u8> {
    print!("{}", render_facets(session));
    Ok(0)
}

/// Render every facet as a titled list.
pub fn render_facets(session: &Session) -> String {
    let mut out = String::new();
    section(&mut out, "Company types", &company_type_options(&session.dataset));
    section(&mut out, "Departments", &department_options(&session.dataset));
    let packaging = [PackagingType::All, PackagingType::Food].map(|p| p.label().to_string());
    section(&mut out, "Packaging types", &packaging);
    let categories: Vec<String> = pct_core::DeadlineCategory::all()
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    section(&mut out, "Deadline categories", &categories);
    out
}

fn section(out: &mut String, title: &str, values: &[String]) {
    let _ = writeln!(out, "{title}:");
    for value in values {
        let _ = writeln!(out, "  {value}");
    }
    out.push('\n');
}
