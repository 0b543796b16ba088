//! Output formatting and display for stapler.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Error and warning display
//! - Plan and split reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use stapler::output::OutputFormatter;
//! use stapler::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Selecting pages");
//! formatter.success("Wrote out.pdf");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::plan::{PlannedPage, SelectionPlan};

/// Describe one planned page the way verbose output reports it.
pub fn describe_page(page: &PlannedPage) -> String {
    format!(
        "Using page: {} (rotation: {} deg.)",
        page.page,
        page.rotation.as_degrees()
    )
}

/// List every page of a plan, numbered from 1.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `plan` - Plan to display
pub fn display_plan(formatter: &OutputFormatter, plan: &SelectionPlan) {
    for (index, line) in plan_lines(plan).iter().enumerate() {
        formatter.list_item(index + 1, line);
    }
}

/// One line per planned page: source, page number and rotation.
pub fn plan_lines(plan: &SelectionPlan) -> Vec<String> {
    plan.iter()
        .map(|page| {
            format!(
                "{} page {} (rotation: {} deg.)",
                page.source.display(),
                page.page,
                page.rotation.as_degrees()
            )
        })
        .collect()
}
