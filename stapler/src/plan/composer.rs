//! Composition strategies turning input specs into selection plans.
//!
//! - [`interleave`] - zip pages of all inputs round-robin
//! - [`select`] - concatenate the listed pages of each input
//! - [`exclude`] - concatenate everything except the listed pages
//! - [`split`] - one single-page plan per page of each input
//!
//! The inclusive strategies reject pages a document does not have. The
//! exclusive one ignores them: a page that does not exist cannot be kept
//! either.

use std::path::PathBuf;

use crate::error::{Result, StaplerError};
use crate::plan::round_robin::interleave as round_robin;
use crate::plan::{PlannedPage, SelectionPlan, SplitOutput};
use crate::range::{InputSpec, Rotation};
use crate::utils::split_file_name;

/// How a multi-input command combines its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Interleave pages of all inputs.
    Zip,
    /// Concatenate the selected pages.
    Select,
    /// Concatenate everything except the selected pages.
    Delete,
}

/// Build the plan for `strategy`.
pub fn compose(strategy: Strategy, specs: &[InputSpec]) -> Result<SelectionPlan> {
    match strategy {
        Strategy::Zip => interleave(specs),
        Strategy::Select => select(specs),
        Strategy::Delete => Ok(exclude(specs)),
    }
}

/// Interleave the selected pages of every input round-robin.
///
/// # Errors
///
/// Returns [`StaplerError::PageOutOfRange`] for the first page some input
/// does not have.
pub fn interleave(specs: &[InputSpec]) -> Result<SelectionPlan> {
    let per_file = specs
        .iter()
        .map(selected_pages)
        .collect::<Result<Vec<_>>>()?;

    Ok(round_robin(per_file).collect())
}

/// Concatenate the selected pages of every input in input order.
///
/// # Errors
///
/// Returns [`StaplerError::PageOutOfRange`] for the first page some input
/// does not have.
pub fn select(specs: &[InputSpec]) -> Result<SelectionPlan> {
    let mut plan = SelectionPlan::default();
    for spec in specs {
        plan.extend(selected_pages(spec)?);
    }
    Ok(plan)
}

/// Concatenate every page not named by the expressions, in ascending order.
///
/// Rotations in the expressions are ignored, as are page numbers the
/// document does not have.
pub fn exclude(specs: &[InputSpec]) -> SelectionPlan {
    specs.iter().flat_map(retained_pages).collect()
}

/// One single-page plan per page of every input.
///
/// Range expressions are ignored. Output names are produced by
/// [`split_file_name`].
pub fn split(specs: &[InputSpec]) -> Vec<SplitOutput> {
    specs
        .iter()
        .flat_map(|spec| {
            let count = spec.page_count();
            (1..=count).map(move |page| SplitOutput {
                file_name: split_file_name(spec.path(), page, count),
                plan: SelectionPlan::from(vec![PlannedPage::new(
                    spec.path().to_path_buf(),
                    page,
                    Rotation::None,
                )]),
            })
        })
        .collect()
}

/// Expand and bounds-check the inclusive selection of one input.
fn selected_pages(spec: &InputSpec) -> Result<Vec<PlannedPage>> {
    let count = spec.page_count();
    spec.expression()
        .expand(count)
        .into_iter()
        .map(|token| {
            if (1..=count).contains(&token.page) {
                Ok(PlannedPage::new(
                    spec.path().to_path_buf(),
                    token.page,
                    token.rotation,
                ))
            } else {
                Err(StaplerError::page_out_of_range(
                    spec.path().to_path_buf(),
                    token.page,
                    count,
                ))
            }
        })
        .collect()
}

/// Ascending complement of the pages named by one input's expression.
fn retained_pages(spec: &InputSpec) -> Vec<PlannedPage> {
    let count = spec.page_count();
    let expression = spec.expression();

    let path: PathBuf = spec.path().to_path_buf();
    (1..=count)
        .filter(|page| !expression.names(*page, count))
        .map(|page| PlannedPage::new(path.clone(), page, Rotation::None))
        .collect()
}
