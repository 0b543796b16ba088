//! Selection plans: the ordered list of pages an output document consists of.

pub mod composer;
pub mod round_robin;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::range::Rotation;

pub use composer::{Strategy, compose, exclude, interleave, select, split};
pub use round_robin::RoundRobin;

/// One page of an output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPage {
    /// Document the page is taken from.
    pub source: PathBuf,
    /// 1-based page number in the source.
    pub page: usize,
    /// Rotation added to the page's own rotation.
    pub rotation: Rotation,
}

impl PlannedPage {
    /// Create a planned page.
    pub fn new(source: impl Into<PathBuf>, page: usize, rotation: Rotation) -> Self {
        Self {
            source: source.into(),
            page,
            rotation,
        }
    }
}

/// Ordered pages of one output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionPlan {
    pages: Vec<PlannedPage>,
}

impl SelectionPlan {
    /// Number of planned pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the plan selects nothing.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Planned pages in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedPage> {
        self.pages.iter()
    }

    /// Planned pages as a slice.
    pub fn pages(&self) -> &[PlannedPage] {
        &self.pages
    }

    /// Distinct source documents in order of first use.
    pub fn sources(&self) -> Vec<&Path> {
        let mut sources: Vec<&Path> = Vec::new();
        for page in &self.pages {
            if !sources.contains(&page.source.as_path()) {
                sources.push(&page.source);
            }
        }
        sources
    }
}

impl From<Vec<PlannedPage>> for SelectionPlan {
    fn from(pages: Vec<PlannedPage>) -> Self {
        Self { pages }
    }
}

impl FromIterator<PlannedPage> for SelectionPlan {
    fn from_iter<T: IntoIterator<Item = PlannedPage>>(iter: T) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl Extend<PlannedPage> for SelectionPlan {
    fn extend<T: IntoIterator<Item = PlannedPage>>(&mut self, iter: T) {
        self.pages.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SelectionPlan {
    type Item = &'a PlannedPage;
    type IntoIter = std::slice::Iter<'a, PlannedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// One file produced by splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitOutput {
    /// File name of the output, without directory.
    pub file_name: String,
    /// The single page it contains.
    pub plan: SelectionPlan,
}
