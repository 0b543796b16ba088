//! Binding range expressions to input documents.
//!
//! Command-line inputs look like `file.pdf` or `file.pdf:1-3,7r90`. The
//! resolver splits those tokens, asks a [`PageCounter`] how many pages each
//! file has and parses the expression. It does not check page numbers
//! against the page count; that happens when a plan is composed so the
//! error can name the file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, StaplerError};
use crate::range::parser::{RangeExpression, parse};

/// A `file[:range]` command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputToken {
    /// Source file.
    pub path: PathBuf,
    /// Unparsed range expression; empty when none was given.
    pub range: String,
}

impl InputToken {
    /// Create a token from a path and a range expression.
    pub fn new(path: impl Into<PathBuf>, range: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            range: range.into(),
        }
    }

    /// Split a `file[:range]` token.
    ///
    /// The range starts after the last `:`. A suffix that contains a path
    /// separator belongs to the file name (`C:\docs\a.pdf`), as does a
    /// token with nothing before the colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use stapler::range::InputToken;
    ///
    /// let token = InputToken::parse("book.pdf:1-3,9-");
    /// assert_eq!(token.path.to_str(), Some("book.pdf"));
    /// assert_eq!(token.range, "1-3,9-");
    ///
    /// let token = InputToken::parse("book.pdf");
    /// assert!(token.range.is_empty());
    /// ```
    pub fn parse(token: &str) -> Self {
        match token.rsplit_once(':') {
            Some((path, range)) if !path.is_empty() && !range.contains(is_separator) => {
                Self::new(path, range)
            }
            _ => Self::new(token, ""),
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range.is_empty() {
            write!(f, "{}", self.path.display())
        } else {
            write!(f, "{}:{}", self.path.display(), self.range)
        }
    }
}

/// Source of page counts for input files.
///
/// Implemented by [`crate::io::DocumentStore`], which loads each PDF once,
/// and by a plain map of known counts.
pub trait PageCounter {
    /// Number of pages in the document at `path`.
    fn page_count(&mut self, path: &Path) -> Result<usize>;
}

impl PageCounter for HashMap<PathBuf, usize> {
    fn page_count(&mut self, path: &Path) -> Result<usize> {
        self.get(path)
            .copied()
            .ok_or_else(|| StaplerError::file_not_found(path.to_path_buf()))
    }
}

/// An input file bound to its range expression and page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    path: PathBuf,
    expression: RangeExpression,
    page_count: usize,
}

impl InputSpec {
    /// Create a spec directly.
    pub fn new(path: impl Into<PathBuf>, expression: RangeExpression, page_count: usize) -> Self {
        Self {
            path: path.into(),
            expression,
            page_count,
        }
    }

    /// Source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed range expression.
    pub fn expression(&self) -> &RangeExpression {
        &self.expression
    }

    /// Number of pages the source document has.
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Resolve tokens into input specs, preserving their order.
///
/// # Errors
///
/// Returns an error if a page count cannot be obtained or an expression
/// does not parse.
pub fn resolve<C>(tokens: &[InputToken], counter: &mut C) -> Result<Vec<InputSpec>>
where
    C: PageCounter + ?Sized,
{
    tokens
        .iter()
        .map(|token| {
            let page_count = counter.page_count(&token.path)?;
            let expression = parse(&token.range)?;
            Ok(InputSpec::new(token.path.clone(), expression, page_count))
        })
        .collect()
}

/// Resolve plain paths, each selecting its whole document.
///
/// Used by commands that ignore ranges (split).
pub fn resolve_whole<C>(paths: &[PathBuf], counter: &mut C) -> Result<Vec<InputSpec>>
where
    C: PageCounter + ?Sized,
{
    paths
        .iter()
        .map(|path| {
            let page_count = counter.page_count(path)?;
            Ok(InputSpec::new(path.clone(), RangeExpression::all(), page_count))
        })
        .collect()
}
