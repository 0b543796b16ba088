//! Utilities for input path expansion, split naming and size and time display.

use crate::{Result, error::StaplerError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns are expanded in the order given; matches of one pattern come
/// out sorted. A pattern that matches nothing is kept as a literal path so
/// that loading it reports the missing file by name.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = collect_paths_for_pattern(pattern)?;
        if paths.is_empty() {
            resolved_paths.push(PathBuf::from(pattern));
        } else {
            resolved_paths.extend(paths);
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"scans/*.pdf"`
/// - `"chapter-[0-9].pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        StaplerError::other(format!("Invalid file pattern '{pattern}': {err}"))
    })?;

    paths
        .map(|entry| entry.map_err(|err| StaplerError::other(err.to_string())))
        .collect()
}

/// Width of the zero-padded page index in split output names.
///
/// This is the number of decimal digits of `page_count`, at least 1, so
/// every index from 1 to `page_count` fits.
pub fn split_padding(page_count: usize) -> usize {
    page_count.max(1).ilog10() as usize + 1
}

/// Name of the file holding page `page` of a split `source`.
///
/// `<basename>_<zero-padded page><extension>`, e.g. `report_07.pdf` for
/// page 7 of a 12-page `dir/report.pdf`.
pub fn split_file_name(source: &Path, page: usize, page_count: usize) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let width = split_padding(page_count);

    format!("{stem}_{page:0width$}{extension}")
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Format a load or write time for verbose output.
pub fn format_duration(duration: Duration) -> String {
    if duration.as_secs() >= 1 {
        format!("{:.2} s", duration.as_secs_f64())
    } else {
        format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
    }
}
