//! Range expression parsing.
//!
//! A range expression selects pages (and optionally rotates them):
//!
//! - `"5"` - a single page
//! - `"1-5"` - pages 1 through 5
//! - `"5-1"` - pages 5 down to 1, in that order
//! - `"3-"` - page 3 through the last page
//! - `"2r90"`, `"4-6R"`, `"7D"`, `"1L"` - rotated pages
//! - `"1-3,7,9-"` - any comma-separated combination
//!
//! Parsing never looks at a document. Open-ended items keep a to-end marker
//! and all page numbers are checked against the real page count only when
//! the expression is expanded.

use serde::Serialize;

use crate::error::{Result, StaplerError};

/// Clockwise page rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "u16")]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// Only 90, 180 and 270 are accepted; 0 is expressed by omitting the suffix.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            90 => Some(Self::Clockwise90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Clockwise270),
            _ => None,
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.as_degrees()
    }
}

/// A single resolved page reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeToken {
    /// 1-based page number.
    pub page: usize,
    /// Rotation to apply to the page.
    pub rotation: Rotation,
}

impl RangeToken {
    /// Create a token for `page` with `rotation`.
    pub fn new(page: usize, rotation: Rotation) -> Self {
        Self { page, rotation }
    }
}

/// Pages covered by one item of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpan {
    /// `N`
    Single(usize),
    /// `N-M`, either direction.
    Closed(usize, usize),
    /// `N-`, up to the last page of the document.
    ToEnd(usize),
}

impl PageSpan {
    /// Page numbers of this span in stated order.
    ///
    /// A span running past the end of the document stops at its first page
    /// beyond the end, so that bounds checking reports that page without
    /// materializing the rest. An open-ended span starting past the end
    /// therefore yields its start page alone.
    fn pages(&self, page_count: usize) -> Vec<usize> {
        let past_end = page_count.saturating_add(1);
        match *self {
            Self::Single(page) => vec![page],
            Self::Closed(start, end) if start <= end => {
                let mut pages: Vec<usize> = (start..=end.min(page_count)).collect();
                if end > page_count {
                    pages.push(start.max(past_end));
                }
                pages
            }
            Self::Closed(start, _) if start > page_count => vec![start],
            Self::Closed(start, end) => (end..=start).rev().collect(),
            Self::ToEnd(start) if start > page_count => vec![start],
            Self::ToEnd(start) => (start..=page_count).collect(),
        }
    }

    /// Whether this span names `page` of a document with `page_count` pages.
    pub fn contains(&self, page: usize, page_count: usize) -> bool {
        match *self {
            Self::Single(single) => page == single,
            Self::Closed(start, end) => (start.min(end)..=start.max(end)).contains(&page),
            Self::ToEnd(start) => (start..=page_count).contains(&page),
        }
    }
}

/// One comma-separated item of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeItem {
    /// Pages selected by the item.
    pub span: PageSpan,
    /// Rotation applied to every page of the span.
    pub rotation: Rotation,
}

/// A parsed range expression.
///
/// The empty expression means "every page, unrotated, in natural order".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeExpression {
    items: Vec<RangeItem>,
}

impl RangeExpression {
    /// The expression selecting all pages.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether no items were given.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parsed items in stated order.
    pub fn items(&self) -> &[RangeItem] {
        &self.items
    }

    /// Whether any item names `page` of a document with `page_count` pages.
    ///
    /// The empty expression names no page here.
    pub fn names(&self, page: usize, page_count: usize) -> bool {
        self.items
            .iter()
            .any(|item| item.span.contains(page, page_count))
    }

    /// Expand the expression against a document with `page_count` pages.
    ///
    /// The result keeps the stated order and may contain page numbers
    /// outside `1..=page_count`; callers decide how to treat those. A span
    /// reaching past the end is cut after its first page beyond the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use stapler::range::parse;
    ///
    /// let pages: Vec<usize> = parse("3-1,5-")
    ///     .unwrap()
    ///     .expand(6)
    ///     .iter()
    ///     .map(|token| token.page)
    ///     .collect();
    /// assert_eq!(pages, vec![3, 2, 1, 5, 6]);
    /// ```
    pub fn expand(&self, page_count: usize) -> Vec<RangeToken> {
        if self.items.is_empty() {
            return (1..=page_count)
                .map(|page| RangeToken::new(page, Rotation::None))
                .collect();
        }

        self.items
            .iter()
            .flat_map(|item| {
                item.span
                    .pages(page_count)
                    .into_iter()
                    .map(move |page| RangeToken::new(page, item.rotation))
            })
            .collect()
    }
}

impl std::str::FromStr for RangeExpression {
    type Err = StaplerError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse a range expression.
///
/// # Errors
///
/// Returns [`StaplerError::InvalidRangeSyntax`] if an item is empty, is not
/// `N`, `N-M` or `N-`, names page 0 or a non-number, or carries a rotation
/// other than 90, 180 or 270.
///
/// # Examples
///
/// ```
/// use stapler::range::{parse, Rotation};
///
/// let expr = parse("2r90").unwrap();
/// let tokens = expr.expand(3);
/// assert_eq!(tokens[0].page, 2);
/// assert_eq!(tokens[0].rotation, Rotation::Clockwise90);
///
/// assert!(parse("").unwrap().is_empty());
/// assert!(parse("1r45").is_err());
/// ```
pub fn parse(expression: &str) -> Result<RangeExpression> {
    if expression.trim().is_empty() {
        return Ok(RangeExpression::all());
    }

    let items = expression
        .split(',')
        .map(|item| parse_item(item.trim()))
        .collect::<Result<Vec<_>>>()?;

    Ok(RangeExpression { items })
}

fn parse_item(item: &str) -> Result<RangeItem> {
    if item.is_empty() {
        return Err(StaplerError::invalid_range(item, "empty range item"));
    }

    let (body, rotation) = split_rotation(item)?;

    let span = match body.split_once('-') {
        None => PageSpan::Single(parse_page(item, body)?),
        Some((start, "")) => PageSpan::ToEnd(parse_page(item, start)?),
        Some((start, end)) => PageSpan::Closed(parse_page(item, start)?, parse_page(item, end)?),
    };

    Ok(RangeItem { span, rotation })
}

/// Split a trailing rotation suffix off an item.
///
/// `r<deg>` gives explicit degrees; a bare `r`/`R` means 90, `d`/`D` 180
/// and `l`/`L` 270.
fn split_rotation(item: &str) -> Result<(&str, Rotation)> {
    if let Some(pos) = item.find(|c: char| c == 'r' || c == 'R') {
        let (body, suffix) = (&item[..pos], &item[pos + 1..]);
        if suffix.is_empty() {
            return Ok((body, Rotation::Clockwise90));
        }

        let degrees = suffix
            .parse::<u16>()
            .ok()
            .filter(|_| suffix.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| {
                StaplerError::invalid_range(item, format!("invalid rotation suffix 'r{suffix}'"))
            })?;

        let rotation = Rotation::from_degrees(degrees).ok_or_else(|| {
            StaplerError::invalid_range(
                item,
                format!("invalid rotation {degrees}; must be 90, 180 or 270"),
            )
        })?;

        return Ok((body, rotation));
    }

    let rotation = match item.as_bytes().last().copied() {
        Some(b'd' | b'D') => Rotation::Rotate180,
        Some(b'l' | b'L') => Rotation::Clockwise270,
        _ => return Ok((item, Rotation::None)),
    };

    Ok((&item[..item.len() - 1], rotation))
}

fn parse_page(item: &str, number: &str) -> Result<usize> {
    let number = number.trim();
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StaplerError::invalid_range(
            item,
            format!("'{number}' is not a page number"),
        ));
    }

    match number.parse::<usize>() {
        Ok(0) => Err(StaplerError::invalid_range(
            item,
            "page numbers must be positive (1-indexed)",
        )),
        Ok(page) => Ok(page),
        Err(_) => Err(StaplerError::invalid_range(
            item,
            format!("page number '{number}' is too large"),
        )),
    }
}
