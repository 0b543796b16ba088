//! Page range expressions and their binding to input files.
//!
//! [`parse`] turns an expression such as `"1-3,7r90,9-"` into a
//! [`RangeExpression`]; [`resolve`] pairs each `file[:range]` token with its
//! parsed expression and the page count of the file.

pub mod parser;
pub mod resolver;

pub use parser::{PageSpan, RangeExpression, RangeItem, RangeToken, Rotation, parse};
pub use resolver::{InputSpec, InputToken, PageCounter, resolve, resolve_whole};
