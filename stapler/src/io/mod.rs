//! PDF input and output.

pub mod reader;
pub mod writer;

pub use reader::{DocumentStore, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, check_overwrite, resolve_output_path};
