//! Document-level operations on loaded PDFs: page assembly and metadata.

pub mod assembler;
pub mod metadata;

pub use assembler::PageAssembler;
pub use metadata::{DocumentInfo, InfoEntry, MetadataReader};
