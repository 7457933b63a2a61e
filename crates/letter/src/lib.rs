//! Content model for a business letter: the flat [`LetterRecord`] state, the
//! salutation rule, the plain-text preview, and the writer-agnostic
//! [`DocumentPlan`] consumed by the document exporter.

pub mod error;
pub mod plan;
pub mod preview;
pub mod record;
pub mod salutation;

pub use error::LetterError;
pub use plan::{
    compose, Alignment, DocBlock, DocumentPlan, DocumentStyle, ImageSpec, PageMargins,
    ParagraphSpec, TableCellSpec, TableSpec,
};
pub use preview::render_preview;
pub use record::{ImageRef, LetterRecord};
pub use salutation::salutation;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
