//! # Domain Layer
//!
//! Pure indexing logic: cursor arithmetic, the annotator registry, and
//! errors. No I/O dependencies.

pub mod annotators;
pub mod cursor;
pub mod errors;

pub use annotators::{AnnotationOutcome, AnnotatorRegistry};
pub use cursor::IndexCursor;
pub use errors::IndexError;
