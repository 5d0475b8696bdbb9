//! Annotation module
//!
//! Data model and SQLite persistence for reader annotations. An annotation
//! pins a half-open char range `[start_offset, end_offset)` of an article's
//! immutable content and carries the enrichment captured when the reader
//! selected it:
//!
//! - the exact selected text (offset fidelity check at creation)
//! - phonetic transcription and dictionary definitions
//! - the sentence surrounding the selection
//! - an optional pronunciation audio URL
//!
//! Article content never changes after upload, so stored ranges stay valid
//! for the article's lifetime.

mod store;
mod types;

pub use store::AnnotationRepository;
pub use types::{
    ranges_overlap, validate_range, Annotation, AnnotationError, Definition,
    DEFAULT_HIGHLIGHT_COLOR,
};
