//! Headless testing helpers: a recording painter and tree dumps.
//!
//! Use [`RecordingPainter`] to render panels without a drawing library and to
//! script user input (clicks, edits, picks) for the next frame. Use
//! [`outline`] and [`structure`] to capture a tree as plain text for
//! snapshot-style assertions.

pub mod painter;
pub mod snapshot;

pub use painter::{DrawCall, RecordingPainter};
pub use snapshot::{outline, structure};
