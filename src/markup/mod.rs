//! Panel markup: XML parser and element tree.
//!
//! Documents are read with quick-xml. Elements and their attributes form the
//! tree; character data, CDATA sections, comments, processing instructions
//! and the DOCTYPE carry no meaning and are dropped.

pub mod element;
pub mod parser;

pub use element::Element;
pub use parser::{parse_document, parse_fragment};

/// Malformed markup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkupError {
    #[error("malformed markup at byte {position}: {source}")]
    Syntax {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),

    #[error("character data outside an element before byte {position}")]
    StrayText { position: usize },

    #[error("expected one top-level element, found {0}")]
    MultipleRoots(usize),
}
