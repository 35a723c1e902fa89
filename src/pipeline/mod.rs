//! Markup to widget tree.
//!
//! Each element is built by the [`ElementKind`] for its tag, then its shared
//! geometry and style attributes are applied and, for containers, its child
//! elements are built in document order. Construction problems are logged
//! and degrade to a best-effort tree: an element that cannot be built is left
//! out, a bind key that cannot be resolved leaves its widget unbound. Only
//! unreadable or malformed documents fail a load ([`LoadError`]).

pub mod attrs;
pub mod callbacks;
pub mod loader;
pub mod strategy;
pub mod validate;

pub use callbacks::CallbackRegistry;
pub use loader::{LoadError, MarkupLoader, DEFAULT_PANEL_SIZE, DEFAULT_TITLE, PANEL_TAG};
pub use strategy::{BuildError, ElementKind};
pub use validate::{validate_hierarchy, HierarchyError};
