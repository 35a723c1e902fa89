//! Layout adapter: taffy integration and style resolution.

pub mod engine;
pub mod resolve;

pub use engine::{LayoutContext, LayoutHandle};
