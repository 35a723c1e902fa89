//! # panelkit
//!
//! Declarative widget panels on top of an immediate-mode drawing library.
//!
//! panelkit describes a UI as a tree of widget nodes, each carrying a flexbox
//! style. The tree is built either in code with a fluent builder or from XML
//! markup, solved with [taffy](https://crates.io/crates/taffy), and drawn every
//! frame through a [`Painter`](render::Painter) the application supplies.
//! Inputs are bound to fields of an application data model and edit it in
//! place. Markup panels reload when their file changes.
//!
//! ## Core Systems
//!
//! - **[`style`]**: style record and its enumerations
//! - **[`layout`]**: taffy-backed layout context and style resolution
//! - **[`node`]**: widget nodes, containers, the two-pass layout and drawing
//! - **[`builder`]**: fluent typed construction of nodes
//! - **[`markup`]**: XML element parser on quick-xml
//! - **[`pipeline`]**: markup elements to widget trees, with validation
//! - **[`model`]** / **[`binding`]**: the data model and typed field bindings
//! - **[`panel`]** / **[`registry`]**: windows holding one tree each
//! - **[`watch`]**: poll-based change detection for markup files
//! - **[`app`]**: the frame loop context tying everything together
//! - **[`testing`]**: a recording painter and tree dumps for tests
//!
//! ## Example
//!
//! ```ignore
//! use panelkit::prelude::*;
//!
//! let mut app = App::new(AppConfig::new());
//! let mut data = AppData::new();
//! app.loader.add_button_callback("submit", || println!("submitted"));
//! app.load_panel("contact", "assets/contact_panel.xml", &data, true)?;
//!
//! loop {
//!     let report = app.frame(&mut painter, &mut data);
//!     report.run_callbacks();
//! }
//! ```

// Foundation
pub mod geometry;
pub mod style;

// Layout and widgets
pub mod layout;
pub mod node;
pub mod builder;

// Data
pub mod model;
pub mod binding;

// Markup
pub mod markup;
pub mod pipeline;

// Windows
pub mod render;
pub mod panel;
pub mod registry;
pub mod watch;

// Application
pub mod app;
pub mod demo;

// Test helpers
pub mod testing;

/// The types most applications need.
pub mod prelude {
    pub use crate::app::{App, AppConfig, FrameReport};
    pub use crate::binding::{FlagField, FloatField, IntField, TextField};
    pub use crate::builder::{
        ButtonBuilder, CheckboxBuilder, HLayoutBuilder, LabelBuilder, NumberInputBuilder,
        RadioButtonBuilder, TextInputBuilder, VLayoutBuilder,
    };
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::layout::LayoutContext;
    pub use crate::model::{AppData, CityRecord, ClimateZone, Language};
    pub use crate::node::{Node, NodeKind, Orientation};
    pub use crate::panel::Panel;
    pub use crate::pipeline::{LoadError, MarkupLoader};
    pub use crate::registry::PanelRegistry;
    pub use crate::render::{Painter, PanelFrame, RenderCx};
    pub use crate::style::{Align, AlignSelf, FontSize, Justify, NamedColor, Style, Variant};
    pub use crate::watch::{FileObserver, FileWatcher};
}
