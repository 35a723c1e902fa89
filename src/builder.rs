//! Fluent builders for widget trees.
//!
//! A [`Builder`] owns the node it is building. Every setter takes the builder by
//! value and hands it back, and [`Builder::build`] consumes it, so a builder
//! can only ever produce one node.
//!
//! ```ignore
//! let row = HLayoutBuilder::new(&cx, "buttons")
//!     .gap(12.0)
//!     .justify(Justify::End)
//!     .add_child(ButtonBuilder::new(&cx, "ok", "OK").variant(Variant::Primary))
//!     .add_child(ButtonBuilder::new(&cx, "cancel", "Cancel"))
//!     .build();
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use tracing::debug;

use crate::binding::{Binding, FlagField, FloatField, IntField, NumberBinding, TextField};
use crate::layout::LayoutContext;
use crate::model::AppData;
use crate::node::{Node, NodeKind};
use crate::style::{Align, AlignSelf, FontSize, Justify, NamedColor, Variant};

/// Builder flavours. Each selects the extra setters a builder offers.
pub mod flavor {
    pub struct Label;
    pub struct TextInput;
    pub struct NumberInput;
    pub struct Checkbox;
    pub struct RadioButton;
    pub struct Button;
    pub struct HLayout;
    pub struct VLayout;

    /// Flavours whose nodes accept children.
    pub trait Container {}
    impl Container for HLayout {}
    impl Container for VLayout {}
}

pub type LabelBuilder = Builder<flavor::Label>;
pub type TextInputBuilder = Builder<flavor::TextInput>;
pub type NumberInputBuilder = Builder<flavor::NumberInput>;
pub type CheckboxBuilder = Builder<flavor::Checkbox>;
pub type RadioButtonBuilder = Builder<flavor::RadioButton>;
pub type ButtonBuilder = Builder<flavor::Button>;
pub type HLayoutBuilder = Builder<flavor::HLayout>;
pub type VLayoutBuilder = Builder<flavor::VLayout>;

/// Anything that can be attached as a child: a finished node or a builder.
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Node {
        self
    }
}

impl<K> IntoNode for Builder<K> {
    fn into_node(self) -> Node {
        self.build()
    }
}

/// Chained construction of one [`Node`].
pub struct Builder<K> {
    node: Node,
    _flavor: PhantomData<K>,
}

impl<K> Builder<K> {
    fn from_node(node: Node) -> Self {
        Self {
            node,
            _flavor: PhantomData,
        }
    }

    /// The node under construction.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Finish: push style and geometry into the solver once and hand over
    /// the node.
    pub fn build(self) -> Node {
        self.node.setup_layout();
        self.node
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.node.set_id(id);
        self
    }

    pub fn width(mut self, value: f32) -> Self {
        self.node.set_width(Some(value));
        self
    }

    pub fn height(mut self, value: f32) -> Self {
        self.node.set_height(Some(value));
        self
    }

    pub fn flex(mut self, value: f32) -> Self {
        self.node.set_flex(Some(value));
        self
    }

    pub fn margin(mut self, value: f32) -> Self {
        self.node.style_mut().margin = value;
        self
    }

    pub fn padding(mut self, value: f32) -> Self {
        self.node.style_mut().padding = value;
        self
    }

    pub fn gap(mut self, value: f32) -> Self {
        self.node.style_mut().gap = value;
        self
    }

    pub fn justify(mut self, value: Justify) -> Self {
        self.node.style_mut().justify = value;
        self
    }

    pub fn align(mut self, value: Align) -> Self {
        self.node.style_mut().align = value;
        self
    }

    pub fn align_self(mut self, value: AlignSelf) -> Self {
        self.node.style_mut().align_self = value;
        self
    }

    pub fn font_size(mut self, value: FontSize) -> Self {
        self.node.style_mut().font_size = value;
        self
    }

    pub fn bold(mut self, value: bool) -> Self {
        self.node.style_mut().bold = value;
        self
    }

    pub fn text_color(mut self, value: NamedColor) -> Self {
        self.node.style_mut().text_color = value;
        self
    }

    pub fn background_color(mut self, value: NamedColor) -> Self {
        self.node.style_mut().bg_color = value;
        self
    }

    pub fn variant(mut self, value: Variant) -> Self {
        self.node.style_mut().variant = value;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.node.style_mut().disabled = value;
        self
    }

    pub fn stretch(mut self, value: bool) -> Self {
        self.node.style_mut().stretch = value;
        self
    }

    pub fn wrap(mut self, value: bool) -> Self {
        self.node.style_mut().wrap = value;
        self
    }

    fn set_text(mut self, value: impl Into<String>) -> Self {
        self.node.kind_mut().set_text(value);
        self
    }
}

/// Resolve `field`, logging when it does not exist in `data`.
fn resolve<F: crate::binding::Field>(id: &str, field: F, data: &AppData) -> Option<Binding<F>> {
    let binding = Binding::resolve(field, data);
    if binding.is_none() {
        debug!(id, ?field, "field not present in data model, left unbound");
    }
    binding
}

impl LabelBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_node(Node::label(cx, id, text))
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.set_text(value)
    }
}

impl TextInputBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::from_node(Node::text_input(cx, id))
    }

    pub fn bind(mut self, field: TextField, data: &AppData) -> Self {
        let resolved = resolve(self.node.id(), field, data);
        if let NodeKind::TextInput { binding } = self.node.kind_mut() {
            *binding = resolved;
        }
        self
    }
}

impl NumberInputBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::from_node(Node::number_input(cx, id))
    }

    /// Bind to a float field, replacing any int binding.
    pub fn bind_float(mut self, field: FloatField, data: &AppData) -> Self {
        let resolved = resolve(self.node.id(), field, data).map(NumberBinding::Float);
        if let NodeKind::NumberInput { binding } = self.node.kind_mut() {
            *binding = resolved;
        }
        self
    }

    /// Bind to an int field, replacing any float binding.
    pub fn bind_int(mut self, field: IntField, data: &AppData) -> Self {
        let resolved = resolve(self.node.id(), field, data).map(NumberBinding::Int);
        if let NodeKind::NumberInput { binding } = self.node.kind_mut() {
            *binding = resolved;
        }
        self
    }
}

impl CheckboxBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_node(Node::checkbox(cx, id, text))
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.set_text(value)
    }

    pub fn bind(mut self, field: FlagField, data: &AppData) -> Self {
        let resolved = resolve(self.node.id(), field, data);
        if let NodeKind::Checkbox { binding, .. } = self.node.kind_mut() {
            *binding = resolved;
        }
        self
    }
}

impl RadioButtonBuilder {
    pub fn new(
        cx: &LayoutContext,
        id: impl Into<String>,
        text: impl Into<String>,
        group: impl Into<String>,
        value: i32,
    ) -> Self {
        Self::from_node(Node::radio_button(cx, id, text, group, value))
    }

    pub fn bind_selected(mut self, field: IntField, data: &AppData) -> Self {
        let resolved = resolve(self.node.id(), field, data);
        if let NodeKind::RadioButton { selected, .. } = self.node.kind_mut() {
            *selected = resolved;
        }
        self
    }
}

impl ButtonBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_node(Node::button(cx, id, text))
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.set_text(value)
    }

    pub fn on_click(mut self, callback: impl Fn() + 'static) -> Self {
        if let NodeKind::Button { callback: slot, .. } = self.node.kind_mut() {
            *slot = Some(Rc::new(callback));
        }
        self
    }
}

impl HLayoutBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::from_node(Node::hlayout(cx, id))
    }
}

impl VLayoutBuilder {
    pub fn new(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::from_node(Node::vlayout(cx, id))
    }
}

impl<K: flavor::Container> Builder<K> {
    /// Attach a finished node or a builder (which is built first).
    ///
    /// # Panics
    ///
    /// Panics if the child was created in a different layout context.
    pub fn add_child(mut self, child: impl IntoNode) -> Self {
        // Container flavours always wrap a container node.
        let _ = self.node.add_child(child.into_node());
        self
    }

    /// Attach every item of `children` in order.
    pub fn add_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoNode,
    {
        for child in children {
            self = self.add_child(child);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::model::Language;
    use taffy::prelude::FromLength;
    use taffy::style::{JustifyContent, LengthPercentage};

    #[test]
    fn setters_chain_and_build_pushes_style() {
        let cx = LayoutContext::new();
        let node = HLayoutBuilder::new(&cx, "row")
            .gap(12.0)
            .padding(4.0)
            .justify(Justify::SpaceBetween)
            .width(300.0)
            .wrap(true)
            .build();

        assert_eq!(node.style().gap, 12.0);
        assert!(node.style().wrap);
        assert_eq!(node.width(), Some(300.0));
        let engine = node.engine_style();
        assert_eq!(engine.gap.width, LengthPercentage::from_length(12.0));
        assert_eq!(engine.padding.left, LengthPercentage::from_length(4.0));
        assert_eq!(
            engine.justify_content,
            Some(JustifyContent::SpaceBetween)
        );
        assert_eq!(engine.flex_wrap, taffy::style::FlexWrap::Wrap);
    }

    #[test]
    fn add_child_accepts_nodes_and_builders() {
        let cx = LayoutContext::new();
        let finished = Node::label(&cx, "done", "Done");
        let root = VLayoutBuilder::new(&cx, "root")
            .add_child(finished)
            .add_child(LabelBuilder::new(&cx, "pending", "Pending").bold(true))
            .build();

        let ids: Vec<_> = root.children().iter().map(|c| c.id().to_owned()).collect();
        assert_eq!(ids, ["done", "pending"]);
        assert!(root.children()[1].style().bold);
        assert_eq!(cx.node_count(), 3);
    }

    #[test]
    fn add_children_keeps_order() {
        let cx = LayoutContext::new();
        let row = HLayoutBuilder::new(&cx, "row")
            .add_children((0..3).map(|i| LabelBuilder::new(&cx, format!("l{i}"), "x")))
            .build();
        assert_eq!(row.children().len(), 3);
        assert_eq!(row.children()[2].id(), "l2");
    }

    #[test]
    fn bindings_resolve_against_data() {
        let cx = LayoutContext::new();
        let data = AppData::with_sample_cities();
        let input = TextInputBuilder::new(&cx, "name").bind(TextField::Name, &data).build();
        assert!(input.kind().is_bound());

        let missing = NumberInputBuilder::new(&cx, "lat")
            .bind_float(FloatField::CityLatitude(7), &data)
            .build();
        assert!(!missing.kind().is_bound());

        let checkbox = CheckboxBuilder::new(&cx, "rust", "Rust")
            .bind(FlagField::Language(Language::Rust), &data)
            .build();
        assert!(checkbox.kind().is_bound());
    }

    #[test]
    fn number_input_binding_is_exclusive() {
        let cx = LayoutContext::new();
        let data = AppData::with_sample_cities();
        let node = NumberInputBuilder::new(&cx, "n")
            .bind_float(FloatField::CityAvgTemp(0), &data)
            .bind_int(IntField::CityElevation(0), &data)
            .build();
        assert!(matches!(
            node.kind(),
            NodeKind::NumberInput {
                binding: Some(NumberBinding::Int(_))
            }
        ));
    }

    #[test]
    fn on_click_installs_callback() {
        let cx = LayoutContext::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let button = ButtonBuilder::new(&cx, "ok", "OK")
            .on_click(move || counter.set(counter.get() + 1))
            .text("Okay")
            .build();

        let NodeKind::Button { text, callback } = button.kind() else {
            panic!("expected a button");
        };
        assert_eq!(text, "Okay");
        callback.as_ref().unwrap()();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn id_can_be_overridden() {
        let cx = LayoutContext::new();
        let node = LabelBuilder::new(&cx, "a", "x").id("b").build();
        assert_eq!(node.id(), "b");
    }
}
