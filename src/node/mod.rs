//! Widget nodes: identity, geometry hints, style and a layout handle.
//!
//! A [`Node`] owns its [`LayoutHandle`], so the solver node lives exactly as
//! long as the widget node. Containers own their children and keep the solver
//! tree in sync on attach and removal; dropping a subtree releases every handle
//! in it.
//!
//! Layout is solved in two passes. [`Node::update_layout`] solves the subtree
//! rooted at the node, then re-solves each child against the box it was just
//! given, so every leaf knows its final width before it is drawn.

mod draw;
mod kind;

pub use kind::{Container, NodeKind, Orientation};

use std::fmt;

use tracing::debug;

use crate::geometry::{Point, Rect, Size};
use crate::layout::resolve::{self, resolve_dimension, resolve_flex};
use crate::layout::{LayoutContext, LayoutHandle};
use crate::model::AppData;
use crate::style::Style;

/// One element of a widget tree.
pub struct Node {
    id: String,
    width: Option<f32>,
    height: Option<f32>,
    flex: Option<f32>,
    style: Style,
    layout: LayoutHandle,
    origin: Point,
    kind: NodeKind,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("flex", &self.flex)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// Create a node of `kind` in `cx` with default style pushed.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a container that already holds children from a
    /// different layout context.
    pub fn new(cx: &LayoutContext, id: impl Into<String>, kind: NodeKind) -> Self {
        let node = Self {
            id: id.into(),
            width: None,
            height: None,
            flex: None,
            style: Style::default(),
            layout: cx.create(),
            origin: Point::ZERO,
            kind,
        };
        if let NodeKind::Container(c) = &node.kind {
            for child in &c.children {
                node.layout.append_child(&child.layout);
            }
        }
        node.setup_layout();
        node
    }

    pub fn label(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::label(text))
    }

    pub fn text_input(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::text_input())
    }

    pub fn number_input(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::number_input())
    }

    pub fn checkbox(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::checkbox(text))
    }

    pub fn radio_button(
        cx: &LayoutContext,
        id: impl Into<String>,
        text: impl Into<String>,
        group: impl Into<String>,
        value: i32,
    ) -> Self {
        Self::new(cx, id, NodeKind::radio_button(text, group, value))
    }

    pub fn button(cx: &LayoutContext, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::button(text))
    }

    pub fn hlayout(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::container(Orientation::Horizontal))
    }

    pub fn vlayout(cx: &LayoutContext, id: impl Into<String>) -> Self {
        Self::new(cx, id, NodeKind::container(Orientation::Vertical))
    }

    // -- identity and kind -------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn layout_context(&self) -> &LayoutContext {
        self.layout.context()
    }

    // -- geometry hints ----------------------------------------------------

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Set the explicit width and push it. `None` restores the engine default.
    pub fn set_width(&mut self, width: Option<f32>) {
        self.width = width;
        self.layout
            .update_style(|s| s.size.width = resolve_dimension(width));
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// Set the explicit height and push it. `None` restores the engine default.
    pub fn set_height(&mut self, height: Option<f32>) {
        self.height = height;
        self.layout
            .update_style(|s| s.size.height = resolve_dimension(height));
    }

    pub fn flex(&self) -> Option<f32> {
        self.flex
    }

    /// Set the flex factor and push it. `None` restores the engine default.
    pub fn set_flex(&mut self, flex: Option<f32>) {
        self.flex = flex;
        let (grow, shrink, basis) = resolve_flex(flex);
        self.layout.update_style(|s| {
            s.flex_grow = grow;
            s.flex_shrink = shrink;
            s.flex_basis = basis;
        });
    }

    // -- style -------------------------------------------------------------

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Mutable access to the style. Changes reach the solver on the next
    /// [`Node::apply_style`].
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Push the current style into the solver node.
    pub fn apply_style(&self) {
        let direction = self.orientation().map(Orientation::flex_direction);
        self.layout
            .update_style(|s| resolve::apply_style(s, &self.style, direction));
    }

    /// Push style and geometry hints into the solver node.
    pub fn setup_layout(&self) {
        let (grow, shrink, basis) = resolve_flex(self.flex);
        self.layout.update_style(|s| {
            s.size.width = resolve_dimension(self.width);
            s.size.height = resolve_dimension(self.height);
            s.flex_grow = grow;
            s.flex_shrink = shrink;
            s.flex_basis = basis;
        });
        self.apply_style();
    }

    /// The solver-side style, as last pushed.
    pub fn engine_style(&self) -> taffy::Style {
        self.layout.style()
    }

    // -- layout ------------------------------------------------------------

    /// Solve this subtree against the available size, then re-solve every
    /// child against its own computed box.
    ///
    /// `None` asks for the intrinsic size along that axis.
    pub fn update_layout(&mut self, available_width: Option<f32>, available_height: Option<f32>) {
        self.layout
            .compute(available_width, available_height, self.style.margin);

        let origin = self.origin;
        if let NodeKind::Container(c) = &mut self.kind {
            for child in &mut c.children {
                let size = child.layout.size();
                child.origin = origin + child.layout.location();
                child.update_layout(Some(size.width), Some(size.height));
            }
        }
    }

    /// Computed size from the last solve.
    pub fn computed_size(&self) -> Size {
        self.layout.size()
    }

    /// Computed box, relative to the root of the last solve.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.layout.size())
    }

    // -- tree --------------------------------------------------------------

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match &self.kind {
            NodeKind::Container(c) => Some(c.orientation()),
            _ => None,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Container(c) => c.children(),
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match &mut self.kind {
            NodeKind::Container(c) => c.children_mut(),
            _ => &mut [],
        }
    }

    /// Append `child` and register it with the solver.
    ///
    /// Leaves cannot hold children; the child is handed back.
    ///
    /// # Panics
    ///
    /// Panics if `child` was created in a different layout context.
    pub fn add_child(&mut self, child: Node) -> Result<(), Node> {
        match &mut self.kind {
            NodeKind::Container(c) => {
                self.layout.append_child(&child.layout);
                c.children.push(child);
                Ok(())
            }
            _ => Err(child),
        }
    }

    /// Detach the first direct child with `id`.
    pub fn remove_child(&mut self, id: &str) -> Option<Node> {
        let NodeKind::Container(c) = &mut self.kind else {
            return None;
        };
        let index = c.children.iter().position(|child| child.id == id)?;
        let child = c.children.remove(index);
        self.layout.remove_child(&child.layout);
        Some(child)
    }

    /// First direct child with `id`.
    pub fn find_child(&self, id: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.id == id)
    }

    /// First node with `id` in depth-first pre-order, including `self`.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Visit this node and every descendant in pre-order, with depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    // -- bindings ----------------------------------------------------------

    /// Re-attach every binding in this subtree to `data`'s current storage.
    ///
    /// Returns the number of bindings that could not be re-attached.
    pub fn rebind(&mut self, data: &AppData) -> usize {
        let reattached = match &mut self.kind {
            NodeKind::TextInput { binding: Some(b) } => b.rebind(data),
            NodeKind::NumberInput { binding: Some(b) } => b.rebind(data),
            NodeKind::Checkbox {
                binding: Some(b), ..
            } => b.rebind(data),
            NodeKind::RadioButton {
                selected: Some(b), ..
            } => b.rebind(data),
            NodeKind::Container(c) => {
                return c.children.iter_mut().map(|child| child.rebind(data)).sum();
            }
            _ => true,
        };
        if reattached {
            0
        } else {
            debug!(id = %self.id, "binding left dead after data model reset");
            1
        }
    }
}
