//! TaffyTree wrapper shared by every node of a widget tree.
//!
//! [`LayoutContext`] owns the solver tree; it is cheap to clone and is handed to
//! every node at construction time. [`LayoutHandle`] is one node's entry in that
//! tree. Its lifetime is exactly the owning widget node's lifetime: the solver
//! node is created in [`LayoutContext::create`] and released on drop.

use std::cell::RefCell;
use std::rc::Rc;

use taffy::prelude::*;

use crate::geometry::{Point, Size as BoxSize};

/// Shared handle to one constraint-solver tree.
///
/// `Rc`-based on purpose: widget trees are single-threaded.
#[derive(Clone, Default)]
pub struct LayoutContext {
    tree: Rc<RefCell<TaffyTree<()>>>,
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl LayoutContext {
    /// Create a new, empty layout context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a solver node with the engine's default style.
    pub(crate) fn create(&self) -> LayoutHandle {
        let id = self
            .tree
            .borrow_mut()
            .new_leaf(Style::default())
            .expect("taffy node creation should not fail");
        LayoutHandle {
            cx: self.clone(),
            id,
        }
    }

    /// Number of live solver nodes in this context.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().total_node_count()
    }

    /// Whether two contexts share the same solver tree.
    pub fn same_as(&self, other: &LayoutContext) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }
}

/// Available space for one solve. `None` asks for the intrinsic size.
fn available(value: Option<f32>) -> AvailableSpace {
    match value {
        Some(v) => AvailableSpace::Definite(v),
        None => AvailableSpace::MaxContent,
    }
}

/// One node's entry in a [`LayoutContext`]. Released when dropped.
pub struct LayoutHandle {
    cx: LayoutContext,
    id: NodeId,
}

impl std::fmt::Debug for LayoutHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LayoutHandle").field(&self.id).finish()
    }
}

impl LayoutHandle {
    /// The context this handle lives in.
    pub fn context(&self) -> &LayoutContext {
        &self.cx
    }

    /// A copy of the engine-side style currently configured for this node.
    pub fn style(&self) -> Style {
        self.cx
            .tree
            .borrow()
            .style(self.id)
            .cloned()
            .unwrap_or_default()
    }

    /// Modify the engine-side style in place.
    pub fn update_style(&self, f: impl FnOnce(&mut Style)) {
        let mut tree = self.cx.tree.borrow_mut();
        let mut style = tree.style(self.id).cloned().unwrap_or_default();
        f(&mut style);
        let _ = tree.set_style(self.id, style);
    }

    /// Register `child` as the last solver child of this node, detaching it from
    /// any previous solver parent.
    ///
    /// # Panics
    ///
    /// Panics if `child` belongs to a different [`LayoutContext`].
    pub fn append_child(&self, child: &LayoutHandle) {
        assert!(
            self.cx.same_as(&child.cx),
            "cannot attach a node created in a different layout context"
        );
        let mut tree = self.cx.tree.borrow_mut();
        if let Some(previous) = tree.parent(child.id) {
            let _ = tree.remove_child(previous, child.id);
        }
        let _ = tree.add_child(self.id, child.id);
    }

    /// Deregister `child` from this node's solver children.
    pub fn remove_child(&self, child: &LayoutHandle) {
        let _ = self.cx.tree.borrow_mut().remove_child(self.id, child.id);
    }

    /// Number of solver children registered under this node.
    pub fn child_count(&self) -> usize {
        self.cx.tree.borrow().child_count(self.id)
    }

    /// Solve the subtree rooted at this node.
    ///
    /// An unset width or height with a definite available size resolves to the
    /// available size minus `margin` on both sides, the same rule a root node
    /// gets in a Yoga-style engine. `None` sizes solve for the intrinsic size.
    pub fn compute(
        &self,
        available_width: Option<f32>,
        available_height: Option<f32>,
        margin: f32,
    ) {
        let mut tree = self.cx.tree.borrow_mut();
        let Ok(original) = tree.style(self.id).cloned() else {
            return;
        };

        let mut solve_style = original.clone();
        if let Some(w) = available_width {
            if original.size.width == Dimension::AUTO {
                solve_style.size.width = Dimension::from_length((w - 2.0 * margin).max(0.0));
            }
        }
        if let Some(h) = available_height {
            if original.size.height == Dimension::AUTO {
                solve_style.size.height = Dimension::from_length((h - 2.0 * margin).max(0.0));
            }
        }
        let _ = tree.set_style(self.id, solve_style);

        // Layouts cached below this node may come from earlier per-child solves
        // that reset child locations, so the whole subtree is solved again.
        mark_subtree_dirty(&mut tree, self.id);

        let _ = tree.compute_layout(
            self.id,
            taffy::geometry::Size {
                width: available(available_width),
                height: available(available_height),
            },
        );
        let _ = tree.set_style(self.id, original);
    }

    /// Computed size of this node from the most recent solve that covered it.
    pub fn size(&self) -> BoxSize {
        match self.cx.tree.borrow().layout(self.id) {
            Ok(layout) => BoxSize::new(layout.size.width, layout.size.height),
            Err(_) => BoxSize::ZERO,
        }
    }

    /// Computed position of this node relative to its solver parent.
    pub fn location(&self) -> Point {
        match self.cx.tree.borrow().layout(self.id) {
            Ok(layout) => Point::new(layout.location.x, layout.location.y),
            Err(_) => Point::ZERO,
        }
    }
}

impl Drop for LayoutHandle {
    fn drop(&mut self) {
        if let Ok(mut tree) = self.cx.tree.try_borrow_mut() {
            let _ = tree.remove(self.id);
        }
    }
}

fn mark_subtree_dirty(tree: &mut TaffyTree<()>, id: NodeId) {
    let _ = tree.mark_dirty(id);
    let children = tree.children(id).unwrap_or_default();
    for child in children {
        mark_subtree_dirty(tree, child);
    }
}
