//! A top-level window owning one widget tree.
//!
//! A [`Panel`] tracks its window size twice: the concrete size the painter
//! uses and a DPI-independent base size, so rescaling back and forth never
//! drifts. Layout is re-solved only when the content area actually changes.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::geometry::Size;
use crate::model::AppData;
use crate::node::Node;
use crate::render::{PanelFrame, RenderCx};

/// Default content-area tolerance before a re-solve, in layout units.
pub const DEFAULT_LAYOUT_TOLERANCE: f32 = 0.5;

pub struct Panel {
    title: String,
    size: Size,
    base_size: Size,
    dpi_scale: f32,
    open: bool,
    root: Option<Node>,
    last_layout_area: Option<Size>,
    last_layout_duration: Duration,
    size_dirty: bool,
    tolerance: f32,
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("dpi_scale", &self.dpi_scale)
            .field("open", &self.open)
            .field("root", &self.root.as_ref().map(Node::id))
            .finish_non_exhaustive()
    }
}

impl Panel {
    pub fn new(title: impl Into<String>, size: Size) -> Self {
        Self {
            title: title.into(),
            size,
            base_size: size,
            dpi_scale: 1.0,
            open: true,
            root: None,
            last_layout_area: None,
            last_layout_duration: Duration::ZERO,
            size_dirty: false,
            tolerance: DEFAULT_LAYOUT_TOLERANCE,
        }
    }

    /// Set how far the content area may move before layout is re-solved.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Install `root` (builder).
    pub fn with_root(mut self, root: Node) -> Self {
        self.set_root(root);
        self
    }

    // -- window state ------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Size at a DPI scale of 1.
    pub fn base_size(&self) -> Size {
        self.base_size
    }

    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Whether the painter will be told to force the window size next frame.
    pub fn size_dirty(&self) -> bool {
        self.size_dirty
    }

    pub fn set_width(&mut self, width: f32) {
        self.size.width = width;
        self.base_size.width = self.unscale(width);
        self.size_dirty = true;
    }

    pub fn set_height(&mut self, height: f32) {
        self.size.height = height;
        self.base_size.height = self.unscale(height);
        self.size_dirty = true;
    }

    fn unscale(&self, value: f32) -> f32 {
        if self.dpi_scale > 0.0 {
            value / self.dpi_scale
        } else {
            value
        }
    }

    /// Rescale the window from its base size and re-solve.
    ///
    /// Returns `false`, changing nothing, if `scale` is not positive.
    pub fn set_dpi_scale(&mut self, scale: f32) -> bool {
        if scale.is_nan() || scale <= 0.0 {
            return false;
        }
        self.dpi_scale = scale;
        self.size = self.base_size.scale(scale);
        self.last_layout_area = None;
        self.size_dirty = true;
        self.update_layout();
        true
    }

    /// Take over the DPI scale of the panel this one replaces.
    ///
    /// The window keeps whatever size it has on screen: a size change is only
    /// forced if one was still pending on `previous`.
    pub fn inherit_scale(&mut self, previous: &Panel) {
        if (previous.dpi_scale - self.dpi_scale).abs() > f32::EPSILON {
            self.set_dpi_scale(previous.dpi_scale);
        }
        self.size_dirty = previous.size_dirty;
    }

    // -- tree --------------------------------------------------------------

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    /// Replace the whole tree and solve it against the window size.
    pub fn set_root(&mut self, root: Node) {
        self.root = Some(root);
        self.last_layout_area = None;
        self.update_layout();
    }

    /// Detach the tree, leaving the panel empty.
    pub fn take_root(&mut self) -> Option<Node> {
        self.last_layout_area = None;
        self.root.take()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.root.as_ref()?.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.root.as_mut()?.find_mut(id)
    }

    /// Re-attach the tree's bindings after a data model reset.
    ///
    /// Returns the number of bindings left dead.
    pub fn rebind(&mut self, data: &AppData) -> usize {
        self.root.as_mut().map_or(0, |root| root.rebind(data))
    }

    // -- layout ------------------------------------------------------------

    pub fn last_layout_area(&self) -> Option<Size> {
        self.last_layout_area
    }

    pub fn last_layout_duration(&self) -> Duration {
        self.last_layout_duration
    }

    /// Solve the tree against the window size.
    pub fn update_layout(&mut self) {
        let size = self.size;
        if self.solve(Some(size.width), Some(size.height)) {
            self.last_layout_area = Some(size);
        }
    }

    /// Size the window to the tree's intrinsic size plus `padding` on each
    /// side, then re-solve. Dimensions the tree does not fill keep the
    /// current window size.
    pub fn fit_to_content(&mut self, padding: Size) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        root.update_layout(None, None);
        let mut content = root.computed_size();
        if content.width <= 0.0 {
            content.width = self.size.width;
        }
        if content.height <= 0.0 {
            content.height = self.size.height;
        }

        self.set_width(content.width + padding.width * 2.0);
        self.set_height(content.height + padding.height * 2.0);
        self.update_layout();
    }

    /// Time one solve of the tree. Returns `false` if there is no tree.
    fn solve(&mut self, width: Option<f32>, height: Option<f32>) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let start = Instant::now();
        root.update_layout(width, height);
        self.last_layout_duration = start.elapsed();
        debug!(
            panel = %self.title,
            nodes = root.subtree_len(),
            elapsed_us = self.last_layout_duration.as_micros() as u64,
            "layout solved"
        );
        true
    }

    // -- drawing -----------------------------------------------------------

    /// Draw the panel. Does nothing while closed.
    ///
    /// Layout is re-solved first if the painter's content area moved by more
    /// than the tolerance since the last solve.
    pub fn render(&mut self, cx: &mut RenderCx<'_>) {
        if !self.open {
            return;
        }

        let frame = PanelFrame {
            title: &self.title,
            size: self.size,
            force_size: self.size_dirty,
        };
        self.size_dirty = false;

        let visible = cx.painter.begin_panel(&frame, &mut self.open);
        if visible && self.root.is_some() {
            let area = cx.painter.content_region();
            let stale = self
                .last_layout_area
                .map_or(true, |last| !last.approx_eq(area, self.tolerance));
            if stale {
                self.last_layout_area = Some(area);
                self.solve(Some(area.width), Some(area.height));
            }
            if let Some(root) = &self.root {
                root.render(cx);
            }
        }
        cx.painter.end_panel();
    }
}
