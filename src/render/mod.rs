//! Drawing interface: the immediate-mode painter and per-frame render context.
//!
//! panelkit does not paint pixels. A [`Painter`] wraps whatever immediate-mode
//! library the application uses; nodes hand it their computed boxes and bound
//! values every frame. Widgets that report input write back through their
//! bindings; button clicks are queued on the [`RenderCx`] and run by the caller
//! once the render pass is over.

use std::rc::Rc;

use crate::geometry::{Rect, Size};
use crate::model::AppData;
use crate::style::Style;

/// Zero-argument button callback.
pub type Callback = Rc<dyn Fn()>;

/// Window parameters for [`Painter::begin_panel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame<'a> {
    pub title: &'a str,
    pub size: Size,
    /// The painter must apply `size` even if the user resized the window.
    pub force_size: bool,
}

/// An immediate-mode drawing library.
///
/// Input-capable calls take the current value by `&mut` and return `true` when
/// the user changed it this frame.
pub trait Painter {
    /// Begin a window. Returns `false` if it is collapsed and nothing should be
    /// drawn; `end_panel` is called either way. Closing the window clears `open`.
    fn begin_panel(&mut self, frame: &PanelFrame<'_>, open: &mut bool) -> bool;
    fn end_panel(&mut self);

    /// Area available for content inside the current window.
    fn content_region(&self) -> Size;

    /// Place the next item on the same line as the previous one.
    fn same_line(&mut self);

    fn begin_disabled(&mut self);
    fn end_disabled(&mut self);

    fn text(&mut self, rect: Rect, text: &str, style: &Style);
    fn input_text(&mut self, rect: Rect, id: &str, value: &mut String) -> bool;
    fn input_float(&mut self, rect: Rect, id: &str, value: &mut f32) -> bool;
    fn input_int(&mut self, rect: Rect, id: &str, value: &mut i32) -> bool;
    fn checkbox(&mut self, rect: Rect, label: &str, value: &mut bool) -> bool;
    /// Returns `true` when the button was picked this frame.
    fn radio_button(&mut self, rect: Rect, label: &str, active: bool) -> bool;
    /// Returns `true` when the button was clicked this frame.
    fn button(&mut self, rect: Rect, label: &str, style: &Style) -> bool;
}

/// Everything a node needs while drawing.
pub struct RenderCx<'a> {
    pub painter: &'a mut dyn Painter,
    pub data: &'a mut AppData,
    clicked: Vec<Callback>,
}

impl<'a> RenderCx<'a> {
    pub fn new(painter: &'a mut dyn Painter, data: &'a mut AppData) -> Self {
        Self {
            painter,
            data,
            clicked: Vec::new(),
        }
    }

    /// Queue a callback to run after the render pass.
    pub fn queue_click(&mut self, callback: Callback) {
        self.clicked.push(callback);
    }

    /// Callbacks queued so far, in click order.
    pub fn take_clicked(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.clicked)
    }
}

/// Run queued callbacks in order.
pub fn run_callbacks(callbacks: &[Callback]) {
    for callback in callbacks {
        callback();
    }
}
