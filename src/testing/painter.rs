//! RecordingPainter: a headless [`Painter`] for tests.
//!
//! Every call is recorded as a [`DrawCall`]. User input is scripted ahead of a
//! frame: queue a click, an edit or a pick, then render; the first matching
//! widget drawn in that frame reports the input and the script entry is used
//! up.

use crate::geometry::{Rect, Size};
use crate::render::{PanelFrame, Painter};
use crate::style::Style;

// ---------------------------------------------------------------------------
// DrawCall
// ---------------------------------------------------------------------------

/// One recorded painter call, with the values it drew.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginPanel {
        title: String,
        size: Size,
        force_size: bool,
    },
    EndPanel,
    SameLine,
    BeginDisabled,
    EndDisabled,
    Text {
        rect: Rect,
        text: String,
    },
    InputText {
        rect: Rect,
        id: String,
        value: String,
    },
    InputFloat {
        rect: Rect,
        id: String,
        value: f32,
    },
    InputInt {
        rect: Rect,
        id: String,
        value: i32,
    },
    Checkbox {
        rect: Rect,
        label: String,
        value: bool,
    },
    RadioButton {
        rect: Rect,
        label: String,
        active: bool,
    },
    Button {
        rect: Rect,
        label: String,
    },
}

impl DrawCall {
    /// Box of a widget call; `None` for window and flow calls.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            DrawCall::Text { rect, .. }
            | DrawCall::InputText { rect, .. }
            | DrawCall::InputFloat { rect, .. }
            | DrawCall::InputInt { rect, .. }
            | DrawCall::Checkbox { rect, .. }
            | DrawCall::RadioButton { rect, .. }
            | DrawCall::Button { rect, .. } => Some(*rect),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Click(String),
    TypeText(String, String),
    SetFloat(String, f32),
    SetInt(String, i32),
    Toggle(String),
    Pick(String),
    Close(String),
}

// ---------------------------------------------------------------------------
// RecordingPainter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordingPainter {
    content_region: Size,
    collapsed: bool,
    calls: Vec<DrawCall>,
    pending: Vec<Input>,
}

impl RecordingPainter {
    /// A painter whose windows all offer `content_region` for content.
    pub fn new(content_region: Size) -> Self {
        Self {
            content_region,
            collapsed: false,
            calls: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn set_content_region(&mut self, size: Size) {
        self.content_region = size;
    }

    /// Collapsed windows report nothing to draw.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    // ── Recording ────────────────────────────────────────────────────

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Text of every label drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Box of the first widget call whose label, text or id is `name`.
    pub fn rect_of(&self, name: &str) -> Option<Rect> {
        self.calls.iter().find_map(|call| {
            let matches = match call {
                DrawCall::Text { text, .. } => text == name,
                DrawCall::InputText { id, .. }
                | DrawCall::InputFloat { id, .. }
                | DrawCall::InputInt { id, .. } => id == name,
                DrawCall::Checkbox { label, .. }
                | DrawCall::RadioButton { label, .. }
                | DrawCall::Button { label, .. } => label == name,
                _ => false,
            };
            if matches {
                call.rect()
            } else {
                None
            }
        })
    }

    // ── Scripting ────────────────────────────────────────────────────

    /// Click the next button labelled `label`.
    pub fn click(&mut self, label: impl Into<String>) {
        self.pending.push(Input::Click(label.into()));
    }

    /// Replace the contents of the next text input with `id`.
    pub fn type_text(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.pending.push(Input::TypeText(id.into(), value.into()));
    }

    pub fn set_float(&mut self, id: impl Into<String>, value: f32) {
        self.pending.push(Input::SetFloat(id.into(), value));
    }

    pub fn set_int(&mut self, id: impl Into<String>, value: i32) {
        self.pending.push(Input::SetInt(id.into(), value));
    }

    /// Flip the next checkbox labelled `label`.
    pub fn toggle(&mut self, label: impl Into<String>) {
        self.pending.push(Input::Toggle(label.into()));
    }

    /// Pick the next radio button labelled `label`.
    pub fn pick(&mut self, label: impl Into<String>) {
        self.pending.push(Input::Pick(label.into()));
    }

    /// Close the next window titled `title`.
    pub fn close(&mut self, title: impl Into<String>) {
        self.pending.push(Input::Close(title.into()));
    }

    /// Whether scripted input is still waiting for its widget.
    pub fn has_pending_input(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove and return the first pending input `select` accepts.
    fn consume<T>(&mut self, select: impl Fn(&Input) -> Option<T>) -> Option<T> {
        let (index, value) = self
            .pending
            .iter()
            .enumerate()
            .find_map(|(i, input)| select(input).map(|v| (i, v)))?;
        self.pending.remove(index);
        Some(value)
    }
}

impl Painter for RecordingPainter {
    fn begin_panel(&mut self, frame: &PanelFrame<'_>, open: &mut bool) -> bool {
        self.calls.push(DrawCall::BeginPanel {
            title: frame.title.to_owned(),
            size: frame.size,
            force_size: frame.force_size,
        });
        if self
            .consume(|input| matches!(input, Input::Close(t) if t == frame.title).then_some(()))
            .is_some()
        {
            *open = false;
        }
        !self.collapsed
    }

    fn end_panel(&mut self) {
        self.calls.push(DrawCall::EndPanel);
    }

    fn content_region(&self) -> Size {
        self.content_region
    }

    fn same_line(&mut self) {
        self.calls.push(DrawCall::SameLine);
    }

    fn begin_disabled(&mut self) {
        self.calls.push(DrawCall::BeginDisabled);
    }

    fn end_disabled(&mut self) {
        self.calls.push(DrawCall::EndDisabled);
    }

    fn text(&mut self, rect: Rect, text: &str, _style: &Style) {
        self.calls.push(DrawCall::Text {
            rect,
            text: text.to_owned(),
        });
    }

    fn input_text(&mut self, rect: Rect, id: &str, value: &mut String) -> bool {
        self.calls.push(DrawCall::InputText {
            rect,
            id: id.to_owned(),
            value: value.clone(),
        });
        match self.consume(|input| match input {
            Input::TypeText(target, text) if target == id => Some(text.clone()),
            _ => None,
        }) {
            Some(text) => {
                *value = text;
                true
            }
            None => false,
        }
    }

    fn input_float(&mut self, rect: Rect, id: &str, value: &mut f32) -> bool {
        self.calls.push(DrawCall::InputFloat {
            rect,
            id: id.to_owned(),
            value: *value,
        });
        match self.consume(|input| match input {
            Input::SetFloat(target, v) if target == id => Some(*v),
            _ => None,
        }) {
            Some(v) => {
                *value = v;
                true
            }
            None => false,
        }
    }

    fn input_int(&mut self, rect: Rect, id: &str, value: &mut i32) -> bool {
        self.calls.push(DrawCall::InputInt {
            rect,
            id: id.to_owned(),
            value: *value,
        });
        match self.consume(|input| match input {
            Input::SetInt(target, v) if target == id => Some(*v),
            _ => None,
        }) {
            Some(v) => {
                *value = v;
                true
            }
            None => false,
        }
    }

    fn checkbox(&mut self, rect: Rect, label: &str, value: &mut bool) -> bool {
        self.calls.push(DrawCall::Checkbox {
            rect,
            label: label.to_owned(),
            value: *value,
        });
        let toggled = self
            .consume(|input| matches!(input, Input::Toggle(l) if l == label).then_some(()))
            .is_some();
        if toggled {
            *value = !*value;
        }
        toggled
    }

    fn radio_button(&mut self, rect: Rect, label: &str, active: bool) -> bool {
        self.calls.push(DrawCall::RadioButton {
            rect,
            label: label.to_owned(),
            active,
        });
        self.consume(|input| matches!(input, Input::Pick(l) if l == label).then_some(()))
            .is_some()
    }

    fn button(&mut self, rect: Rect, label: &str, _style: &Style) -> bool {
        self.calls.push(DrawCall::Button {
            rect,
            label: label.to_owned(),
        });
        self.consume(|input| matches!(input, Input::Click(l) if l == label).then_some(()))
            .is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
