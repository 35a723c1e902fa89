//! Per-kind drawing through the [`Painter`](crate::render::Painter).

use crate::binding::NumberBinding;
use crate::geometry::Rect;
use crate::render::RenderCx;

use super::{Node, NodeKind, Orientation};

/// Width a button gets when the solver gave it none.
const BUTTON_FALLBACK_WIDTH: f32 = 80.0;

impl Node {
    /// Draw this subtree.
    ///
    /// Reads each node's computed box from the last solve. Edits made by the
    /// user are written back through live bindings; button clicks are queued
    /// on `cx`.
    pub fn render(&self, cx: &mut RenderCx<'_>) {
        if let NodeKind::Container(c) = &self.kind {
            for (i, child) in c.children().iter().enumerate() {
                if i > 0 && c.orientation() == Orientation::Horizontal {
                    cx.painter.same_line();
                }
                child.render(cx);
            }
            return;
        }

        if !self.kind.draws(cx.data) {
            return;
        }
        let rect = self.bounds();
        let disabled = self.style.disabled;
        if disabled {
            cx.painter.begin_disabled();
        }
        self.draw_leaf(rect, cx);
        if disabled {
            cx.painter.end_disabled();
        }
    }

    fn draw_leaf(&self, rect: Rect, cx: &mut RenderCx<'_>) {
        match &self.kind {
            NodeKind::Label { text } => cx.painter.text(rect, text, &self.style),

            NodeKind::TextInput { binding } => {
                let Some(b) = binding else { return };
                let Some(mut value) = b.get(cx.data) else {
                    return;
                };
                if cx.painter.input_text(rect, &self.id, &mut value) {
                    b.set(cx.data, value);
                }
            }

            NodeKind::NumberInput { binding } => match binding {
                Some(NumberBinding::Float(b)) => {
                    let Some(mut value) = b.get(cx.data) else {
                        return;
                    };
                    if cx.painter.input_float(rect, &self.id, &mut value) {
                        b.set(cx.data, value);
                    }
                }
                Some(NumberBinding::Int(b)) => {
                    let Some(mut value) = b.get(cx.data) else {
                        return;
                    };
                    if cx.painter.input_int(rect, &self.id, &mut value) {
                        b.set(cx.data, value);
                    }
                }
                None => {}
            },

            NodeKind::Checkbox { text, binding } => {
                let Some(b) = binding else { return };
                let Some(mut value) = b.get(cx.data) else {
                    return;
                };
                if cx.painter.checkbox(rect, text, &mut value) {
                    b.set(cx.data, value);
                }
            }

            NodeKind::RadioButton {
                text,
                value,
                selected,
                ..
            } => {
                let Some(b) = selected else { return };
                let Some(current) = b.get(cx.data) else {
                    return;
                };
                if cx.painter.radio_button(rect, text, current == *value) {
                    b.set(cx.data, *value);
                }
            }

            NodeKind::Button { text, callback } => {
                let mut rect = rect;
                if rect.width <= 0.0 {
                    rect.width = BUTTON_FALLBACK_WIDTH;
                }
                if cx.painter.button(rect, text, &self.style) {
                    if let Some(callback) = callback {
                        cx.queue_click(callback.clone());
                    }
                }
            }

            NodeKind::Container(_) => {}
        }
    }
}
