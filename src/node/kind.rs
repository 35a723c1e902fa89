//! The closed set of node kinds.

use std::fmt;

use taffy::style::FlexDirection;

use crate::binding::{Binding, FlagField, IntField, NumberBinding, TextField};
use crate::model::AppData;
use crate::render::Callback;

use super::Node;

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub(crate) fn flex_direction(self) -> FlexDirection {
        match self {
            Orientation::Horizontal => FlexDirection::Row,
            Orientation::Vertical => FlexDirection::Column,
        }
    }

    /// Markup tag for a container of this orientation.
    pub fn tag(self) -> &'static str {
        match self {
            Orientation::Horizontal => "hlayout",
            Orientation::Vertical => "vlayout",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// Ordered, owned children laid out along one axis.
///
/// Children can only be attached or detached through [`Node`] so that the
/// solver tree always mirrors this list.
pub struct Container {
    orientation: Orientation,
    pub(super) children: Vec<Node>,
}

impl Container {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            children: Vec::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }
}

/// What a node is and what it draws.
pub enum NodeKind {
    Label {
        text: String,
    },
    TextInput {
        binding: Option<Binding<TextField>>,
    },
    NumberInput {
        binding: Option<NumberBinding>,
    },
    Checkbox {
        text: String,
        binding: Option<Binding<FlagField>>,
    },
    RadioButton {
        text: String,
        group: String,
        value: i32,
        selected: Option<Binding<IntField>>,
    },
    Button {
        text: String,
        callback: Option<Callback>,
    },
    Container(Container),
}

impl NodeKind {
    pub fn label(text: impl Into<String>) -> Self {
        NodeKind::Label { text: text.into() }
    }

    pub fn text_input() -> Self {
        NodeKind::TextInput { binding: None }
    }

    pub fn number_input() -> Self {
        NodeKind::NumberInput { binding: None }
    }

    pub fn checkbox(text: impl Into<String>) -> Self {
        NodeKind::Checkbox {
            text: text.into(),
            binding: None,
        }
    }

    pub fn radio_button(text: impl Into<String>, group: impl Into<String>, value: i32) -> Self {
        NodeKind::RadioButton {
            text: text.into(),
            group: group.into(),
            value,
            selected: None,
        }
    }

    pub fn button(text: impl Into<String>) -> Self {
        NodeKind::Button {
            text: text.into(),
            callback: None,
        }
    }

    pub fn container(orientation: Orientation) -> Self {
        NodeKind::Container(Container::new(orientation))
    }

    /// Short name, matching the markup tag where one exists.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Label { .. } => "label",
            NodeKind::TextInput { .. } => "text input",
            NodeKind::NumberInput { .. } => "number input",
            NodeKind::Checkbox { .. } => "checkbox",
            NodeKind::RadioButton { .. } => "radio",
            NodeKind::Button { .. } => "button",
            NodeKind::Container(c) => c.orientation.tag(),
        }
    }

    /// Display text of labels, checkboxes, radio buttons and buttons.
    pub fn text(&self) -> Option<&str> {
        match self {
            NodeKind::Label { text }
            | NodeKind::Checkbox { text, .. }
            | NodeKind::RadioButton { text, .. }
            | NodeKind::Button { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Replace the display text. Returns `false` for kinds without text.
    pub fn set_text(&mut self, value: impl Into<String>) -> bool {
        match self {
            NodeKind::Label { text }
            | NodeKind::Checkbox { text, .. }
            | NodeKind::RadioButton { text, .. }
            | NodeKind::Button { text, .. } => {
                *text = value.into();
                true
            }
            _ => false,
        }
    }

    /// Whether a data binding is attached (always `false` for unbindable kinds).
    pub fn is_bound(&self) -> bool {
        match self {
            NodeKind::TextInput { binding } => binding.is_some(),
            NodeKind::NumberInput { binding } => binding.is_some(),
            NodeKind::Checkbox { binding, .. } => binding.is_some(),
            NodeKind::RadioButton { selected, .. } => selected.is_some(),
            _ => false,
        }
    }

    /// Whether this kind produces a draw call against `data`. Inputs whose
    /// binding is missing or dead draw nothing.
    pub fn draws(&self, data: &AppData) -> bool {
        match self {
            NodeKind::TextInput { binding } => binding.is_some_and(|b| b.is_live(data)),
            NodeKind::NumberInput { binding } => binding.is_some_and(|b| b.is_live(data)),
            NodeKind::Checkbox { binding, .. } => binding.is_some_and(|b| b.is_live(data)),
            NodeKind::RadioButton { selected, .. } => selected.is_some_and(|b| b.is_live(data)),
            NodeKind::Label { .. } | NodeKind::Button { .. } => true,
            NodeKind::Container(_) => false,
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Label { text } => f.debug_struct("Label").field("text", text).finish(),
            NodeKind::TextInput { binding } => f
                .debug_struct("TextInput")
                .field("binding", binding)
                .finish(),
            NodeKind::NumberInput { binding } => f
                .debug_struct("NumberInput")
                .field("binding", binding)
                .finish(),
            NodeKind::Checkbox { text, binding } => f
                .debug_struct("Checkbox")
                .field("text", text)
                .field("binding", binding)
                .finish(),
            NodeKind::RadioButton {
                text,
                group,
                value,
                selected,
            } => f
                .debug_struct("RadioButton")
                .field("text", text)
                .field("group", group)
                .field("value", value)
                .field("selected", selected)
                .finish(),
            NodeKind::Button { text, callback } => f
                .debug_struct("Button")
                .field("text", text)
                .field("callback", &callback.is_some())
                .finish(),
            NodeKind::Container(c) => f
                .debug_struct("Container")
                .field("orientation", &c.orientation)
                .field("children", &c.children)
                .finish(),
        }
    }
}
