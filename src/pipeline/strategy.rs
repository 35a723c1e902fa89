//! Per-tag construction rules.
//!
//! Each recognised tag maps to one [`ElementKind`], which builds the bare node
//! for an element: the right [`NodeKind`], its text and its binding. Geometry
//! and style attributes are applied afterwards by [`super::attrs`].

use std::fmt;

use tracing::{debug, warn};

use crate::binding::{resolve_bind_key, BindError, BindTarget};
use crate::layout::LayoutContext;
use crate::markup::Element;
use crate::model::AppData;
use crate::node::{Node, NodeKind, Orientation};

use super::callbacks::CallbackRegistry;

/// Why an element produced no node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("unknown element `<{tag}>`")]
    UnknownTag { tag: String },

    #[error("unsupported input type `{input_type}`")]
    UnsupportedInputType { input_type: String },
}

/// The closed set of element tags the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Label,
    Input,
    Checkbox,
    Radio,
    Button,
    HLayout,
    VLayout,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Label,
        ElementKind::Input,
        ElementKind::Checkbox,
        ElementKind::Radio,
        ElementKind::Button,
        ElementKind::HLayout,
        ElementKind::VLayout,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Label => "label",
            ElementKind::Input => "input",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Radio => "radio",
            ElementKind::Button => "button",
            ElementKind::HLayout => Orientation::Horizontal.tag(),
            ElementKind::VLayout => Orientation::Vertical.tag(),
        }
    }

    /// Whether elements of this kind have their child elements built.
    pub fn is_container(self) -> bool {
        matches!(self, ElementKind::HLayout | ElementKind::VLayout)
    }

    /// Build the bare node for `element`.
    pub fn build(
        self,
        element: &Element,
        cx: &LayoutContext,
        data: &AppData,
        callbacks: &CallbackRegistry,
    ) -> Result<Node, BuildError> {
        let id = element.attr_or("id", "");
        let text = element.attr_or("text", "");

        let kind = match self {
            ElementKind::Label => NodeKind::label(text),

            ElementKind::Input => match element.attr_or("type", "text") {
                "text" => NodeKind::TextInput {
                    binding: bind(element, data, "text input", |target| match target {
                        BindTarget::Text(b) => Some(b),
                        _ => None,
                    }),
                },
                "number" => NodeKind::NumberInput {
                    binding: bind(element, data, "number input", |target| match target {
                        BindTarget::Number(b) => Some(b),
                        _ => None,
                    }),
                },
                other => {
                    return Err(BuildError::UnsupportedInputType {
                        input_type: other.to_owned(),
                    })
                }
            },

            ElementKind::Checkbox => NodeKind::Checkbox {
                text: text.to_owned(),
                binding: bind(element, data, "checkbox", |target| match target {
                    BindTarget::Flag(b) => Some(b),
                    _ => None,
                }),
            },

            ElementKind::Radio => NodeKind::RadioButton {
                text: text.to_owned(),
                group: element.attr_or("group", "").to_owned(),
                value: radio_value(element),
                selected: bind(element, data, "radio button", |target| match target {
                    BindTarget::Selection(b) => Some(b),
                    _ => None,
                }),
            },

            ElementKind::Button => NodeKind::Button {
                text: text.to_owned(),
                callback: callbacks.get(id).cloned(),
            },

            ElementKind::HLayout => NodeKind::container(Orientation::Horizontal),
            ElementKind::VLayout => NodeKind::container(Orientation::Vertical),
        };

        Ok(Node::new(cx, id, kind))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolve the element's `bind` attribute and keep it if `pick` accepts the
/// target. Failures are logged and leave the node unbound.
fn bind<T>(
    element: &Element,
    data: &AppData,
    widget: &'static str,
    pick: impl FnOnce(BindTarget) -> Option<T>,
) -> Option<T> {
    let key = element.attr("bind").filter(|key| !key.is_empty())?;
    let resolved = resolve_bind_key(key, data).and_then(|target| {
        pick(target).ok_or_else(|| BindError::WrongWidget {
            key: key.to_owned(),
            widget,
        })
    });
    match resolved {
        Ok(binding) => Some(binding),
        Err(err) if err.is_out_of_range() => {
            debug!(tag = %element.tag, %err, "binding skipped");
            None
        }
        Err(err) => {
            warn!(tag = %element.tag, %err, "binding skipped");
            None
        }
    }
}

fn radio_value(element: &Element) -> i32 {
    let raw = element.attr_or("value", "0");
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = raw, "radio value is not an integer, using 0");
        0
    })
}
