//! Geometry and style attributes shared by every element.

use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

use crate::markup::Element;
use crate::node::Node;
use crate::style::{parse_flag, Style};

/// Apply `width`, `height`, `flex` and the style attributes of `element` to
/// `node`, then push the final configuration into the solver.
pub fn apply_properties(node: &mut Node, element: &Element) {
    if let Some(width) = value::<f32>(element, "width") {
        node.set_width(Some(width));
    }
    if let Some(height) = value::<f32>(element, "height") {
        node.set_height(Some(height));
    }
    if let Some(flex) = value::<f32>(element, "flex") {
        node.set_flex(Some(flex));
    }

    apply_style_attributes(node.style_mut(), element);
    node.setup_layout();
}

/// Overwrite the fields of `style` named by `element`'s attributes.
///
/// Values that do not parse are logged and leave the field unchanged.
pub fn apply_style_attributes(style: &mut Style, element: &Element) {
    // Spacing
    set(&mut style.margin, value(element, "margin"));
    set(&mut style.padding, value(element, "padding"));
    set(&mut style.gap, value(element, "gap"));

    // Alignment
    set(&mut style.justify, value(element, "justify"));
    set(&mut style.align, value(element, "align"));
    set(&mut style.align_self, value(element, "align-self"));

    // Appearance
    set(&mut style.disabled, flag(element, "disabled"));
    set(&mut style.variant, value(element, "variant"));

    // Text
    set(&mut style.font_size, value(element, "font-size"));
    set(&mut style.bold, flag(element, "bold"));

    // Colors
    set(&mut style.text_color, value(element, "text-color"));
    set(&mut style.bg_color, value(element, "bg-color"));

    // Behaviour
    set(&mut style.stretch, flag(element, "stretch"));
    set(&mut style.wrap, flag(element, "wrap"));
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Parse attribute `name`. Absent, empty and unparsable values give `None`;
/// unparsable ones are logged.
fn value<T>(element: &Element, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = element.attr(name).filter(|raw| !raw.is_empty())?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(
                tag = %element.tag,
                id = element.attr_or("id", ""),
                attribute = name,
                %err,
                "attribute ignored"
            );
            None
        }
    }
}

fn flag(element: &Element, name: &str) -> Option<bool> {
    element
        .attr(name)
        .filter(|raw| !raw.is_empty())
        .map(parse_flag)
}
