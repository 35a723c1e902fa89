//! Style -> taffy Style conversion.
//!
//! Maps panelkit's [`Style`] and geometry hints onto taffy's node-level
//! configuration ([`taffy::Style`]). Alignment enums map 1:1 onto the engine's
//! flexbox concepts.

use taffy::geometry::Rect;
use taffy::prelude::{FromLength, TaffyAuto};
use taffy::style::{
    self as engine, Dimension, Display, FlexDirection, FlexWrap, LengthPercentage,
    LengthPercentageAuto,
};

use crate::style::{Align, AlignSelf, Justify, Style};

/// Convert an optional explicit size into a [`Dimension`].
///
/// Unset sizes map to `auto`, the engine's own default.
pub fn resolve_dimension(value: Option<f32>) -> Dimension {
    match value {
        Some(v) => Dimension::from_length(v),
        None => Dimension::AUTO,
    }
}

/// Flex factor broken down into engine terms: `(grow, shrink, basis)`.
///
/// - `Some(f)` with `f > 0` -> grow `f`, shrink 1, basis 0
/// - `Some(f)` with `f <= 0` -> grow 0, shrink `-f`, basis auto
/// - `None` -> the engine defaults: grow 0, shrink 1, basis auto
pub fn resolve_flex(flex: Option<f32>) -> (f32, f32, Dimension) {
    match flex {
        Some(f) if f > 0.0 => (f, 1.0, Dimension::from_length(0.0)),
        Some(f) => (0.0, -f, Dimension::AUTO),
        None => (0.0, 1.0, Dimension::AUTO),
    }
}

pub fn resolve_justify(justify: Justify) -> engine::JustifyContent {
    match justify {
        Justify::Start => engine::JustifyContent::FlexStart,
        Justify::Center => engine::JustifyContent::Center,
        Justify::End => engine::JustifyContent::FlexEnd,
        Justify::SpaceBetween => engine::JustifyContent::SpaceBetween,
        Justify::SpaceAround => engine::JustifyContent::SpaceAround,
        Justify::SpaceEvenly => engine::JustifyContent::SpaceEvenly,
    }
}

pub fn resolve_align(align: Align) -> engine::AlignItems {
    match align {
        Align::Start => engine::AlignItems::FlexStart,
        Align::Center => engine::AlignItems::Center,
        Align::End => engine::AlignItems::FlexEnd,
        Align::Stretch => engine::AlignItems::Stretch,
        Align::Baseline => engine::AlignItems::Baseline,
    }
}

/// Per-item alignment. `auto` defers to the parent unless `stretch` is set.
pub fn resolve_align_self(align_self: AlignSelf, stretch: bool) -> Option<engine::AlignSelf> {
    match align_self {
        AlignSelf::Auto if stretch => Some(engine::AlignSelf::Stretch),
        AlignSelf::Auto => None,
        AlignSelf::Start => Some(engine::AlignSelf::FlexStart),
        AlignSelf::Center => Some(engine::AlignSelf::Center),
        AlignSelf::End => Some(engine::AlignSelf::FlexEnd),
        AlignSelf::Stretch => Some(engine::AlignSelf::Stretch),
        AlignSelf::Baseline => Some(engine::AlignSelf::Baseline),
    }
}

/// Push `style` into an engine style.
///
/// `direction` is `Some` for containers; leaves keep the engine's direction.
/// Width, height and flex are not touched here; they are pushed by their own
/// setters so that unset values never overwrite engine defaults.
pub fn apply_style(target: &mut taffy::Style, style: &Style, direction: Option<FlexDirection>) {
    target.display = Display::Flex;
    if let Some(direction) = direction {
        target.flex_direction = direction;
    }

    target.margin = Rect {
        left: LengthPercentageAuto::from_length(style.margin),
        right: LengthPercentageAuto::from_length(style.margin),
        top: LengthPercentageAuto::from_length(style.margin),
        bottom: LengthPercentageAuto::from_length(style.margin),
    };
    target.padding = Rect {
        left: LengthPercentage::from_length(style.padding),
        right: LengthPercentage::from_length(style.padding),
        top: LengthPercentage::from_length(style.padding),
        bottom: LengthPercentage::from_length(style.padding),
    };
    target.gap = taffy::geometry::Size {
        width: LengthPercentage::from_length(style.gap),
        height: LengthPercentage::from_length(style.gap),
    };

    target.justify_content = Some(resolve_justify(style.justify));
    target.align_items = Some(resolve_align(style.align));
    target.align_self = resolve_align_self(style.align_self, style.stretch);
    target.flex_wrap = if style.wrap {
        FlexWrap::Wrap
    } else {
        FlexWrap::NoWrap
    };
}
