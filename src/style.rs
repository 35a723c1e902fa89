//! Style attribute bag attached to every node.
//!
//! [`Style`] is plain data: spacing, alignment, typography hints, variant and
//! behaviour flags. It is always fully defined; [`Style::default`] carries the
//! documented defaults (gap 8, justify start, align stretch). Pushing a style
//! into the layout engine is the node's job, see [`crate::node::Node::apply_style`].

use std::fmt;
use std::str::FromStr;

/// Default gap between container children, in layout units.
pub const DEFAULT_GAP: f32 = 8.0;

/// Error returned when a markup value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value `{value}`")]
pub struct StyleValueError {
    pub kind: &'static str,
    pub value: String,
}

/// Generates a closed style enumeration with its markup spellings.
///
/// The first spelling of each variant is canonical (used by `Display`); the rest
/// are accepted aliases.
macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $( $variant:ident => [$canonical:literal $(, $alias:literal)*] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $canonical, "`")]
                $(#[doc = concat!(" (also `", $alias, "`)")])*
                $variant,
            )+
        }

        impl $name {
            /// The default variant.
            pub const DEFAULT: $name = $name::$default;

            /// Canonical markup spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $canonical, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = StyleValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $canonical $(| $alias)* => Ok($name::$variant), )+
                    other => Err(StyleValueError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }
    };
}

style_enum! {
    /// Main-axis distribution of a container's children.
    Justify, "justify", default = Start {
        Start => ["flex-start", "start"],
        Center => ["center"],
        End => ["flex-end", "end"],
        SpaceBetween => ["space-between"],
        SpaceAround => ["space-around"],
        SpaceEvenly => ["space-evenly"],
    }
}

style_enum! {
    /// Cross-axis alignment of a container's children.
    Align, "align", default = Stretch {
        Start => ["flex-start", "start"],
        Center => ["center"],
        End => ["flex-end", "end"],
        Stretch => ["stretch"],
        Baseline => ["baseline"],
    }
}

style_enum! {
    /// Per-item override of the parent's cross-axis alignment.
    AlignSelf, "align-self", default = Auto {
        Auto => ["auto"],
        Start => ["flex-start", "start"],
        Center => ["center"],
        End => ["flex-end", "end"],
        Stretch => ["stretch"],
        Baseline => ["baseline"],
    }
}

style_enum! {
    /// Font size class.
    FontSize, "font-size", default = Default {
        Small => ["small"],
        Default => ["default", "normal"],
        Large => ["large"],
    }
}

style_enum! {
    /// Visual variant, used by buttons.
    Variant, "variant", default = Default {
        Default => ["default"],
        Primary => ["primary"],
        Danger => ["danger"],
    }
}

style_enum! {
    /// Named text or background color.
    NamedColor, "color", default = Default {
        Default => ["default"],
        Red => ["red"],
        Green => ["green"],
        Blue => ["blue"],
        Yellow => ["yellow"],
        Gray => ["gray", "grey"],
        White => ["white"],
        Black => ["black"],
    }
}

impl FontSize {
    /// Font scale factor relative to the painter's base font.
    pub fn scale(self) -> f32 {
        match self {
            FontSize::Small => 0.8,
            FontSize::Default => 1.0,
            FontSize::Large => 1.2,
        }
    }
}

impl NamedColor {
    /// RGBA components, or `None` for the painter's theme color.
    pub fn rgba(self) -> Option<[f32; 4]> {
        match self {
            NamedColor::Default => None,
            NamedColor::Red => Some([1.0, 0.0, 0.0, 1.0]),
            NamedColor::Green => Some([0.0, 1.0, 0.0, 1.0]),
            NamedColor::Blue => Some([0.0, 0.0, 1.0, 1.0]),
            NamedColor::Yellow => Some([1.0, 1.0, 0.0, 1.0]),
            NamedColor::Gray => Some([0.5, 0.5, 0.5, 1.0]),
            NamedColor::White => Some([1.0, 1.0, 1.0, 1.0]),
            NamedColor::Black => Some([0.0, 0.0, 0.0, 1.0]),
        }
    }
}

/// Parse a markup boolean: `"true"` and `"1"` are true, anything else false.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// The full attribute bag for a node. Every field always has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    // Spacing
    pub margin: f32,
    pub padding: f32,
    pub gap: f32,

    // Alignment
    pub justify: Justify,
    pub align: Align,
    pub align_self: AlignSelf,

    // Text
    pub font_size: FontSize,
    pub bold: bool,

    // Colors
    pub text_color: NamedColor,
    pub bg_color: NamedColor,

    // Appearance
    pub variant: Variant,
    pub disabled: bool,

    // Behaviour
    pub stretch: bool,
    pub wrap: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margin: 0.0,
            padding: 0.0,
            gap: DEFAULT_GAP,
            justify: Justify::DEFAULT,
            align: Align::DEFAULT,
            align_self: AlignSelf::DEFAULT,
            font_size: FontSize::DEFAULT,
            bold: false,
            text_color: NamedColor::DEFAULT,
            bg_color: NamedColor::DEFAULT,
            variant: Variant::DEFAULT,
            disabled: false,
            stretch: false,
            wrap: false,
        }
    }
}

impl Style {
    /// Create a style with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_documented_values() {
        let s = Style::new();
        assert_eq!(s.margin, 0.0);
        assert_eq!(s.padding, 0.0);
        assert_eq!(s.gap, 8.0);
        assert_eq!(s.justify, Justify::Start);
        assert_eq!(s.align, Align::Stretch);
        assert_eq!(s.align_self, AlignSelf::Auto);
        assert_eq!(s.font_size, FontSize::Default);
        assert_eq!(s.variant, Variant::Default);
        assert_eq!(s.text_color, NamedColor::Default);
        assert!(!s.bold && !s.disabled && !s.stretch && !s.wrap);
    }

    #[test]
    fn justify_accepts_flex_and_short_spellings() {
        assert_eq!("flex-start".parse::<Justify>(), Ok(Justify::Start));
        assert_eq!("start".parse::<Justify>(), Ok(Justify::Start));
        assert_eq!("flex-end".parse::<Justify>(), Ok(Justify::End));
        assert_eq!("space-evenly".parse::<Justify>(), Ok(Justify::SpaceEvenly));
    }

    #[test]
    fn unknown_value_reports_kind() {
        let err = "diagonal".parse::<Justify>().unwrap_err();
        assert_eq!(err.kind, "justify");
        assert_eq!(err.value, "diagonal");
        assert_eq!(err.to_string(), "invalid justify value `diagonal`");
    }

    #[test]
    fn align_self_includes_auto() {
        assert_eq!("auto".parse::<AlignSelf>(), Ok(AlignSelf::Auto));
        assert!("auto".parse::<Align>().is_err());
    }

    #[test]
    fn display_is_canonical_spelling() {
        assert_eq!(Justify::Start.to_string(), "flex-start");
        assert_eq!(Align::Baseline.to_string(), "baseline");
        assert_eq!(NamedColor::Gray.to_string(), "gray");
        assert_eq!("grey".parse::<NamedColor>(), Ok(NamedColor::Gray));
    }

    #[test]
    fn font_scale() {
        assert_eq!(FontSize::Small.scale(), 0.8);
        assert_eq!(FontSize::Default.scale(), 1.0);
        assert_eq!(FontSize::Large.scale(), 1.2);
    }

    #[test]
    fn color_rgba() {
        assert_eq!(NamedColor::Default.rgba(), None);
        assert_eq!(NamedColor::Red.rgba(), Some([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("TRUE"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }
}
