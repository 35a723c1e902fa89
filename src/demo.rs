//! The city data grid, built in code with the fluent builder.
//!
//! The markup pipeline and the builder produce the same kind of tree; this
//! panel is the builder's showcase. One row per city holds a name input, four
//! numeric inputs and a column of climate radios, all bound to
//! [`AppData::cities`].

use tracing::debug;

use crate::binding::{FloatField, IntField, TextField};
use crate::builder::{
    ButtonBuilder, HLayoutBuilder, LabelBuilder, NumberInputBuilder, RadioButtonBuilder,
    TextInputBuilder, VLayoutBuilder,
};
use crate::geometry::Size;
use crate::layout::LayoutContext;
use crate::model::{AppData, ClimateZone};
use crate::node::Node;
use crate::panel::Panel;
use crate::render::Callback;
use crate::style::{Align, FontSize, Justify, Variant};

pub const CITY_PANEL_TITLE: &str = "City Data Grid";
pub const CITY_PANEL_SIZE: Size = Size::new(900.0, 600.0);
pub const DEFAULT_MAX_ROWS: usize = 6;

/// Scales the DPI toggle button steps through.
pub const DPI_SCALES: [f32; 3] = [1.0, 1.5, 2.0];

/// The scale after `current` in [`DPI_SCALES`], wrapping around. A scale not
/// in the list steps back to the first.
pub fn next_dpi_scale(current: f32) -> f32 {
    DPI_SCALES
        .iter()
        .position(|&s| (s - current).abs() < f32::EPSILON)
        .map_or(DPI_SCALES[0], |i| DPI_SCALES[(i + 1) % DPI_SCALES.len()])
}

/// Column headers, with the flex weight of their column.
const HEADERS: [(&str, &str, f32); 6] = [
    ("header_city", "City", 2.0),
    ("header_lat", "Latitude", 1.0),
    ("header_lon", "Longitude", 1.0),
    ("header_elev", "Elevation (m)", 1.0),
    ("header_temp", "Avg Temp (°C)", 1.0),
    ("header_climate", "Climate", 1.0),
];

pub struct CityPanelBuilder<'a> {
    cx: &'a LayoutContext,
    data: &'a mut AppData,
    title: String,
    size: Size,
    max_rows: usize,
    on_save: Option<Callback>,
    on_reset: Option<Callback>,
    on_toggle_dpi: Option<Callback>,
}

impl<'a> CityPanelBuilder<'a> {
    pub fn new(cx: &'a LayoutContext, data: &'a mut AppData) -> Self {
        Self {
            cx,
            data,
            title: CITY_PANEL_TITLE.to_owned(),
            size: CITY_PANEL_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
            on_save: None,
            on_reset: None,
            on_toggle_dpi: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Number of city rows to show.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn on_save(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_save = Some(std::rc::Rc::new(callback));
        self
    }

    pub fn on_reset(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_reset = Some(std::rc::Rc::new(callback));
        self
    }

    pub fn on_toggle_dpi(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_toggle_dpi = Some(std::rc::Rc::new(callback));
        self
    }

    /// Build the panel.
    ///
    /// Pads [`AppData::cities`] with default rows up to the row count first,
    /// so every row binds; growing the collection counts as a data reset.
    pub fn build(self) -> Panel {
        self.data.ensure_cities(self.max_rows);
        let rows = self.max_rows.min(self.data.cities.len());
        debug!(rows, "building city panel");

        let data = &*self.data;
        let root = VLayoutBuilder::new(self.cx, "main_layout")
            .padding(10.0)
            .gap(15.0)
            .add_child(header_row(self.cx))
            .add_children((0..rows).map(|i| city_row(self.cx, data, i)))
            .add_child(button_row(
                self.cx,
                self.on_toggle_dpi,
                self.on_save,
                self.on_reset,
            ))
            .build();

        Panel::new(self.title, self.size).with_root(root)
    }
}

fn row(cx: &LayoutContext, id: impl Into<String>) -> HLayoutBuilder {
    HLayoutBuilder::new(cx, id)
        .justify(Justify::SpaceBetween)
        .align(Align::Center)
        .gap(10.0)
}

fn header_row(cx: &LayoutContext) -> Node {
    row(cx, "header_row")
        .add_children(HEADERS.iter().map(|&(id, text, flex)| {
            LabelBuilder::new(cx, id, text)
                .flex(flex)
                .font_size(FontSize::Large)
                .bold(true)
        }))
        .build()
}

fn city_row(cx: &LayoutContext, data: &AppData, i: usize) -> Node {
    let climate = ClimateZone::ALL.iter().map(|zone| {
        RadioButtonBuilder::new(
            cx,
            format!("climate_{i}_{}", zone.index()),
            zone.label(),
            format!("climate_{i}"),
            zone.index(),
        )
        .bind_selected(IntField::CityClimate(i), data)
    });

    row(cx, format!("row_{i}"))
        .add_child(
            TextInputBuilder::new(cx, format!("city_{i}"))
                .bind(TextField::CityName(i), data)
                .flex(2.0),
        )
        .add_child(
            NumberInputBuilder::new(cx, format!("lat_{i}"))
                .bind_float(FloatField::CityLatitude(i), data)
                .flex(1.0),
        )
        .add_child(
            NumberInputBuilder::new(cx, format!("lon_{i}"))
                .bind_float(FloatField::CityLongitude(i), data)
                .flex(1.0),
        )
        .add_child(
            NumberInputBuilder::new(cx, format!("elev_{i}"))
                .bind_int(IntField::CityElevation(i), data)
                .flex(1.0),
        )
        .add_child(
            NumberInputBuilder::new(cx, format!("temp_{i}"))
                .bind_float(FloatField::CityAvgTemp(i), data)
                .flex(1.0),
        )
        .add_child(
            VLayoutBuilder::new(cx, format!("climate_{i}"))
                .flex(1.0)
                .gap(2.0)
                .add_children(climate),
        )
        .build()
}

fn button_row(
    cx: &LayoutContext,
    on_toggle_dpi: Option<Callback>,
    on_save: Option<Callback>,
    on_reset: Option<Callback>,
) -> Node {
    let button = |id: &str, text: &str, callback: Option<Callback>| {
        let builder = ButtonBuilder::new(cx, id, text);
        match callback {
            Some(cb) => builder.on_click(move || cb()),
            None => builder,
        }
    };

    HLayoutBuilder::new(cx, "button_row")
        .justify(Justify::Center)
        .gap(15.0)
        .margin(10.0)
        .add_child(button("toggle_dpi", "Toggle DPI", on_toggle_dpi))
        .add_child(button("save_cities", "Save City Data", on_save).variant(Variant::Primary))
        .add_child(button("reset_cities", "Reset Data", on_reset).variant(Variant::Danger))
        .build()
}
