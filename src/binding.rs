//! Typed bindings between widgets and [`AppData`] fields.
//!
//! A [`Binding`] names a field and the [`ModelId`] it was resolved against. It
//! holds no reference into the data model: every read and write goes through
//! the model and is refused once the model's identity has changed. After a data
//! model reset, [`Binding::rebind`] re-attaches a binding to the new storage if
//! its field still exists there.

use crate::model::{AppData, Language, ModelId};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// String fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Email,
    CityName(usize),
}

/// Boolean fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    Language(Language),
}

/// Float fields of a city row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatField {
    CityLatitude(usize),
    CityLongitude(usize),
    CityAvgTemp(usize),
}

/// Integer fields of a city row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntField {
    CityElevation(usize),
    CityPopulation(usize),
    CityClimate(usize),
}

/// A field of [`AppData`] with a value type.
pub trait Field: Copy + std::fmt::Debug {
    type Value;

    /// Current value, or `None` if the field does not exist in `data`.
    fn read(self, data: &AppData) -> Option<Self::Value>;

    /// Store `value`. Returns `false` if the field does not exist in `data`.
    fn write(self, data: &mut AppData, value: Self::Value) -> bool;
}

impl Field for TextField {
    type Value = String;

    fn read(self, data: &AppData) -> Option<String> {
        data.text(self).map(str::to_owned)
    }

    fn write(self, data: &mut AppData, value: String) -> bool {
        data.set_text(self, value)
    }
}

impl Field for FlagField {
    type Value = bool;

    fn read(self, data: &AppData) -> Option<bool> {
        data.flag(self)
    }

    fn write(self, data: &mut AppData, value: bool) -> bool {
        data.set_flag(self, value)
    }
}

impl Field for FloatField {
    type Value = f32;

    fn read(self, data: &AppData) -> Option<f32> {
        data.float(self)
    }

    fn write(self, data: &mut AppData, value: f32) -> bool {
        data.set_float(self, value)
    }
}

impl Field for IntField {
    type Value = i32;

    fn read(self, data: &AppData) -> Option<i32> {
        data.int(self)
    }

    fn write(self, data: &mut AppData, value: i32) -> bool {
        data.set_int(self, value)
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// A field handle tied to one generation of the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<F> {
    field: F,
    model: ModelId,
}

impl<F: Field> Binding<F> {
    /// Bind `field` against `data`. Returns `None` if the field does not exist.
    pub fn resolve(field: F, data: &AppData) -> Option<Self> {
        field.read(data)?;
        Some(Self {
            field,
            model: data.id(),
        })
    }

    pub fn field(&self) -> F {
        self.field
    }

    /// Whether this binding still refers to `data`'s current storage.
    pub fn is_live(&self, data: &AppData) -> bool {
        self.model == data.id()
    }

    pub fn get(&self, data: &AppData) -> Option<F::Value> {
        if !self.is_live(data) {
            return None;
        }
        self.field.read(data)
    }

    pub fn set(&self, data: &mut AppData, value: F::Value) -> bool {
        self.is_live(data) && self.field.write(data, value)
    }

    /// Re-attach to `data`'s current storage. Stays dead if the field is gone.
    pub fn rebind(&mut self, data: &AppData) -> bool {
        if self.field.read(data).is_some() {
            self.model = data.id();
            true
        } else {
            false
        }
    }
}

/// The value a number input edits: float or int, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBinding {
    Float(Binding<FloatField>),
    Int(Binding<IntField>),
}

impl NumberBinding {
    pub fn is_live(&self, data: &AppData) -> bool {
        match self {
            NumberBinding::Float(b) => b.is_live(data),
            NumberBinding::Int(b) => b.is_live(data),
        }
    }

    pub fn rebind(&mut self, data: &AppData) -> bool {
        match self {
            NumberBinding::Float(b) => b.rebind(data),
            NumberBinding::Int(b) => b.rebind(data),
        }
    }
}

// ---------------------------------------------------------------------------
// Bind keys
// ---------------------------------------------------------------------------

/// Why a bind key did not produce a binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("malformed index in bind key `{key}`")]
    MalformedIndex { key: String },

    #[error("bind key `{key}` addresses row {index} but only {len} rows exist")]
    OutOfRange {
        key: String,
        index: usize,
        len: usize,
    },

    #[error("unknown bind key `{key}`")]
    UnknownKey { key: String },

    #[error("bind key `{key}` cannot be used on a {widget}")]
    WrongWidget { key: String, widget: &'static str },
}

impl BindError {
    /// Out-of-range rows are expected while the collection is short.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BindError::OutOfRange { .. })
    }
}

/// A resolved bind key, grouped by the widget family that can use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    Text(Binding<TextField>),
    Flag(Binding<FlagField>),
    Number(NumberBinding),
    Selection(Binding<IntField>),
}

impl BindTarget {
    pub fn family(&self) -> &'static str {
        match self {
            BindTarget::Text(_) => "text input",
            BindTarget::Flag(_) => "checkbox",
            BindTarget::Number(_) => "number input",
            BindTarget::Selection(_) => "radio button",
        }
    }
}

#[derive(Clone, Copy)]
enum Indexed {
    Name,
    Latitude,
    Longitude,
    AvgTemp,
    Elevation,
    Population,
    Climate,
}

const INDEXED_PREFIXES: [(&str, Indexed); 7] = [
    ("city_name_", Indexed::Name),
    ("city_lat_", Indexed::Latitude),
    ("city_lon_", Indexed::Longitude),
    ("city_temp_", Indexed::AvgTemp),
    ("city_elev_", Indexed::Elevation),
    ("city_pop_", Indexed::Population),
    ("city_climate_", Indexed::Climate),
];

/// Resolve a markup bind key against the data model's schema.
///
/// Plain keys: `name`, `email` and the language names. Indexed keys are a
/// `city_*_` prefix followed by an ASCII decimal row index.
pub fn resolve_bind_key(key: &str, data: &AppData) -> Result<BindTarget, BindError> {
    let bound = |ok: Option<BindTarget>| {
        ok.ok_or_else(|| BindError::UnknownKey {
            key: key.to_owned(),
        })
    };

    match key {
        "name" => return bound(Binding::resolve(TextField::Name, data).map(BindTarget::Text)),
        "email" => return bound(Binding::resolve(TextField::Email, data).map(BindTarget::Text)),
        _ => {}
    }
    if let Some(lang) = Language::from_key(key) {
        return bound(Binding::resolve(FlagField::Language(lang), data).map(BindTarget::Flag));
    }

    let Some((suffix, indexed)) = INDEXED_PREFIXES
        .iter()
        .find_map(|(prefix, indexed)| key.strip_prefix(prefix).map(|s| (s, *indexed)))
    else {
        return Err(BindError::UnknownKey {
            key: key.to_owned(),
        });
    };

    let index = parse_index(suffix).ok_or_else(|| BindError::MalformedIndex {
        key: key.to_owned(),
    })?;
    let len = data.cities.len();
    let out_of_range = || BindError::OutOfRange {
        key: key.to_owned(),
        index,
        len,
    };

    let target = match indexed {
        Indexed::Name => Binding::resolve(TextField::CityName(index), data).map(BindTarget::Text),
        Indexed::Latitude => Binding::resolve(FloatField::CityLatitude(index), data)
            .map(|b| BindTarget::Number(NumberBinding::Float(b))),
        Indexed::Longitude => Binding::resolve(FloatField::CityLongitude(index), data)
            .map(|b| BindTarget::Number(NumberBinding::Float(b))),
        Indexed::AvgTemp => Binding::resolve(FloatField::CityAvgTemp(index), data)
            .map(|b| BindTarget::Number(NumberBinding::Float(b))),
        Indexed::Elevation => Binding::resolve(IntField::CityElevation(index), data)
            .map(|b| BindTarget::Number(NumberBinding::Int(b))),
        Indexed::Population => Binding::resolve(IntField::CityPopulation(index), data)
            .map(|b| BindTarget::Number(NumberBinding::Int(b))),
        Indexed::Climate => {
            Binding::resolve(IntField::CityClimate(index), data).map(BindTarget::Selection)
        }
    };
    target.ok_or_else(out_of_range)
}

/// ASCII decimal digits only; no sign, no whitespace.
fn parse_index(suffix: &str) -> Option<usize> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
