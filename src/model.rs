//! Application data model that widgets bind to.
//!
//! [`AppData`] is a flat record plus an ordered collection of [`CityRecord`]s.
//! Every instance carries a [`ModelId`]; replacing or resetting the storage
//! assigns a fresh id so that bindings resolved against the old storage go dead
//! instead of silently pointing at different rows.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::binding::{FlagField, FloatField, IntField, TextField};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one generation of an [`AppData`]'s storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Climate classification of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ClimateZone {
    #[default]
    Temperate = 0,
    Tropical = 1,
    Arid = 2,
    Continental = 3,
}

impl ClimateZone {
    /// All zones in index order.
    pub const ALL: [ClimateZone; 4] = [
        ClimateZone::Temperate,
        ClimateZone::Tropical,
        ClimateZone::Arid,
        ClimateZone::Continental,
    ];

    /// Zone for a radio value, if it names one.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            ClimateZone::Temperate => "Temperate",
            ClimateZone::Tropical => "Tropical",
            ClimateZone::Arid => "Arid",
            ClimateZone::Continental => "Continental",
        }
    }
}

/// Selectable programming languages of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Go,
    Swift,
    Rust,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Go,
        Language::Swift,
        Language::Rust,
        Language::Cpp,
    ];

    /// Bind key used in markup.
    pub fn key(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Go => "go",
            Language::Swift => "swift",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.key() == key)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of the city table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityRecord {
    pub name: String,
    pub latitude: f32,
    pub longitude: f32,
    /// Meters above sea level.
    pub elevation: i32,
    /// Degrees Celsius.
    pub avg_temp: f32,
    pub population: i32,
    pub climate_zone: ClimateZone,
}

impl CityRecord {
    fn sample(
        name: &str,
        latitude: f32,
        longitude: f32,
        elevation: i32,
        avg_temp: f32,
        population: i32,
        climate_zone: ClimateZone,
    ) -> Self {
        Self {
            name: name.to_owned(),
            latitude,
            longitude,
            elevation,
            avg_temp,
            population,
            climate_zone,
        }
    }
}

/// The application state widgets read and write every frame.
#[derive(Debug)]
pub struct AppData {
    pub name: String,
    pub email: String,
    pub python: bool,
    pub go: bool,
    pub swift: bool,
    pub rust: bool,
    pub cpp: bool,
    pub cities: Vec<CityRecord>,
    id: ModelId,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            python: false,
            go: false,
            swift: false,
            rust: false,
            cpp: false,
            cities: Vec::new(),
            id: ModelId::next(),
        }
    }
}

/// A clone is separate storage and gets its own identity.
impl Clone for AppData {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            email: self.email.clone(),
            python: self.python,
            go: self.go,
            swift: self.swift,
            rust: self.rust,
            cpp: self.cpp,
            cities: self.cities.clone(),
            id: ModelId::next(),
        }
    }
}

impl AppData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty contact fields plus [`AppData::sample_cities`].
    pub fn with_sample_cities() -> Self {
        Self {
            cities: Self::sample_cities(),
            ..Self::default()
        }
    }

    /// The six demo cities.
    pub fn sample_cities() -> Vec<CityRecord> {
        use ClimateZone::*;
        vec![
            CityRecord::sample("New York", 40.7128, -74.0060, 10, 12.5, 8_400_000, Continental),
            CityRecord::sample("Los Angeles", 34.0522, -118.2437, 71, 18.2, 3_900_000, Arid),
            CityRecord::sample("Chicago", 41.8781, -87.6298, 181, 9.8, 2_700_000, Continental),
            CityRecord::sample("Houston", 29.7604, -95.3698, 13, 20.7, 2_300_000, Tropical),
            CityRecord::sample("Phoenix", 33.4484, -112.0740, 331, 22.9, 1_700_000, Arid),
            CityRecord::sample("Philadelphia", 39.9526, -75.1652, 12, 13.1, 1_600_000, Continental),
        ]
    }

    /// Identity of the current storage generation.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Replace the city collection. Bindings into the old collection go dead.
    pub fn reset_cities(&mut self, cities: Vec<CityRecord>) {
        self.cities = cities;
        self.id = ModelId::next();
    }

    /// Replace all storage with `other`'s contents under a fresh identity.
    pub fn replace(&mut self, other: AppData) {
        *self = AppData {
            id: ModelId::next(),
            ..other
        };
    }

    /// Grow the city collection to at least `len` rows.
    ///
    /// Existing rows are kept; new rows are defaulted. Growing counts as a
    /// reset because it may reallocate the collection.
    pub fn ensure_cities(&mut self, len: usize) {
        if self.cities.len() < len {
            self.cities.resize_with(len, CityRecord::default);
            self.id = ModelId::next();
        }
    }

    // -- typed accessors ---------------------------------------------------

    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Email => Some(&self.email),
            TextField::CityName(i) => self.cities.get(i).map(|c| c.name.as_str()),
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> bool {
        let slot = match field {
            TextField::Name => &mut self.name,
            TextField::Email => &mut self.email,
            TextField::CityName(i) => match self.cities.get_mut(i) {
                Some(city) => &mut city.name,
                None => return false,
            },
        };
        *slot = value.into();
        true
    }

    pub fn flag(&self, field: FlagField) -> Option<bool> {
        let FlagField::Language(lang) = field;
        Some(*self.language_slot(lang))
    }

    pub fn set_flag(&mut self, field: FlagField, value: bool) -> bool {
        let FlagField::Language(lang) = field;
        *self.language_slot_mut(lang) = value;
        true
    }

    pub fn float(&self, field: FloatField) -> Option<f32> {
        match field {
            FloatField::CityLatitude(i) => self.cities.get(i).map(|c| c.latitude),
            FloatField::CityLongitude(i) => self.cities.get(i).map(|c| c.longitude),
            FloatField::CityAvgTemp(i) => self.cities.get(i).map(|c| c.avg_temp),
        }
    }

    pub fn set_float(&mut self, field: FloatField, value: f32) -> bool {
        let slot = match field {
            FloatField::CityLatitude(i) => self.cities.get_mut(i).map(|c| &mut c.latitude),
            FloatField::CityLongitude(i) => self.cities.get_mut(i).map(|c| &mut c.longitude),
            FloatField::CityAvgTemp(i) => self.cities.get_mut(i).map(|c| &mut c.avg_temp),
        };
        match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn int(&self, field: IntField) -> Option<i32> {
        match field {
            IntField::CityElevation(i) => self.cities.get(i).map(|c| c.elevation),
            IntField::CityPopulation(i) => self.cities.get(i).map(|c| c.population),
            IntField::CityClimate(i) => self.cities.get(i).map(|c| c.climate_zone.index()),
        }
    }

    /// Write an integer field. Climate values that name no zone are rejected.
    pub fn set_int(&mut self, field: IntField, value: i32) -> bool {
        match field {
            IntField::CityElevation(i) => match self.cities.get_mut(i) {
                Some(city) => {
                    city.elevation = value;
                    true
                }
                None => false,
            },
            IntField::CityPopulation(i) => match self.cities.get_mut(i) {
                Some(city) => {
                    city.population = value;
                    true
                }
                None => false,
            },
            IntField::CityClimate(i) => {
                match (self.cities.get_mut(i), ClimateZone::from_index(value)) {
                    (Some(city), Some(zone)) => {
                        city.climate_zone = zone;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn language_slot(&self, lang: Language) -> &bool {
        match lang {
            Language::Python => &self.python,
            Language::Go => &self.go,
            Language::Swift => &self.swift,
            Language::Rust => &self.rust,
            Language::Cpp => &self.cpp,
        }
    }

    fn language_slot_mut(&mut self, lang: Language) -> &mut bool {
        match lang {
            Language::Python => &mut self.python,
            Language::Go => &mut self.go,
            Language::Swift => &mut self.swift,
            Language::Rust => &mut self.rust,
            Language::Cpp => &mut self.cpp,
        }
    }
}
