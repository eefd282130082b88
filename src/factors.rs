use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::csv;

// note: condensed subsets of the UK Government GHG conversion factors
// published on 2025-06-10. Rows and the JSON carry their provenance.
static LAND_FACTORS: &'static [u8] = include_bytes!("./land_factors.csv");
static AIR_FACTORS: &'static [u8] = include_bytes!("./air_factors.json");

/// Whether a land factor is expressed per vehicle-km or per passenger-km.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Emissions of the whole vehicle regardless of occupancy; sharing the
    /// trip dilutes the per-person figure but not the total.
    Vehicle,
    /// Emissions of one traveller at average occupancy; the trip total
    /// scales with the passenger count.
    Passenger,
}

impl Basis {
    /// The unit of a factor with this basis.
    pub fn unit(&self) -> &'static str {
        match self {
            Basis::Vehicle => "vehicle.km",
            Basis::Passenger => "passenger.km",
        }
    }
}

/// The emission factor of one land travel option, in kg CO2e per [`Basis::unit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandFactor {
    /// the travel mode (e.g. `car`)
    pub category: String,
    /// the option within the mode (e.g. `petrol`)
    pub option: String,
    /// human-readable name (e.g. `Car (Petrol)`)
    pub label: String,
    pub basis: Basis,
    pub factor: f64,
    /// the source of the factor
    pub source: String,
    /// the date of when the source was retrieved
    pub date: String,
}

/// Flight distance classification used to select the applicable air factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Haul {
    Domestic,
    ShortHaul,
    LongHaul,
    International,
}

impl Haul {
    /// Returns the [`Haul`] of a dataset or form value. The form spellings
    /// `short`, `medium` and `long` resolve to their haul category.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "domestic" => Some(Haul::Domestic),
            "short" | "short_haul" => Some(Haul::ShortHaul),
            "medium" | "long" | "long_haul" => Some(Haul::LongHaul),
            "international" => Some(Haul::International),
            _ => None,
        }
    }
}

/// Cabin class of a flight. Not every class is available for every haul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightClass {
    Average,
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl FlightClass {
    /// Returns the [`FlightClass`] of a dataset or form value. The form
    /// spelling `premium` resolves to premium economy.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "average" => Some(FlightClass::Average),
            "economy" => Some(FlightClass::Economy),
            "premium" | "premium_economy" => Some(FlightClass::PremiumEconomy),
            "business" => Some(FlightClass::Business),
            "first" => Some(FlightClass::First),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            FlightClass::Average => "Average",
            FlightClass::Economy => "Economy",
            FlightClass::PremiumEconomy => "Premium economy",
            FlightClass::Business => "Business",
            FlightClass::First => "First",
        }
    }
}

/// The emission factors of one (haul, class) pair in kg CO2e per
/// passenger-km, with and without the radiative forcing uplift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirFactor {
    pub with_rf: f64,
    pub without_rf: f64,
}

#[derive(Debug, Deserialize)]
struct RawAirCategory {
    label: String,
    classes: HashMap<String, AirFactor>,
}

#[derive(Debug, Deserialize)]
struct RawAirDataset {
    dataset: String,
    source: String,
    published: String,
    hauls: HashMap<String, RawAirCategory>,
}

/// Provenance of the embedded factor datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMeta {
    pub dataset: String,
    pub source: String,
    pub published: time::Date,
}

// Form values that resolve to a canonical option of the same category, so
// that a factor is never stated twice: (category, alias, canonical option).
static LAND_ALIASES: &'static [(&str, &str, &str)] = &[
    ("car", "ev", "electric"),
    ("bus", "local", "average_local"),
    ("rail", "national", "national_rail"),
    ("rail", "metro", "underground"),
    ("taxi", "regular", "regular_taxi"),
];

/// The land travel options of one category (`car`, `bus`, `rail`, `taxi`).
#[derive(Debug, Clone, PartialEq)]
pub struct LandCategory {
    category: String,
    options: HashMap<String, LandFactor>,
}

impl LandCategory {
    /// Returns the factor of `option`, resolving form aliases (e.g. `ev`).
    pub fn get(&self, option: &str) -> Option<&LandFactor> {
        let canonical = LAND_ALIASES
            .iter()
            .find_map(|(category, alias, canonical)| {
                (*category == self.category && *alias == option).then_some(*canonical)
            })
            .unwrap_or(option);
        self.options.get(canonical)
    }

    /// The canonical options of this category, in no particular order.
    pub fn options(&self) -> impl Iterator<Item = &LandFactor> {
        self.options.values()
    }
}

/// The air factors available for one haul category.
#[derive(Debug, Clone, PartialEq)]
pub struct AirCategory {
    label: String,
    classes: HashMap<FlightClass, AirFactor>,
}

impl AirCategory {
    /// Human-readable name (e.g. `Short-haul flight`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the factors of `class`, if the dataset has them for this haul.
    pub fn get(&self, class: FlightClass) -> Option<&AirFactor> {
        self.classes.get(&class)
    }

    /// The classes available for this haul, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = (&FlightClass, &AirFactor)> {
        self.classes.iter()
    }
}

/// The embedded emission factor table. Built once at startup, read-only
/// thereafter; calculators receive it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    meta: DatasetMeta,
    land: HashMap<String, LandCategory>,
    air: HashMap<Haul, AirCategory>,
}

impl FactorTable {
    /// Loads the embedded datasets.
    /// # Panics
    /// Panics if an embedded dataset cannot be deserialized or violates its
    /// invariants (factors are non-negative; `with_rf >= without_rf`).
    pub fn new() -> Self {
        let mut land = HashMap::<String, LandCategory>::new();
        for factor in csv::deserialize::<LandFactor>(LAND_FACTORS) {
            assert!(
                factor.factor >= 0.0,
                "land factor {}/{} to be non-negative",
                factor.category,
                factor.option
            );
            land.entry(factor.category.clone())
                .or_insert_with(|| LandCategory {
                    category: factor.category.clone(),
                    options: HashMap::new(),
                })
                .options
                .insert(factor.option.clone(), factor);
        }

        let raw: RawAirDataset =
            serde_json::from_slice(AIR_FACTORS).expect("src/air_factors.json to be deserializable");
        let published = time::Date::parse(
            &raw.published,
            format_description!("[year]-[month]-[day]"),
        )
        .expect("src/air_factors.json `published` to be a yyyy-mm-dd date");

        let air = raw
            .hauls
            .into_iter()
            .map(|(haul, category)| {
                let haul = Haul::from_key(&haul)
                    .unwrap_or_else(|| panic!("{haul} to be a known haul category"));
                let classes = category
                    .classes
                    .into_iter()
                    .map(|(class, factor)| {
                        let class = FlightClass::from_key(&class)
                            .unwrap_or_else(|| panic!("{class} to be a known flight class"));
                        assert!(
                            factor.without_rf >= 0.0,
                            "air factor {haul:?}/{class:?} to be non-negative"
                        );
                        assert!(
                            factor.with_rf >= factor.without_rf,
                            "air factor {haul:?}/{class:?} to have with_rf >= without_rf"
                        );
                        (class, factor)
                    })
                    .collect();
                (
                    haul,
                    AirCategory {
                        label: category.label,
                        classes,
                    },
                )
            })
            .collect();

        Self {
            meta: DatasetMeta {
                dataset: raw.dataset,
                source: raw.source,
                published,
            },
            land,
            air,
        }
    }

    /// Provenance of the embedded datasets.
    pub fn meta(&self) -> &DatasetMeta {
        &self.meta
    }

    /// Returns the land category of a form value (`car`, `bus`, `rail`, `taxi`).
    pub fn land_category(&self, category: &str) -> Option<&LandCategory> {
        self.land.get(category)
    }

    /// Returns the air factors of a haul category.
    pub fn air_category(&self, haul: Haul) -> Option<&AirCategory> {
        self.air.get(&haul)
    }
}
