#[forbid(unsafe_code)]
mod air;
mod comparison;
pub mod csv;
mod error;
mod factors;
mod land;

pub use air::*;
pub use comparison::*;
pub use error::EmissionsError;
pub use factors::*;
pub use land::*;

/// Kilometres per statute mile.
static KM_PER_MILE: f64 = 1.60934;

/// The unit in which a trip distance is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Km,
    Miles,
}

impl Unit {
    /// Returns the [`Unit`] for a form value ("km" or "miles").
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "km" => Some(Unit::Km),
            "miles" => Some(Unit::Miles),
            _ => None,
        }
    }
}

/// Converts a distance in statute miles to kilometres.
pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn normalize_distance(distance: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Km => distance,
        Unit::Miles => miles_to_km(distance),
    }
}

/// Travellers sharing a trip. Non-finite or sub-1 values default to a single
/// traveller instead of erroring.
fn normalize_passengers(passengers: f64) -> u32 {
    if !passengers.is_finite() || passengers < 1.0 {
        return 1;
    }
    passengers.floor() as u32
}
