use serde::Serialize;

use crate::{
    normalize_distance, normalize_passengers, round_to_two, Basis, EmissionsError, FactorTable,
    Unit,
};

/// The estimated emissions of a land trip, in kg CO2e.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandEmissions {
    /// human-readable name of the option (e.g. `Car (Petrol)`)
    pub label: String,
    /// the distance in km, rounded to two decimal places
    pub distance_km: f64,
    pub passengers: u32,
    pub basis: Basis,
    /// the factor used, in kg CO2e per `factor_unit`
    pub factor: f64,
    pub factor_unit: &'static str,
    pub per_person_kg: f64,
    pub total_kg: f64,
}

/// Returns the estimated emissions of a land trip of `distance` over
/// `land_type`/`option`, shared by `passengers` travellers.
///
/// Vehicle-km factors (cars) describe the whole vehicle: the total is
/// independent of the passenger count and the per-person figure divides it.
/// Passenger-km factors (bus, rail, taxi) are already occupancy-normalized:
/// the per-person figure is the factor times the distance and the total
/// scales with the passenger count.
pub fn calculate_land_emissions(
    factors: &FactorTable,
    distance: f64,
    unit: Unit,
    land_type: &str,
    option: &str,
    passengers: f64,
) -> Result<LandEmissions, EmissionsError> {
    let distance_km = normalize_distance(distance, unit);
    let passengers = normalize_passengers(passengers);

    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(EmissionsError::InvalidDistance);
    }

    let category = factors
        .land_category(land_type)
        .ok_or_else(|| EmissionsError::InvalidMode(land_type.to_string()))?;
    let entry = category
        .get(option)
        .ok_or_else(|| EmissionsError::InvalidOption {
            mode: land_type.to_string(),
            option: option.to_string(),
        })?;

    let (total_kg, per_person_kg) = match entry.basis {
        Basis::Vehicle => {
            let total = entry.factor * distance_km;
            (total, total / passengers as f64)
        }
        Basis::Passenger => {
            let per_person = entry.factor * distance_km;
            (per_person * passengers as f64, per_person)
        }
    };

    log::debug!(
        "land {land_type}/{option}: {distance_km} km, {passengers} pax -> {total_kg} kg CO2e"
    );

    Ok(LandEmissions {
        label: entry.label.clone(),
        distance_km: round_to_two(distance_km),
        passengers,
        basis: entry.basis,
        factor: entry.factor,
        factor_unit: entry.basis.unit(),
        per_person_kg: round_to_two(per_person_kg),
        total_kg: round_to_two(total_kg),
    })
}
