use serde::Serialize;

use crate::{
    normalize_distance, normalize_passengers, round_to_two, AirFactor, EmissionsError,
    FactorTable, FlightClass, Haul, Unit,
};

/// The estimated emissions of a flight, in kg CO2e.
///
/// Both the with-RF and without-RF figures are always present so callers can
/// show the conservative and the headline figure side by side. Callers that
/// rank trips must pick one consistently; [`ComparisonEntry`](crate::ComparisonEntry)
/// ranks flights by their with-RF total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirEmissions {
    /// human-readable name (e.g. `Short-haul flight (Economy)`)
    pub label: String,
    /// the distance in km, rounded to two decimal places
    pub distance_km: f64,
    pub passengers: u32,
    /// the class whose factors were used; differs from the requested class
    /// when the dataset has no entry for it and the haul average was used
    pub class_used: FlightClass,
    /// the factors used, in kg CO2e per passenger-km
    pub factor: AirFactor,
    pub per_person_with_rf_kg: f64,
    pub per_person_without_rf_kg: f64,
    pub total_with_rf_kg: f64,
    pub total_without_rf_kg: f64,
    /// set when the requested class was substituted by the haul average
    pub warning: Option<String>,
}

/// Returns the estimated emissions of a flight of `distance` in the given
/// haul category and cabin class, for `passengers` travellers.
///
/// Flight factors are always per passenger-km. A recognized class that the
/// dataset does not provide for the haul (e.g. first on a short-haul
/// flight) is substituted by the haul's average class, reported through
/// [`AirEmissions::class_used`] and a warning.
pub fn calculate_air_emissions(
    factors: &FactorTable,
    distance: f64,
    unit: Unit,
    haul: &str,
    flight_class: &str,
    passengers: f64,
) -> Result<AirEmissions, EmissionsError> {
    let distance_km = normalize_distance(distance, unit);
    let passengers = normalize_passengers(passengers);

    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(EmissionsError::InvalidDistance);
    }

    let haul_key = Haul::from_key(haul).ok_or_else(|| EmissionsError::InvalidHaul(haul.to_string()))?;
    let class = FlightClass::from_key(flight_class).ok_or_else(|| EmissionsError::InvalidOption {
        mode: haul.to_string(),
        option: flight_class.to_string(),
    })?;

    let category = factors
        .air_category(haul_key)
        .ok_or_else(|| EmissionsError::InvalidHaul(haul.to_string()))?;

    let (class_used, factor, warning) = match category.get(class) {
        Some(factor) => (class, *factor, None),
        None => {
            let average =
                category
                    .get(FlightClass::Average)
                    .ok_or_else(|| EmissionsError::InvalidOption {
                        mode: haul.to_string(),
                        option: flight_class.to_string(),
                    })?;
            log::warn!(
                "no {} factor for {}; using the average class",
                class.label(),
                category.label()
            );
            let warning = format!(
                "No {} factor is available for a {}; the average cabin class was used instead.",
                class.label().to_lowercase(),
                category.label().to_lowercase()
            );
            (FlightClass::Average, *average, Some(warning))
        }
    };

    let per_person_with_rf = factor.with_rf * distance_km;
    let per_person_without_rf = factor.without_rf * distance_km;
    let total_with_rf = per_person_with_rf * passengers as f64;
    let total_without_rf = per_person_without_rf * passengers as f64;

    log::debug!(
        "air {haul}/{flight_class}: {distance_km} km, {passengers} pax -> {total_with_rf} kg CO2e (with RF)"
    );

    Ok(AirEmissions {
        label: format!("{} ({})", category.label(), class_used.label()),
        distance_km: round_to_two(distance_km),
        passengers,
        class_used,
        factor,
        per_person_with_rf_kg: round_to_two(per_person_with_rf),
        per_person_without_rf_kg: round_to_two(per_person_without_rf),
        total_with_rf_kg: round_to_two(total_with_rf),
        total_without_rf_kg: round_to_two(total_without_rf),
        warning,
    })
}
