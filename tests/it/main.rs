use trips::*;

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

/// Verifies the published scenarios of the UK factor dataset for land
/// travel: a petrol car is priced per vehicle-km (the total is for the
/// vehicle and is shared), a local bus per passenger-km (the total scales
/// with the passenger count).
#[test]
fn acceptance_land() {
    let table = FactorTable::new();

    let r = calculate_land_emissions(&table, 10.0, Unit::Km, "car", "petrol", 1.0).unwrap();
    assert_eq!(r.basis, Basis::Vehicle);
    assert_eq!(r.total_kg, 1.63);
    assert_eq!(r.per_person_kg, 1.63);

    let r = calculate_land_emissions(&table, 10.0, Unit::Km, "car", "petrol", 2.0).unwrap();
    assert_eq!(r.total_kg, 1.63);
    assert_eq!(r.per_person_kg, 0.81);

    let r = calculate_land_emissions(&table, 10.0, Unit::Km, "bus", "local", 2.0).unwrap();
    assert_eq!(r.basis, Basis::Passenger);
    assert_eq!(r.per_person_kg, 1.04);
    assert_eq!(r.total_kg, 2.08);
}

/// Verifies that a trip in statute miles is normalized to kilometres
/// before the factor is applied.
#[test]
fn acceptance_miles() {
    let table = FactorTable::new();

    let r = calculate_land_emissions(&table, 10.0, Unit::Miles, "car", "petrol", 1.0).unwrap();
    assert_eq!(r.distance_km, 16.09);
    assert_eq!(r.total_kg, 2.62);
}

/// Verifies the air figures, the radiative forcing duality and the
/// transparent substitution of a cabin class the dataset does not provide.
#[test]
fn acceptance_air() {
    let table = FactorTable::new();

    let r = calculate_air_emissions(&table, 100.0, Unit::Km, "short", "economy", 1.0).unwrap();
    assert_eq!(r.per_person_with_rf_kg, 12.58);
    assert_eq!(r.per_person_without_rf_kg, 7.44);
    assert!(r.warning.is_none());

    let r = calculate_air_emissions(&table, 100.0, Unit::Km, "short", "first", 1.0).unwrap();
    assert_eq!(r.class_used, FlightClass::Average);
    assert_eq!(r.per_person_with_rf_kg, 12.79);
    assert!(r.warning.is_some());
}

/// For a vehicle-basis mode the total is independent of the passenger count
/// and the per-person figure divides it, within rounding tolerance.
#[test]
fn acceptance_vehicle_basis_is_occupancy_independent() {
    let table = FactorTable::new();

    let alone = calculate_land_emissions(&table, 123.4, Unit::Km, "car", "diesel", 1.0).unwrap();
    for passengers in 2..=6u32 {
        let shared =
            calculate_land_emissions(&table, 123.4, Unit::Km, "car", "diesel", passengers as f64)
                .unwrap();
        assert_eq!(shared.total_kg, alone.total_kg);
        assert!(
            abs_difference(
                shared.per_person_kg,
                shared.total_kg / passengers as f64
            ) < 0.01
        );
    }
}

/// Invalid selections surface as structured errors, never as panics.
#[test]
fn acceptance_errors() {
    let table = FactorTable::new();

    let r = calculate_land_emissions(&table, 10.0, Unit::Km, "boat", "any", 1.0);
    assert!(r
        .unwrap_err()
        .to_string()
        .to_lowercase()
        .contains("invalid travel mode"));

    let r = calculate_land_emissions(&table, 0.0, Unit::Km, "car", "petrol", 1.0);
    assert_eq!(r.unwrap_err(), EmissionsError::InvalidDistance);

    let r = calculate_air_emissions(&table, 10.0, Unit::Km, "boat", "economy", 1.0);
    assert_eq!(
        r.unwrap_err(),
        EmissionsError::InvalidHaul("boat".to_string())
    );
}

/// The comparison list ranks land trips by their total and flights by their
/// with-RF total.
#[test]
fn acceptance_comparison() {
    let table = FactorTable::new();
    let mut comparison = Comparison::new();

    let car = calculate_land_emissions(&table, 500.0, Unit::Km, "car", "petrol", 1.0).unwrap();
    let rail =
        calculate_land_emissions(&table, 500.0, Unit::Km, "rail", "national", 1.0).unwrap();
    let flight =
        calculate_air_emissions(&table, 500.0, Unit::Km, "domestic", "average", 1.0).unwrap();

    comparison.add(ComparisonEntry::land(&car));
    comparison.add(ComparisonEntry::land(&rail));
    comparison.add(ComparisonEntry::air(&flight));

    let ranked = comparison.ranked();
    assert_eq!(ranked[0].total_kg, rail.total_kg);
    assert_eq!(ranked[1].total_kg, car.total_kg);
    assert_eq!(ranked[2].total_kg, flight.total_with_rf_kg);
}
