use serde::Serialize;

use crate::{AirEmissions, LandEmissions};

fn format_distance(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{}", km as u64)
    } else {
        format!("{km:.2}")
    }
}

/// One trip of the comparison list: a label and the figure it is ranked by,
/// in kg CO2e.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub label: String,
    pub total_kg: f64,
}

impl ComparisonEntry {
    /// Builds an entry from a land result, ranked by its trip total.
    pub fn land(result: &LandEmissions) -> Self {
        Self {
            label: format!(
                "Land | {} | {} km | {} passenger(s)",
                result.label,
                format_distance(result.distance_km),
                result.passengers
            ),
            total_kg: result.total_kg,
        }
    }

    /// Builds an entry from an air result. Flights are ranked by their
    /// with-RF total, the conservative figure.
    pub fn air(result: &AirEmissions) -> Self {
        Self {
            label: format!(
                "Air | {} | {} km | {} passenger(s)",
                result.label,
                format_distance(result.distance_km),
                result.passengers
            ),
            total_kg: result.total_with_rf_kg,
        }
    }
}

/// An ordered, in-memory list of trips to compare. Lives for one session of
/// its caller; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    entries: Vec<ComparisonEntry>,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trip to the list.
    pub fn add(&mut self, entry: ComparisonEntry) {
        self.entries.push(entry);
    }

    /// Removes and returns the trip at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<ComparisonEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The trips in insertion order.
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    /// The trips ordered by ascending emissions.
    pub fn ranked(&self) -> Vec<&ComparisonEntry> {
        let mut ranked = self.entries.iter().collect::<Vec<_>>();
        ranked.sort_unstable_by(|a, b| a.total_kg.total_cmp(&b.total_kg));
        ranked
    }

    /// Sum of the listed trips in kg CO2e. The sum is not re-rounded;
    /// round for display only.
    pub fn total_kg(&self) -> f64 {
        self.entries.iter().map(|entry| entry.total_kg).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{calculate_air_emissions, calculate_land_emissions, FactorTable, Unit};

    #[test]
    fn lifecycle() {
        let table = FactorTable::new();
        let car = calculate_land_emissions(&table, 10.0, Unit::Km, "car", "petrol", 1.0).unwrap();
        let coach = calculate_land_emissions(&table, 10.0, Unit::Km, "bus", "coach", 1.0).unwrap();

        let mut comparison = Comparison::new();
        comparison.add(ComparisonEntry::land(&car));
        comparison.add(ComparisonEntry::land(&coach));
        assert_eq!(comparison.len(), 2);

        let removed = comparison.remove(0).unwrap();
        assert!(removed.label.contains("Car (Petrol)"));
        assert_eq!(comparison.len(), 1);
        assert!(comparison.remove(7).is_none());

        comparison.clear();
        assert!(comparison.is_empty());
    }

    #[test]
    fn flights_rank_by_the_with_rf_total() {
        let table = FactorTable::new();
        let flight =
            calculate_air_emissions(&table, 100.0, Unit::Km, "short", "economy", 1.0).unwrap();

        let entry = ComparisonEntry::air(&flight);
        assert_eq!(entry.total_kg, flight.total_with_rf_kg);
        assert!(entry.total_kg > flight.total_without_rf_kg);
    }

    #[test]
    fn ranked_is_ascending_and_leaves_insertion_order_alone() {
        let table = FactorTable::new();
        let car = calculate_land_emissions(&table, 10.0, Unit::Km, "car", "petrol", 1.0).unwrap();
        let coach = calculate_land_emissions(&table, 10.0, Unit::Km, "bus", "coach", 1.0).unwrap();
        let flight =
            calculate_air_emissions(&table, 100.0, Unit::Km, "short", "economy", 1.0).unwrap();

        let mut comparison = Comparison::new();
        comparison.add(ComparisonEntry::land(&car));
        comparison.add(ComparisonEntry::air(&flight));
        comparison.add(ComparisonEntry::land(&coach));

        let ranked = comparison.ranked();
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].total_kg <= pair[1].total_kg));
        assert_eq!(ranked[0].total_kg, 0.27);

        assert!(comparison.entries()[0].label.starts_with("Land"));
        approx::assert_relative_eq!(comparison.total_kg(), 14.48, max_relative = 1e-12);
    }

    #[test]
    fn labels_carry_the_trip_summary() {
        let table = FactorTable::new();
        let car = calculate_land_emissions(&table, 10.0, Unit::Km, "car", "petrol", 2.0).unwrap();
        let entry = ComparisonEntry::land(&car);
        assert_eq!(entry.label, "Land | Car (Petrol) | 10 km | 2 passenger(s)");
    }
}
