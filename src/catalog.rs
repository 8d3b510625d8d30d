use crate::types::{AlternativeCandidate, HUMAN_FUEL};

/// Transport modes compared against each other for a given distance.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeCatalog {
    entries: Vec<AlternativeCandidate>,
}

impl AlternativeCatalog {
    pub fn with_defaults() -> Self {
        Self {
            entries: vec![
                AlternativeCandidate::new("Car (Petrol)", "Petrol", 14.0),
                AlternativeCandidate::new("Car (Diesel)", "Diesel", 18.0),
                AlternativeCandidate::new("Car (Electric)", "Electric", 25.0),
                AlternativeCandidate::new("Bus", "Diesel", 5.0),
                AlternativeCandidate::new("Motorcycle", "Petrol", 35.0),
                AlternativeCandidate::new("Bicycle", HUMAN_FUEL, 0.0),
                AlternativeCandidate::new("Walking", HUMAN_FUEL, 0.0),
            ],
        }
    }

    /// Falls back to the default catalog when `entries` is empty.
    pub fn from_entries(entries: Vec<AlternativeCandidate>) -> Self {
        if entries.is_empty() {
            return Self::with_defaults();
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[AlternativeCandidate] {
        &self.entries
    }
}

impl Default for AlternativeCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_seven_modes_and_two_human_powered() {
        let catalog = AlternativeCatalog::with_defaults();
        assert_eq!(catalog.entries().len(), 7);
        let human: Vec<&AlternativeCandidate> = catalog
            .entries()
            .iter()
            .filter(|e| e.is_human_powered())
            .collect();
        let vehicles: Vec<&str> = human.iter().map(|e| e.vehicle.as_str()).collect();
        assert_eq!(vehicles, vec!["Bicycle", "Walking"]);
        assert!(human.iter().all(|e| e.mileage == 0.0 && e.fuel == HUMAN_FUEL));
    }

    #[test]
    fn empty_entries_fall_back_to_defaults() {
        assert_eq!(
            AlternativeCatalog::from_entries(Vec::new()),
            AlternativeCatalog::with_defaults()
        );
    }
}
