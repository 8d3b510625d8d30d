use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::predictor::{EmissionsPredictor, Prediction, PredictionError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmissionFactor {
    pub vehicle_type: String,
    pub fuel_type: String,
    /// kg CO2 released per unit of fuel (litre, kg of gas, or kWh-equivalent).
    pub kg_co2_per_unit: f64,
    pub min_mileage: f64,
    pub max_mileage: f64,
}

impl EmissionFactor {
    pub fn new(
        vehicle_type: &str,
        fuel_type: &str,
        kg_co2_per_unit: f64,
        min_mileage: f64,
        max_mileage: f64,
    ) -> Self {
        Self {
            vehicle_type: vehicle_type.to_string(),
            fuel_type: fuel_type.to_string(),
            kg_co2_per_unit,
            min_mileage,
            max_mileage,
        }
    }

    fn matches(&self, vehicle_type: &str, fuel_type: &str) -> bool {
        self.vehicle_type.eq_ignore_ascii_case(vehicle_type.trim())
            && self.fuel_type.eq_ignore_ascii_case(fuel_type.trim())
    }

    fn covers(&self, mileage: f64) -> bool {
        mileage >= self.min_mileage && mileage <= self.max_mileage
    }
}

/// Predictor backed by a fixed table of per-fuel emission factors.
///
/// A vehicle/fuel pair missing from the table, or a mileage outside the
/// range recorded for that pair, is reported as an unsupported combination.
#[derive(Debug, Clone)]
pub struct FactorTablePredictor {
    factors: Vec<EmissionFactor>,
}

impl FactorTablePredictor {
    pub fn with_defaults() -> Self {
        Self {
            factors: default_factors(),
        }
    }

    /// Falls back to the built-in table when `factors` is empty.
    pub fn from_factors(factors: Vec<EmissionFactor>) -> Self {
        if factors.is_empty() {
            return Self::with_defaults();
        }
        Self { factors }
    }
}

impl Default for FactorTablePredictor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EmissionsPredictor for FactorTablePredictor {
    fn name(&self) -> &str {
        "factor-table"
    }

    fn predict(
        &self,
        vehicle_type: &str,
        fuel_type: &str,
        distance_km: f64,
        mileage: f64,
    ) -> Result<Prediction, PredictionError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(PredictionError::InvalidInput {
                field: "distance",
                value: distance_km,
            });
        }
        if !mileage.is_finite() || mileage < 0.0 {
            return Err(PredictionError::InvalidInput {
                field: "mileage",
                value: mileage,
            });
        }

        let factor = self
            .factors
            .iter()
            .find(|f| f.matches(vehicle_type, fuel_type) && mileage > 0.0 && f.covers(mileage))
            .ok_or_else(|| PredictionError::UnsupportedCombination {
                vehicle_type: vehicle_type.to_string(),
                fuel_type: fuel_type.to_string(),
                mileage,
            })?;

        let fuel_used = distance_km / mileage;
        let emissions = round2(fuel_used * factor.kg_co2_per_unit);
        if !emissions.is_finite() {
            return Err(PredictionError::InvalidInput {
                field: "distance",
                value: distance_km,
            });
        }
        debug!(
            vehicle_type,
            fuel_type, distance_km, mileage, emissions, "predicted emissions"
        );
        Ok(Prediction::new(emissions))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn default_factors() -> Vec<EmissionFactor> {
    vec![
        EmissionFactor::new("Car", "Petrol", 2.31, 5.0, 40.0),
        EmissionFactor::new("Car", "Diesel", 2.68, 5.0, 40.0),
        EmissionFactor::new("Car", "Electric", 0.82, 10.0, 60.0),
        EmissionFactor::new("Car", "CNG", 2.75, 10.0, 40.0),
        EmissionFactor::new("Bus", "Diesel", 2.68, 2.0, 10.0),
        EmissionFactor::new("Bus", "CNG", 2.75, 2.0, 10.0),
        EmissionFactor::new("Motorcycle", "Petrol", 2.31, 20.0, 80.0),
        EmissionFactor::new("Truck", "Diesel", 2.68, 2.0, 12.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_emissions_from_fuel_used() {
        let predictor = FactorTablePredictor::with_defaults();
        let prediction = predictor
            .predict("Car", "Petrol", 28.0, 14.0)
            .expect("supported");
        // 2 litres * 2.31
        assert!((prediction.emissions - 4.62).abs() < 1e-9);
        assert_eq!(prediction.interpretation, "Low impact");
    }

    #[test]
    fn matching_ignores_case() {
        let predictor = FactorTablePredictor::with_defaults();
        assert!(predictor.predict("car", "DIESEL", 10.0, 18.0).is_ok());
        assert!(predictor.predict("motorcycle", "petrol", 10.0, 35.0).is_ok());
    }

    #[test]
    fn unknown_pair_and_out_of_range_mileage_are_unsupported() {
        let predictor = FactorTablePredictor::with_defaults();
        assert!(matches!(
            predictor.predict("Motorcycle", "Electric", 10.0, 40.0),
            Err(PredictionError::UnsupportedCombination { .. })
        ));
        assert!(matches!(
            predictor.predict("Bus", "Diesel", 10.0, 25.0),
            Err(PredictionError::UnsupportedCombination { .. })
        ));
        assert!(matches!(
            predictor.predict("Car", "Petrol", 10.0, 0.0),
            Err(PredictionError::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn rejects_negative_or_non_finite_inputs() {
        let predictor = FactorTablePredictor::with_defaults();
        assert_eq!(
            predictor.predict("Car", "Petrol", -1.0, 14.0),
            Err(PredictionError::InvalidInput {
                field: "distance",
                value: -1.0
            })
        );
        assert!(predictor.predict("Car", "Petrol", 5.0, f64::NAN).is_err());
    }

    #[test]
    fn empty_factor_list_uses_builtin_table() {
        let predictor = FactorTablePredictor::from_factors(Vec::new());
        assert!(predictor.predict("Truck", "Diesel", 10.0, 8.0).is_ok());

        let custom =
            FactorTablePredictor::from_factors(vec![EmissionFactor::new("Tram", "Grid", 0.1, 1.0, 9.0)]);
        assert!(custom.predict("Tram", "Grid", 10.0, 5.0).is_ok());
        assert!(custom.predict("Car", "Petrol", 10.0, 14.0).is_err());
    }

    #[test]
    fn overflowing_distance_is_rejected() {
        let predictor = FactorTablePredictor::with_defaults();
        assert_eq!(
            predictor.predict("Car", "Petrol", 1e308, 12.5),
            Err(PredictionError::InvalidInput {
                field: "distance",
                value: 1e308
            })
        );
        assert!(predictor.predict("Car", "Petrol", 1e307, 5.0).is_err());
    }
}
