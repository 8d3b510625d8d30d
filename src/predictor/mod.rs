pub mod factor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use factor::{EmissionFactor, FactorTablePredictor};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// kg CO2.
    pub emissions: f64,
    pub interpretation: String,
}

impl Prediction {
    pub fn new(emissions: f64) -> Self {
        Self {
            emissions,
            interpretation: interpret_emissions(emissions).to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    #[error("unsupported combination: {vehicle_type}/{fuel_type} at mileage {mileage}")]
    UnsupportedCombination {
        vehicle_type: String,
        fuel_type: String,
        mileage: f64,
    },
    #[error("invalid {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// Estimates trip emissions for a vehicle/fuel pair.
///
/// Implementations must be safe to call from several threads at once; the
/// ranker holds one instance for its whole lifetime.
pub trait EmissionsPredictor: Send + Sync {
    fn name(&self) -> &str;

    fn predict(
        &self,
        vehicle_type: &str,
        fuel_type: &str,
        distance_km: f64,
        mileage: f64,
    ) -> Result<Prediction, PredictionError>;
}

pub fn interpret_emissions(emissions: f64) -> &'static str {
    if emissions < 1.0 {
        "Very low impact"
    } else if emissions < 5.0 {
        "Low impact"
    } else if emissions < 15.0 {
        "Moderate impact"
    } else if emissions < 30.0 {
        "High impact"
    } else {
        "Very high impact"
    }
}
