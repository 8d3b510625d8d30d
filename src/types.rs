use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fuel label marking catalog entries that never go through the predictor.
pub const HUMAN_FUEL: &str = "Human";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteCandidate {
    pub name: String,
    /// Kilometres.
    pub distance: f64,
    /// Minutes.
    pub time: f64,
    pub traffic: String,
}

impl RouteCandidate {
    pub fn new(name: &str, distance: f64, time: f64) -> Self {
        Self {
            name: name.to_string(),
            distance,
            time,
            traffic: "Unknown".to_string(),
        }
    }

    pub fn with_traffic(mut self, traffic: &str) -> Self {
        self.traffic = traffic.to_string();
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RouteParseError {
    #[error("expected NAME:KM:MIN[:TRAFFIC], got {0:?}")]
    Shape(String),
    #[error("invalid {field} {value:?}: must be a positive number")]
    Number { field: &'static str, value: String },
}

impl FromStr for RouteCandidate {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, ':').map(str::trim).collect();
        if parts.len() < 3 || parts[0].is_empty() {
            return Err(RouteParseError::Shape(s.to_string()));
        }
        let distance = parse_positive("distance", parts[1])?;
        let time = parse_positive("time", parts[2])?;
        let mut candidate = RouteCandidate::new(parts[0], distance, time);
        if let Some(traffic) = parts.get(3).filter(|t| !t.is_empty()) {
            candidate = candidate.with_traffic(traffic);
        }
        Ok(candidate)
    }
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64, RouteParseError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(RouteParseError::Number {
            field,
            value: raw.to_string(),
        }),
    }
}

/// A route candidate after the predictor has scored it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRoute {
    #[serde(flatten)]
    pub candidate: RouteCandidate,
    /// kg CO2.
    pub emissions: f64,
    pub emissions_interpretation: String,
}

impl ScoredRoute {
    pub fn name(&self) -> &str {
        &self.candidate.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeCandidate {
    pub vehicle: String,
    pub fuel: String,
    /// km per unit of fuel, 0 for human powered modes.
    pub mileage: f64,
}

impl AlternativeCandidate {
    pub fn new(vehicle: &str, fuel: &str, mileage: f64) -> Self {
        Self {
            vehicle: vehicle.to_string(),
            fuel: fuel.to_string(),
            mileage,
        }
    }

    /// Only the fuel decides; a "Bicycle" on any other fuel is still predicted.
    pub fn is_human_powered(&self) -> bool {
        self.fuel.trim().eq_ignore_ascii_case(HUMAN_FUEL)
    }

    /// Vehicle type understood by the predictor: the label up to its first space,
    /// so "Car (Petrol)" becomes "Car".
    pub fn vehicle_type(&self) -> &str {
        self.vehicle.split(' ').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAlternative {
    pub vehicle: String,
    pub fuel: String,
    pub emissions: f64,
    pub is_eco_friendly: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct EcoSavings {
    /// Worst minus best emissions in kg CO2.
    #[serde(rename = "vs_worst_route", alias = "absolute")]
    pub absolute: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteAnalysisResult {
    pub origin: String,
    pub destination: String,
    pub routes: Vec<ScoredRoute>,
    pub eco_recommended_route: String,
    pub eco_savings: EcoSavings,
}

impl RouteAnalysisResult {
    pub fn recommended(&self) -> Option<&ScoredRoute> {
        self.routes.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlternativesResult {
    pub alternatives: Vec<ScoredAlternative>,
    /// `None` when no alternative could be scored.
    pub eco_recommended: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    #[serde(alias = "vehicleType")]
    pub vehicle_type: String,
    #[serde(alias = "fuelType")]
    pub fuel_type: String,
    pub mileage: f64,
}

impl TripRequest {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            vehicle_type: "Car".to_string(),
            fuel_type: "Petrol".to_string(),
            mileage: 12.5,
        }
    }

    pub fn with_vehicle(mut self, vehicle_type: &str, fuel_type: &str, mileage: f64) -> Self {
        self.vehicle_type = vehicle_type.to_string();
        self.fuel_type = fuel_type.to_string();
        self.mileage = mileage;
        self
    }
}

/// Route analysis plus the alternatives at the recommended route's distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPlan {
    pub analysis: RouteAnalysisResult,
    pub alternatives: AlternativesResult,
}
