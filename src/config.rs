use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::predictor::EmissionFactor;
use crate::types::{AlternativeCandidate, TripRequest};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub predictor: PredictorConfig,
    #[serde(default)]
    pub alternatives: AlternativesConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Defaults for any trip field a caller leaves out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default = "default_vehicle_type")]
    pub vehicle_type: String,
    #[serde(default = "default_fuel_type")]
    pub fuel_type: String,
    #[serde(default = "default_mileage")]
    pub mileage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutesConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictorConfig {
    /// Replaces the built-in factor table when non-empty.
    #[serde(default)]
    pub factors: Vec<EmissionFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlternativesConfig {
    /// Replaces the built-in catalog when non-empty.
    #[serde(default)]
    pub catalog: Vec<AlternativeCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub mileage: Option<f64>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/eco-route-planner/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(origin) = overrides.origin {
            self.trip.origin = origin;
        }
        if let Some(destination) = overrides.destination {
            self.trip.destination = destination;
        }
        if let Some(vehicle_type) = overrides.vehicle_type {
            self.trip.vehicle_type = vehicle_type;
        }
        if let Some(fuel_type) = overrides.fuel_type {
            self.trip.fuel_type = fuel_type;
        }
        if let Some(mileage) = overrides.mileage {
            self.trip.mileage = mileage;
        }
        if overrides.seed.is_some() {
            self.routes.seed = overrides.seed;
        }
    }

    pub fn trip_request(&self) -> TripRequest {
        TripRequest::new(&self.trip.origin, &self.trip.destination).with_vehicle(
            &self.trip.vehicle_type,
            &self.trip.fuel_type,
            self.trip.mileage,
        )
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[trip]
origin = "Downtown"
destination = "Suburb"
vehicle_type = "Car"
fuel_type = "Petrol"
mileage = 12.5

[routes]
# seed = 42

[server]
host = "127.0.0.1"
port = 3001

# Custom emission factors replace the built-in table.
# [[predictor.factors]]
# vehicle_type = "Car"
# fuel_type = "Petrol"
# kg_co2_per_unit = 2.31
# min_mileage = 5.0
# max_mileage = 40.0

# Custom transport modes replace the built-in catalog.
# [[alternatives.catalog]]
# vehicle = "Bicycle"
# fuel = "Human"
# mileage = 0.0
"#;
        template.to_string()
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            destination: default_destination(),
            vehicle_type: default_vehicle_type(),
            fuel_type: default_fuel_type(),
            mileage: default_mileage(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_origin() -> String {
    "Downtown".to_string()
}

fn default_destination() -> String {
    "Suburb".to_string()
}

fn default_vehicle_type() -> String {
    "Car".to_string()
}

fn default_fuel_type() -> String {
    "Petrol".to_string()
}

fn default_mileage() -> f64 {
    12.5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).expect("template");
        assert_eq!(parsed.trip.vehicle_type, "Car");
        assert!((parsed.trip.mileage - 12.5).abs() < 1e-9);
        assert_eq!(parsed.routes.seed, None);
        assert_eq!(parsed.server.port, 3001);
        assert!(parsed.predictor.factors.is_empty());
        assert!(parsed.alternatives.catalog.is_empty());
    }

    #[test]
    fn parses_custom_tables() {
        let parsed: Config = toml::from_str(
            r#"
[routes]
seed = 9

[[predictor.factors]]
vehicle_type = "Tram"
fuel_type = "Grid"
kg_co2_per_unit = 0.1
min_mileage = 1.0
max_mileage = 9.0

[[alternatives.catalog]]
vehicle = "Tram"
fuel = "Grid"
mileage = 4.0
"#,
        )
        .expect("config");
        assert_eq!(parsed.routes.seed, Some(9));
        assert_eq!(parsed.predictor.factors[0].vehicle_type, "Tram");
        assert_eq!(parsed.alternatives.catalog[0].vehicle, "Tram");
        assert_eq!(parsed.trip.origin, "Downtown");
    }

    #[test]
    fn overrides_replace_trip_fields() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            fuel_type: Some("Diesel".to_string()),
            mileage: Some(18.0),
            seed: Some(3),
            ..Default::default()
        });
        let request = config.trip_request();
        assert_eq!(request.vehicle_type, "Car");
        assert_eq!(request.fuel_type, "Diesel");
        assert!((request.mileage - 18.0).abs() < 1e-9);
        assert_eq!(config.routes.seed, Some(3));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/eco-route-planner.toml")))
            .expect("defaults");
        assert_eq!(config.trip.destination, "Suburb");
    }
}
