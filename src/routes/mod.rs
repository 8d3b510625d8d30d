pub mod fixed;
pub mod random;

use std::ops::Range;

use anyhow::Result;

use crate::types::RouteCandidate;

pub use fixed::FixedRouteSource;
pub use random::RandomRouteSource;

/// Supplies the candidate routes the ranker compares.
///
/// The placeholder sources ignore origin and destination; a mapping backend
/// would use them to look up real alternatives.
pub trait RouteSource: Send + Sync {
    fn name(&self) -> &str;
    fn generate_routes(&self, origin: &str, destination: &str) -> Result<Vec<RouteCandidate>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteProfile {
    Fastest,
    Shortest,
    Alternative,
}

impl RouteProfile {
    pub const ALL: [RouteProfile; 3] = [
        RouteProfile::Fastest,
        RouteProfile::Shortest,
        RouteProfile::Alternative,
    ];

    pub fn route_name(&self) -> &'static str {
        match self {
            Self::Fastest => "Route A (Fastest)",
            Self::Shortest => "Route B (Shortest)",
            Self::Alternative => "Route C (Alternative)",
        }
    }

    /// Kilometres.
    pub fn distance_range(&self) -> Range<f64> {
        match self {
            Self::Fastest => 10.0..30.0,
            Self::Shortest => 8.0..25.0,
            Self::Alternative => 12.0..35.0,
        }
    }

    /// Minutes.
    pub fn time_range(&self) -> Range<f64> {
        match self {
            Self::Fastest => 15.0..45.0,
            Self::Shortest => 20.0..60.0,
            Self::Alternative => 25.0..70.0,
        }
    }

    pub fn traffic(&self) -> &'static str {
        match self {
            Self::Fastest => "Low to Moderate",
            Self::Shortest => "Moderate",
            Self::Alternative => "Low",
        }
    }
}
