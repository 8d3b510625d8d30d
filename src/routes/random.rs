use std::sync::Mutex;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::routes::{RouteProfile, RouteSource};
use crate::types::RouteCandidate;

/// Stand-in for a mapping backend: one candidate per [`RouteProfile`] with
/// distance and time drawn uniformly from the profile's ranges.
pub struct RandomRouteSource {
    rng: Mutex<StdRng>,
}

impl RandomRouteSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }
}

impl Default for RandomRouteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSource for RandomRouteSource {
    fn name(&self) -> &str {
        "random"
    }

    fn generate_routes(&self, _origin: &str, _destination: &str) -> Result<Vec<RouteCandidate>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow!("route generator rng mutex poisoned"))?;
        let routes: Vec<RouteCandidate> = RouteProfile::ALL
            .iter()
            .map(|profile| {
                let distance = rng.gen_range(profile.distance_range());
                let time = rng.gen_range(profile.time_range());
                RouteCandidate::new(profile.route_name(), distance, time)
                    .with_traffic(profile.traffic())
            })
            .collect();
        Ok(routes)
    }
}
