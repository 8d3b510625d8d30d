use anyhow::Result;

use crate::routes::RouteSource;
use crate::types::RouteCandidate;

/// Returns the same caller-supplied candidates on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedRouteSource {
    routes: Vec<RouteCandidate>,
}

impl FixedRouteSource {
    pub fn new(routes: Vec<RouteCandidate>) -> Self {
        Self { routes }
    }
}

impl RouteSource for FixedRouteSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn generate_routes(&self, _origin: &str, _destination: &str) -> Result<Vec<RouteCandidate>> {
        Ok(self.routes.clone())
    }
}
