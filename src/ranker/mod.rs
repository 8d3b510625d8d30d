pub mod alternatives;
pub mod analysis;
pub mod savings;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::catalog::AlternativeCatalog;
use crate::config::Config;
use crate::predictor::{EmissionsPredictor, FactorTablePredictor, PredictionError};
use crate::ranker::alternatives::score_alternatives;
use crate::ranker::analysis::build_route_analysis;
use crate::routes::{RandomRouteSource, RouteSource};
use crate::types::{AlternativesResult, RouteAnalysisResult, TripPlan, TripRequest};

/// kg CO2 below which a predicted alternative counts as eco-friendly,
/// whatever the trip distance.
pub const ECO_FRIENDLY_THRESHOLD_KG: f64 = 10.0;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    RouteSource(#[from] anyhow::Error),
    #[error("route source returned no candidates")]
    NoCandidates,
    #[error("emissions prediction failed for {route}: {source}")]
    Prediction {
        route: String,
        #[source]
        source: PredictionError,
    },
}

impl AnalysisError {
    /// True when the request itself was at fault rather than a collaborator.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::Prediction { .. })
    }
}

/// Ranks routes and transport alternatives by predicted emissions.
#[derive(Clone)]
pub struct EcoRanker {
    predictor: Arc<dyn EmissionsPredictor>,
    routes: Arc<dyn RouteSource>,
    catalog: AlternativeCatalog,
}

impl EcoRanker {
    pub fn new(predictor: Arc<dyn EmissionsPredictor>, routes: Arc<dyn RouteSource>) -> Self {
        Self {
            predictor,
            routes,
            catalog: AlternativeCatalog::with_defaults(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let predictor = FactorTablePredictor::from_factors(config.predictor.factors.clone());
        let routes = RandomRouteSource::from_seed(config.routes.seed);
        Self::new(Arc::new(predictor), Arc::new(routes)).with_catalog(
            AlternativeCatalog::from_entries(config.alternatives.catalog.clone()),
        )
    }

    pub fn with_catalog(mut self, catalog: AlternativeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_route_source(mut self, routes: Arc<dyn RouteSource>) -> Self {
        self.routes = routes;
        self
    }

    pub fn predictor(&self) -> &dyn EmissionsPredictor {
        self.predictor.as_ref()
    }

    pub fn analyze_routes(&self, request: &TripRequest) -> Result<RouteAnalysisResult, AnalysisError> {
        let candidates = self
            .routes
            .generate_routes(&request.origin, &request.destination)?;
        let result = build_route_analysis(self.predictor.as_ref(), request, candidates)?;
        info!(
            origin = %result.origin,
            destination = %result.destination,
            source = self.routes.name(),
            predictor = self.predictor.name(),
            "recommended {} ({} candidates)",
            result.eco_recommended_route,
            result.routes.len()
        );
        Ok(result)
    }

    pub fn compare_alternatives(&self, distance_km: f64) -> AlternativesResult {
        score_alternatives(self.predictor.as_ref(), &self.catalog, distance_km)
    }

    /// Route analysis followed by an alternatives comparison over the
    /// recommended route's distance.
    pub fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, AnalysisError> {
        let analysis = self.analyze_routes(request)?;
        let distance = analysis
            .recommended()
            .map(|r| r.candidate.distance)
            .ok_or(AnalysisError::NoCandidates)?;
        let alternatives = self.compare_alternatives(distance);
        Ok(TripPlan {
            analysis,
            alternatives,
        })
    }
}
