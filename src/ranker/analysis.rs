use crate::predictor::EmissionsPredictor;
use crate::ranker::savings::compute_savings;
use crate::ranker::AnalysisError;
use crate::types::{RouteAnalysisResult, RouteCandidate, ScoredRoute, TripRequest};

/// Scores, sorts, and summarizes `candidates` for the vehicle in `request`.
///
/// Every candidate needs an emissions value, so the first predictor failure
/// aborts the analysis.
pub fn build_route_analysis(
    predictor: &dyn EmissionsPredictor,
    request: &TripRequest,
    candidates: Vec<RouteCandidate>,
) -> Result<RouteAnalysisResult, AnalysisError> {
    if candidates.is_empty() {
        return Err(AnalysisError::NoCandidates);
    }

    let mut routes = candidates
        .into_iter()
        .map(|candidate| score_route(predictor, request, candidate))
        .collect::<Result<Vec<_>, _>>()?;

    routes.sort_by(|a, b| a.emissions.total_cmp(&b.emissions));

    let eco_recommended_route = routes
        .first()
        .map(|r| r.name().to_string())
        .ok_or(AnalysisError::NoCandidates)?;
    let eco_savings = compute_savings(&routes);

    Ok(RouteAnalysisResult {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        routes,
        eco_recommended_route,
        eco_savings,
    })
}

fn score_route(
    predictor: &dyn EmissionsPredictor,
    request: &TripRequest,
    candidate: RouteCandidate,
) -> Result<ScoredRoute, AnalysisError> {
    let prediction = predictor
        .predict(
            &request.vehicle_type,
            &request.fuel_type,
            candidate.distance,
            request.mileage,
        )
        .map_err(|source| AnalysisError::Prediction {
            route: candidate.name.clone(),
            source,
        })?;

    Ok(ScoredRoute {
        candidate,
        emissions: prediction.emissions,
        emissions_interpretation: prediction.interpretation,
    })
}
