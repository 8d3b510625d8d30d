use tracing::{debug, warn};

use crate::catalog::AlternativeCatalog;
use crate::predictor::EmissionsPredictor;
use crate::ranker::ECO_FRIENDLY_THRESHOLD_KG;
use crate::types::{AlternativeCandidate, AlternativesResult, ScoredAlternative};

/// Scores every catalog entry for `distance_km`.
///
/// Entries the predictor cannot handle are dropped and logged; they never fail
/// the comparison as a whole.
pub fn score_alternatives(
    predictor: &dyn EmissionsPredictor,
    catalog: &AlternativeCatalog,
    distance_km: f64,
) -> AlternativesResult {
    let mut alternatives = catalog
        .entries()
        .iter()
        .fold(Vec::new(), |mut scored, entry| {
            if let Some(alt) = score_entry(predictor, entry, distance_km) {
                scored.push(alt);
            }
            scored
        });

    alternatives.sort_by(|a, b| a.emissions.total_cmp(&b.emissions));
    let eco_recommended = alternatives.first().map(|a| a.vehicle.clone());

    AlternativesResult {
        alternatives,
        eco_recommended,
    }
}

fn score_entry(
    predictor: &dyn EmissionsPredictor,
    entry: &AlternativeCandidate,
    distance_km: f64,
) -> Option<ScoredAlternative> {
    if entry.is_human_powered() {
        return Some(ScoredAlternative {
            vehicle: entry.vehicle.clone(),
            fuel: entry.fuel.clone(),
            emissions: 0.0,
            is_eco_friendly: true,
        });
    }

    match predictor.predict(entry.vehicle_type(), &entry.fuel, distance_km, entry.mileage) {
        Ok(prediction) => {
            debug!(vehicle = %entry.vehicle, emissions = prediction.emissions, "scored alternative");
            Some(ScoredAlternative {
                vehicle: entry.vehicle.clone(),
                fuel: entry.fuel.clone(),
                emissions: prediction.emissions,
                is_eco_friendly: prediction.emissions < ECO_FRIENDLY_THRESHOLD_KG,
            })
        }
        Err(err) => {
            warn!("skipped {}: {err}", entry.vehicle);
            None
        }
    }
}
