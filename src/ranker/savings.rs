use crate::types::{EcoSavings, ScoredRoute};

/// Savings of the first (best) route against the last (worst) one.
///
/// `routes` must already be sorted ascending by emissions. When the worst
/// route emits nothing the percentage is 0; non-finite emissions yield no
/// savings at all.
pub fn compute_savings(routes: &[ScoredRoute]) -> EcoSavings {
    let (Some(best), Some(worst)) = (routes.first(), routes.last()) else {
        return EcoSavings::default();
    };
    if !best.emissions.is_finite() || !worst.emissions.is_finite() {
        return EcoSavings::default();
    }
    let absolute = worst.emissions - best.emissions;
    let percentage = if worst.emissions > 0.0 {
        absolute / worst.emissions * 100.0
    } else {
        0.0
    };
    EcoSavings {
        absolute,
        percentage,
    }
}
