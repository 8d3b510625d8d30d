use anyhow::Result;

use crate::types::{AlternativesResult, RouteAnalysisResult};

pub fn routes_to_csv(result: &RouteAnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "route",
        "distance_km",
        "time_min",
        "traffic",
        "emissions_kg",
        "interpretation",
        "eco_recommended",
    ])?;
    for (idx, route) in result.routes.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            route.candidate.name.clone(),
            format!("{:.2}", route.candidate.distance),
            format!("{:.1}", route.candidate.time),
            route.candidate.traffic.clone(),
            format!("{:.4}", route.emissions),
            route.emissions_interpretation.clone(),
            (route.name() == result.eco_recommended_route).to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn alternatives_to_csv(result: &AlternativesResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["rank", "vehicle", "fuel", "emissions_kg", "eco_friendly"])?;
    for (idx, alt) in result.alternatives.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            alt.vehicle.clone(),
            alt.fuel.clone(),
            format!("{:.4}", alt.emissions),
            alt.is_eco_friendly.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EcoSavings, RouteCandidate, ScoredAlternative, ScoredRoute};

    #[test]
    fn routes_csv_marks_recommended_route() {
        let result = RouteAnalysisResult {
            origin: "A".to_string(),
            destination: "B".to_string(),
            routes: vec![
                ScoredRoute {
                    candidate: RouteCandidate::new("Route B (Shortest)", 9.0, 25.0)
                        .with_traffic("Moderate"),
                    emissions: 1.5,
                    emissions_interpretation: "Low impact".to_string(),
                },
                ScoredRoute {
                    candidate: RouteCandidate::new("Route C (Alternative)", 20.0, 40.0)
                        .with_traffic("Low"),
                    emissions: 3.0,
                    emissions_interpretation: "Low impact".to_string(),
                },
            ],
            eco_recommended_route: "Route B (Shortest)".to_string(),
            eco_savings: EcoSavings {
                absolute: 1.5,
                percentage: 50.0,
            },
        };
        let csv = routes_to_csv(&result).expect("csv");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,Route B (Shortest),9.00,25.0,Moderate,1.5000,Low impact,true"
        );
        assert!(lines[2].ends_with(",false"));
    }

    #[test]
    fn alternatives_csv_has_one_row_per_mode() {
        let result = AlternativesResult {
            alternatives: vec![ScoredAlternative {
                vehicle: "Walking".to_string(),
                fuel: "Human".to_string(),
                emissions: 0.0,
                is_eco_friendly: true,
            }],
            eco_recommended: Some("Walking".to_string()),
        };
        let csv = alternatives_to_csv(&result).expect("csv");
        assert_eq!(
            csv.lines().collect::<Vec<_>>(),
            vec![
                "rank,vehicle,fuel,emissions_kg,eco_friendly",
                "1,Walking,Human,0.0000,true"
            ]
        );
    }
}
