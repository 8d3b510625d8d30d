use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::types::{AlternativesResult, RouteAnalysisResult, TripPlan};

pub fn render_routes_table(result: &RouteAnalysisResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Rank",
        "Route",
        "Distance (km)",
        "Time (min)",
        "Traffic",
        "CO2 (kg)",
        "Impact",
    ]);

    for (idx, route) in result.routes.iter().enumerate() {
        let name_cell = if route.name() == result.eco_recommended_route {
            Cell::new(route.name()).fg(Color::Green)
        } else {
            Cell::new(route.name())
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            name_cell,
            Cell::new(format!("{:.1}", route.candidate.distance)),
            Cell::new(format!("{:.1}", route.candidate.time)),
            Cell::new(&route.candidate.traffic),
            Cell::new(format!("{:.2}", route.emissions)),
            Cell::new(&route.emissions_interpretation),
        ]));
    }

    format!(
        "{table}\n{} -> {}\nEco-recommended route: {}\nPotential CO2 savings: {:.2} kg ({:.1}%)",
        result.origin,
        result.destination,
        result.eco_recommended_route,
        result.eco_savings.absolute,
        result.eco_savings.percentage
    )
}

pub fn render_alternatives_table(result: &AlternativesResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Mode", "Fuel", "CO2 (kg)", "Eco-friendly"]);

    for (idx, alt) in result.alternatives.iter().enumerate() {
        let eco_cell = if alt.is_eco_friendly {
            Cell::new("YES").fg(Color::Green)
        } else {
            Cell::new("NO").fg(Color::Red)
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(&alt.vehicle),
            Cell::new(&alt.fuel),
            Cell::new(format!("{:.2}", alt.emissions)),
            eco_cell,
        ]));
    }

    let recommended = result.eco_recommended.as_deref().unwrap_or("-");
    format!("{table}\nMost eco-friendly option: {recommended}")
}

pub fn render_plan_table(plan: &TripPlan) -> String {
    format!(
        "{}\n\n{}",
        render_routes_table(&plan.analysis),
        render_alternatives_table(&plan.alternatives)
    )
}
