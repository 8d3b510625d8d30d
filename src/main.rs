use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eco_route_planner::config::{Config, ConfigOverrides};
use eco_route_planner::output::csv::{alternatives_to_csv, routes_to_csv};
use eco_route_planner::output::json::render_json;
use eco_route_planner::output::table::{
    render_alternatives_table, render_plan_table, render_routes_table,
};
use eco_route_planner::ranker::EcoRanker;
use eco_route_planner::routes::FixedRouteSource;
use eco_route_planner::server::run_server;
use eco_route_planner::types::{AlternativesResult, RouteAnalysisResult, RouteCandidate, TripPlan};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "eco-route-planner",
    about = "Rank routes and transport modes by estimated CO2 emissions"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Seed for the placeholder route generator.
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct TripArgs {
    #[arg(long)]
    origin: Option<String>,
    #[arg(long)]
    destination: Option<String>,
    #[arg(long = "vehicle")]
    vehicle_type: Option<String>,
    #[arg(long = "fuel")]
    fuel_type: Option<String>,
    /// km per unit of fuel.
    #[arg(long)]
    mileage: Option<f64>,
    /// Explicit candidate as NAME:KM:MIN[:TRAFFIC]; repeat for more.
    #[arg(long = "candidate")]
    candidates: Vec<RouteCandidate>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Routes {
        #[command(flatten)]
        trip: TripArgs,
    },
    Alternatives {
        #[arg(long)]
        distance: f64,
    },
    Plan {
        #[command(flatten)]
        trip: TripArgs,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let trip_args = match &cli.command {
        Commands::Routes { trip } | Commands::Plan { trip } => trip.clone(),
        _ => TripArgs::default(),
    };
    config.apply_overrides(ConfigOverrides {
        origin: trip_args.origin.clone(),
        destination: trip_args.destination.clone(),
        vehicle_type: trip_args.vehicle_type.clone(),
        fuel_type: trip_args.fuel_type.clone(),
        mileage: trip_args.mileage,
        seed: cli.seed,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let mut ranker = EcoRanker::from_config(&config);
    if !trip_args.candidates.is_empty() {
        info!("using {} explicit route candidates", trip_args.candidates.len());
        ranker = ranker.with_route_source(Arc::new(FixedRouteSource::new(trip_args.candidates)));
    }
    let request = config.trip_request();
    if !request.mileage.is_finite() || request.mileage < 0.0 {
        return Err(anyhow!("mileage must be a non-negative number"));
    }

    match &cli.command {
        Commands::Routes { .. } => {
            let result = ranker.analyze_routes(&request)?;
            print_routes(&result, cli.output)?;
        }
        Commands::Alternatives { distance } => {
            if !distance.is_finite() || *distance < 0.0 {
                return Err(anyhow!("distance must be a non-negative number"));
            }
            let result = ranker.compare_alternatives(*distance);
            print_alternatives(&result, cli.output)?;
        }
        Commands::Plan { .. } => {
            let plan = ranker.plan_trip(&request)?;
            print_plan(&plan, cli.output)?;
        }
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_routes(result: &RouteAnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_routes_table(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => println!("{}", routes_to_csv(result)?),
    }
    Ok(())
}

fn print_alternatives(result: &AlternativesResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_alternatives_table(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => println!("{}", alternatives_to_csv(result)?),
    }
    Ok(())
}

fn print_plan(plan: &TripPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_plan_table(plan)),
        OutputFormat::Json => println!("{}", render_json(plan)?),
        OutputFormat::Csv => {
            warn!("CSV output for plan has no single table, printing both sections");
            println!("{}", routes_to_csv(&plan.analysis)?);
            println!("{}", alternatives_to_csv(&plan.alternatives)?);
        }
    }
    Ok(())
}
