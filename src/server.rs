use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::ranker::{AnalysisError, EcoRanker};
use crate::types::{AlternativesResult, RouteAnalysisResult, TripPlan, TripRequest};

#[derive(Clone)]
struct ApiState {
    config: Config,
    ranker: Arc<EcoRanker>,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    generated_at: DateTime<Utc>,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        if error.is_invalid_request() {
            Self::bad_request(error.to_string())
        } else {
            warn!("route analysis failed: {error}");
            Self::internal(error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Trip fields left out of a request fall back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct TripContextRequest {
    origin: Option<String>,
    destination: Option<String>,
    #[serde(alias = "vehicleType")]
    vehicle_type: Option<String>,
    #[serde(alias = "fuelType")]
    fuel_type: Option<String>,
    mileage: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlternativesRequest {
    distance: f64,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    predictor: String,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let ranker = EcoRanker::from_config(&config);
    let app = build_router(config, ranker);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(config: Config, ranker: EcoRanker) -> Router {
    let state = ApiState {
        config,
        ranker: Arc::new(ranker),
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/routes", post(routes))
        .route("/v1/alternatives", post(alternatives))
        .route("/v1/plan", post(plan))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        predictor: state.ranker.predictor().name().to_string(),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn routes(
    State(state): State<ApiState>,
    Json(request): Json<TripContextRequest>,
) -> ApiResult<RouteAnalysisResult> {
    let trip = resolve_trip(&state.config, request)?;
    let result = state.ranker.analyze_routes(&trip)?;
    Ok(ok(result))
}

async fn alternatives(
    State(state): State<ApiState>,
    Json(request): Json<AlternativesRequest>,
) -> ApiResult<AlternativesResult> {
    if !request.distance.is_finite() || request.distance < 0.0 {
        return Err(ApiError::bad_request(format!(
            "distance must be a non-negative number, got {}",
            request.distance
        )));
    }
    Ok(ok(state.ranker.compare_alternatives(request.distance)))
}

async fn plan(
    State(state): State<ApiState>,
    Json(request): Json<TripContextRequest>,
) -> ApiResult<TripPlan> {
    let trip = resolve_trip(&state.config, request)?;
    let plan = state.ranker.plan_trip(&trip)?;
    Ok(ok(plan))
}

fn resolve_trip(
    config: &Config,
    request: TripContextRequest,
) -> std::result::Result<TripRequest, ApiError> {
    let defaults = &config.trip;
    let mileage = request.mileage.unwrap_or(defaults.mileage);
    if !mileage.is_finite() || mileage < 0.0 {
        return Err(ApiError::bad_request(format!(
            "mileage must be a non-negative number, got {mileage}"
        )));
    }
    let origin = request.origin.unwrap_or_else(|| defaults.origin.clone());
    let destination = request
        .destination
        .unwrap_or_else(|| defaults.destination.clone());
    let vehicle_type = request
        .vehicle_type
        .unwrap_or_else(|| defaults.vehicle_type.clone());
    let fuel_type = request
        .fuel_type
        .unwrap_or_else(|| defaults.fuel_type.clone());

    Ok(TripRequest::new(&origin, &destination).with_vehicle(&vehicle_type, &fuel_type, mileage))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        ok: true,
        generated_at: Utc::now(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::config::Config;
    use crate::predictor::FactorTablePredictor;
    use crate::ranker::EcoRanker;
    use crate::routes::FixedRouteSource;
    use crate::types::RouteCandidate;

    fn app() -> axum::Router {
        let ranker = EcoRanker::new(
            Arc::new(FactorTablePredictor::with_defaults()),
            Arc::new(FixedRouteSource::new(vec![
                RouteCandidate::new("Route A (Fastest)", 24.0, 30.0),
                RouteCandidate::new("Route B (Shortest)", 12.0, 41.0),
            ])),
        );
        build_router(Config::default(), ranker)
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = tokio_test::assert_ok!(serde_json::from_slice::<Value>(&bytes));
        (status, value)
    }

    #[tokio::test]
    async fn routes_endpoint_fills_defaults_and_ranks() {
        let (status, body) = post("/v1/routes", json!({ "origin": "Harbour" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["origin"], "Harbour");
        assert_eq!(body["data"]["destination"], "Suburb");
        assert_eq!(body["data"]["eco_recommended_route"], "Route B (Shortest)");
        assert!(body["data"]["eco_savings"]["vs_worst_route"].as_f64().is_some());
    }

    #[tokio::test]
    async fn unsupported_vehicle_is_a_bad_request() {
        let (status, body) = post(
            "/v1/routes",
            json!({ "vehicleType": "Hovercraft", "fuelType": "Petrol" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("Hovercraft")));
    }

    #[tokio::test]
    async fn alternatives_endpoint_validates_distance() {
        let (status, body) = post("/v1/alternatives", json!({ "distance": 20.0 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["alternatives"].as_array().map(Vec::len), Some(7));

        let (status, _) = post("/v1/alternatives", json!({ "distance": -3.0 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_endpoint_returns_both_sections() {
        let (status, body) = post("/v1/plan", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["analysis"]["eco_recommended_route"],
            "Route B (Shortest)"
        );
        assert!(body["data"]["alternatives"]["eco_recommended"].is_string());
    }
}
