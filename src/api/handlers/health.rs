//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: The mapping store answers
/// - **503 Service Unavailable**: The mapping store is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Connected, 12 mappings" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Pings the mapping store and reports the cached link total.
async fn check_store(state: &AppState) -> CheckStatus {
    if state.repository.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Connected, {} mappings",
                state.stats_service.total_shortened_links()
            )),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Store connection failed".to_string()),
        }
    }
}
