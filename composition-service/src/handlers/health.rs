use crate::models::HealthStatus;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Liveness plus whether a credential is present right now.
///
/// Never calls the upstream API.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.credentials.is_configured()))
}
