//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Always returns 200; `db_healthy` reports whether a `SELECT 1` succeeded
/// so load balancers can distinguish a dead process from a dead database.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = presswire_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
