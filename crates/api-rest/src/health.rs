//! Health check endpoint.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer checks.
pub async fn health_handler() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "CogKit results server is alive".into(),
    })
}
