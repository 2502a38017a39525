//! Liveness handler.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

/// Liveness marker response
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    /// Service marker
    #[schema(example = "tally api up")]
    pub msg: String,
}

/// Liveness endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = RootResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        msg: "tally api up".to_string(),
    })
}
