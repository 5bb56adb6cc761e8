//! Handlers HTTP

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use super::AppState;
use crate::api::OverlapRequest;
use crate::error::OverlapError;
use crate::pipeline::run_overlap;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

/// `POST /overlap`
///
/// Retourne les parcelles recouvertes par le polygone de la requête.
pub async fn overlap(
    state: web::Data<AppState>,
    request: web::Json<OverlapRequest>,
) -> Result<HttpResponse, OverlapError> {
    match run_overlap(&request, state.source.as_ref()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            warn!(error = %e, "Overlap request failed");
            Err(e)
        }
    }
}
