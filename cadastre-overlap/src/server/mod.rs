//! Service HTTP (actix-web)
//!
//! - `GET /health`: sonde de vivacité
//! - `POST /overlap`: calcul de recouvrement

mod handlers;

use std::sync::Arc;

use actix_web::{error, middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde_json::json;
use tracing::info;

use crate::config::ServiceConfig;
use crate::error::OverlapError;
use crate::wfs::FeatureSource;

pub use handlers::{health, overlap};

/// État partagé entre les workers
pub struct AppState {
    /// Source des réponses WFS
    pub source: Arc<dyn FeatureSource>,
}

impl ResponseError for OverlapError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

/// Enregistre les routes et la gestion des corps JSON invalides
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "detail": detail })),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health))
        .route("/overlap", web::post().to(overlap));
}

/// Démarre le service HTTP
///
/// # Errors
///
/// Retourne une erreur d'E/S si l'adresse ne peut pas être liée.
pub async fn run_server(config: &ServiceConfig, source: Arc<dyn FeatureSource>) -> std::io::Result<()> {
    let state = web::Data::new(AppState { source });
    let bind_addr = config.bind_addr.clone();
    let port = config.port;

    info!(bind_addr = %bind_addr, port, wfs = %config.wfs_url, "Starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
