//! Récupération des parcelles auprès du WFS INSPIRE

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::BoundingBox;
use crate::config::ServiceConfig;
use crate::error::OverlapError;

/// Source de réponses WFS (FeatureCollection GML) filtrées par emprise
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Nom affiché dans les logs
    fn name(&self) -> &str;

    /// Retourne le document GML des parcelles intersectant l'emprise
    ///
    /// # Errors
    ///
    /// `OverlapError::Upstream` si la récupération échoue.
    async fn fetch(&self, bbox: &BoundingBox, limit: u32) -> Result<String, OverlapError>;
}

/// Client HTTP pour un service WFS 2.0
#[derive(Debug, Clone)]
pub struct WfsClient {
    client: reqwest::Client,
    url: String,
    srs: String,
}

impl WfsClient {
    /// Construit le client avec le délai configuré
    pub fn new(config: &ServiceConfig) -> Result<Self, OverlapError> {
        let client = reqwest::Client::builder()
            .timeout(config.wfs_timeout())
            .user_agent(concat!("cadastre-overlap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.wfs_url.clone(),
            srs: config.wfs_srs.clone(),
        })
    }

    /// URL du service
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Paramètres d'une requête GetFeature par emprise
pub fn build_query(bbox: &BoundingBox, limit: u32, srs: &str) -> Vec<(&'static str, String)> {
    vec![
        ("service", "WFS".to_string()),
        ("version", "2.0.0".to_string()),
        ("request", "GetFeature".to_string()),
        ("typeNames", "cp:CadastralParcel".to_string()),
        ("srsName", srs.to_string()),
        (
            "bbox",
            format!(
                "{},{},{},{},{}",
                bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y, srs
            ),
        ),
        ("count", limit.to_string()),
        ("outputFormat", "text/xml; subtype=gml/3.2.1".to_string()),
    ]
}

#[async_trait]
impl FeatureSource for WfsClient {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self, bbox: &BoundingBox, limit: u32) -> Result<String, OverlapError> {
        let query = build_query(bbox, limit, &self.srs);
        debug!(url = %self.url, ?bbox, limit, "Querying WFS");

        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        info!(bytes = body.len(), "Received WFS payload");
        Ok(body)
    }
}

/// Source lisant une réponse WFS enregistrée sur disque
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl FeatureSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _bbox: &BoundingBox, _limit: u32) -> Result<String, OverlapError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            OverlapError::upstream(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}
