//! Définition et implémentation des commandes CLI
//!
//! - `serve`: service HTTP
//! - `compute`: un calcul de recouvrement, depuis le WFS ou un fichier GML

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use cadastre_overlap::api::{OverlapRequest, DEFAULT_LIMIT};
use cadastre_overlap::config::ServiceConfig;
use cadastre_overlap::export::export_to_geojson;
use cadastre_overlap::pipeline::run_overlap_detailed;
use cadastre_overlap::server::run_server;
use cadastre_overlap::wfs::{FeatureSource, FileSource, WfsClient};

/// Options communes de configuration du service
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// JSON config file (défaut : variables d'environnement)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// WFS endpoint URL (défaut : env WFS_URL)
    #[arg(long)]
    pub wfs_url: Option<String>,

    /// WFS request timeout in seconds (défaut : env WFS_TIMEOUT_SECS / 60)
    #[arg(long)]
    pub wfs_timeout: Option<u64>,

    /// Bind address (défaut : env BIND_ADDR / 127.0.0.1)
    #[arg(long)]
    pub bind: Option<String>,

    /// Listen port (défaut : env PORT / 8000)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServiceArgs {
    /// Configuration effective: fichier ou environnement, puis options CLI
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::from_env()?,
        };

        if let Some(url) = &self.wfs_url {
            config.wfs_url = url.clone();
        }
        if let Some(secs) = self.wfs_timeout {
            config.wfs_timeout_secs = secs;
        }
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service (GET /health, POST /overlap)
    Serve {
        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Compute the overlap of one polygon and print the JSON response
    Compute {
        /// Polygon vertices as JSON, e.g. '[[-745000,-1043000],...]' (or @file.json)
        #[arg(short, long)]
        coords: String,

        /// Read parcels from a saved WFS response instead of the live service
        #[arg(long)]
        gml: Option<PathBuf>,

        /// Include parcels that only touch the polygon
        #[arg(long)]
        include_touches: bool,

        /// Maximum number of parcels requested from the WFS
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: i64,

        /// Write the included parcels to this GeoJSON file
        #[arg(long)]
        geojson: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },
}

/// Exécute la commande serve
pub async fn cmd_serve(service: &ServiceArgs) -> Result<()> {
    let config = service.resolve()?;
    let source: Arc<dyn FeatureSource> = Arc::new(WfsClient::new(&config)?);

    run_server(&config, source)
        .await
        .context(format!("Server failed on {}:{}", config.bind_addr, config.port))
}

/// Exécute la commande compute
pub async fn cmd_compute(
    coords: &str,
    gml: Option<&Path>,
    include_touches: bool,
    limit: i64,
    geojson: Option<&Path>,
    service: &ServiceArgs,
) -> Result<()> {
    let coords = parse_coords_arg(coords)?;
    let request = OverlapRequest {
        coords,
        include_touches,
        limit,
    };

    let source: Box<dyn FeatureSource> = match gml {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(WfsClient::new(&service.resolve()?)?),
    };
    info!(source = source.name(), include_touches, limit, "Computing overlap");

    let run = run_overlap_detailed(&request, source.as_ref()).await?;

    println!("{}", serde_json::to_string_pretty(&run.response)?);

    if let Some(output) = geojson {
        export_to_geojson(&run.response, &run.parcels, output)?;
        info!(
            output = %output.display(),
            features = run.response.parcels.len(),
            "GeoJSON written"
        );
    }

    Ok(())
}

/// Lit l'argument `--coords`: JSON en ligne, ou `@chemin` vers un fichier JSON
fn parse_coords_arg(arg: &str) -> Result<Vec<Vec<f64>>> {
    let json = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .context(format!("Failed to read coordinates file: {}", path))?,
        None => arg.to_string(),
    };

    serde_json::from_str(&json).context("Coordinates must be a JSON array of [x, y] pairs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords_inline() {
        let coords = parse_coords_arg("[[-745000, -1043000], [-744990.5, -1043000]]").unwrap();
        assert_eq!(coords, vec![vec![-745000.0, -1043000.0], vec![-744990.5, -1043000.0]]);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(parse_coords_arg("not json").is_err());
        assert!(parse_coords_arg("@/nonexistent/coords.json").is_err());
    }

    #[test]
    fn test_service_args_override() {
        let args = ServiceArgs {
            wfs_url: Some("http://localhost:9000/wfs".to_string()),
            port: Some(9100),
            ..Default::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.wfs_url, "http://localhost:9000/wfs");
        assert_eq!(config.port, 9100);
    }
}
