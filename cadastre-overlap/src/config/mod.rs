//! Configuration du service

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Point d'accès WFS INSPIRE du ČÚZK
pub const DEFAULT_WFS_URL: &str = "https://services.cuzk.cz/wfs/inspire-cp-wfs.asp";

/// S-JTSK / Krovak East North
pub const DEFAULT_WFS_SRS: &str = "http://www.opengis.net/def/crs/EPSG/0/5514";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// URL du service WFS
    pub wfs_url: String,

    /// Délai maximal d'une requête WFS (secondes)
    pub wfs_timeout_secs: u64,

    /// Système de coordonnées des requêtes et des réponses
    pub wfs_srs: String,

    /// Adresse d'écoute HTTP
    pub bind_addr: String,

    /// Port d'écoute HTTP
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            wfs_url: DEFAULT_WFS_URL.to_string(),
            wfs_timeout_secs: 60,
            wfs_srs: DEFAULT_WFS_SRS.to_string(),
            bind_addr: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServiceConfig {
    /// Charge la configuration depuis les variables d'environnement
    ///
    /// Variables: `WFS_URL`, `WFS_TIMEOUT_SECS`, `WFS_SRS`, `BIND_ADDR`, `PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("WFS_URL") {
            config.wfs_url = url;
        }
        if let Some(secs) = lookup("WFS_TIMEOUT_SECS") {
            config.wfs_timeout_secs = secs
                .trim()
                .parse()
                .context(format!("Invalid WFS_TIMEOUT_SECS: {}", secs))?;
        }
        if let Some(srs) = lookup("WFS_SRS") {
            config.wfs_srs = srs;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .context(format!("Invalid PORT: {}", port))?;
        }

        Ok(config)
    }

    /// Charge une configuration depuis un fichier JSON (champs absents: défauts)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Délai WFS sous forme de `Duration`
    pub fn wfs_timeout(&self) -> Duration {
        Duration::from_secs(self.wfs_timeout_secs)
    }
}
