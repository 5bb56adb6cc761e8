//! Types d'erreurs pour le crate inspire-cp

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture d'une réponse WFS
#[derive(Debug, Error)]
pub enum CpError {
    /// Document XML illisible (fatal pour toute la lecture)
    #[error("Malformed XML payload: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Géométrie GML d'une feature non exploitable (la feature est ignorée)
    #[error("Geometry parse error: {reason}")]
    GeometryParse { reason: String },

    /// Valeur numérique invalide dans une liste de coordonnées
    #[error("Invalid coordinate value {token:?} at position {position}")]
    InvalidCoordinate { token: String, position: usize },
}

impl CpError {
    /// Crée une erreur de parsing de géométrie
    pub fn geometry_parse(reason: impl Into<String>) -> Self {
        Self::GeometryParse {
            reason: reason.into(),
        }
    }
}
