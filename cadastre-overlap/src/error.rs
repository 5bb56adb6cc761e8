//! Types d'erreurs pour le calcul de recouvrement

use inspire_cp::CpError;
use thiserror::Error;

/// Erreurs pouvant survenir lors d'une requête de recouvrement
#[derive(Debug, Error)]
pub enum OverlapError {
    /// Entrée utilisateur invalide (requête rejetée)
    #[error("{0}")]
    Validation(String),

    /// Échec de la récupération des parcelles auprès du WFS
    #[error("WFS request failed: {0}")]
    Upstream(String),

    /// Réponse WFS illisible
    #[error("Unreadable WFS payload: {0}")]
    Catalog(#[from] CpError),

    /// Erreur interne (tâche de calcul interrompue)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OverlapError {
    /// Crée une erreur de validation
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Crée une erreur de récupération distante
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}

impl From<reqwest::Error> for OverlapError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Upstream(format!("timed out: {}", e))
        } else {
            Self::Upstream(e.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for OverlapError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(e.to_string())
    }
}
