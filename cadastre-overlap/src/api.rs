//! Types d'échange de l'API de recouvrement (JSON, camelCase)

use geo::Rect;
use serde::{Deserialize, Serialize};

use crate::error::OverlapError;

/// Nombre de parcelles demandées par défaut au WFS
pub const DEFAULT_LIMIT: i64 = 500;

/// Nombre maximal de parcelles demandées au WFS
pub const MAX_LIMIT: i64 = 5000;

/// Nombre minimal de sommets fournis par l'utilisateur
pub const MIN_INPUT_POINTS: usize = 3;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Requête de calcul de recouvrement
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapRequest {
    /// Sommets du polygone utilisateur, `[x, y]`
    pub coords: Vec<Vec<f64>>,

    /// Inclure les parcelles qui ne font que toucher le polygone
    #[serde(default, alias = "include_touches")]
    pub include_touches: bool,

    /// Nombre maximal de parcelles demandées au WFS
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl OverlapRequest {
    /// Vérifie la forme de la requête et retourne les sommets bruts
    ///
    /// # Errors
    ///
    /// `OverlapError::Validation` si `limit` sort de [1, 5000], s'il y a moins
    /// de 3 sommets ou si un sommet n'est pas une paire de nombres finis.
    pub fn validate(&self) -> Result<Vec<[f64; 2]>, OverlapError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(OverlapError::validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }

        if self.coords.len() < MIN_INPUT_POINTS {
            return Err(OverlapError::validation(format!(
                "coords must contain at least {} points, got {}",
                MIN_INPUT_POINTS,
                self.coords.len()
            )));
        }

        self.coords
            .iter()
            .enumerate()
            .map(|(i, pair)| match pair.as_slice() {
                [x, y] if x.is_finite() && y.is_finite() => Ok([*x, *y]),
                _ => Err(OverlapError::validation(format!(
                    "coords[{}] must be a pair of finite numbers",
                    i
                ))),
            })
            .collect()
    }

    /// Nombre de parcelles demandées, une fois la requête validée
    pub fn count(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT) as u32
    }
}

/// Unité administrative (katastrální území) d'une parcelle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AdministrativeUnit {
    pub name: String,
    pub href: String,
}

/// Recouvrement d'une parcelle par le polygone utilisateur
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelOverlap {
    pub label: String,
    pub reference: String,

    /// Surface de la parcelle en m² (déclarée, sinon calculée), arrondie à 0,1
    pub parcel_area: f64,

    /// Surface de l'intersection en m², arrondie à 0,1
    pub overlap_area: f64,

    /// Part de la parcelle couverte en %, arrondie à 0,01 (nulle si surface ≤ 0)
    pub overlap_percent: Option<f64>,

    pub administrative_unit_name: Option<String>,
    pub administrative_unit_href: Option<String>,

    /// Position de la parcelle dans la réponse WFS
    #[serde(skip)]
    pub source_index: usize,
}

/// Emprise (minX, minY, maxX, maxY)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

/// Réponse du calcul de recouvrement
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResponse {
    /// Unités administratives distinctes, dans l'ordre de première apparition
    pub administrative_units: Vec<AdministrativeUnit>,

    /// Parcelles retenues, par surface d'intersection décroissante
    pub parcels: Vec<ParcelOverlap>,

    /// Somme des intersections en m², arrondie à 0,1
    pub overlap_total: f64,

    /// Surface du polygone utilisateur en m², arrondie à 0,1
    pub polygon_area: f64,

    pub bounding_box: BoundingBox,
}
