//! # inspire-cp
//!
//! Lecture des réponses WFS INSPIRE « Cadastral Parcels » (GML 3.2), telles que
//! publiées par le ČÚZK en S-JTSK / Krovak East North (EPSG:5514).
//!
//! ## Features
//!
//! - Parsing des `wfs:member` / `cp:CadastralParcel` avec `roxmltree`
//! - Géométries `gml:Polygon` (extérieur + trous) vers les types `geo`
//! - Réparation automatique des géométries invalides (type de sortie polymorphe)
//! - Lecture tolérante: une feature illisible est ignorée, jamais fatale
//!
//! ## Usage
//!
//! ```rust,ignore
//! let result = inspire_cp::read_parcels(&xml)?;
//! println!("{}", result.stats.summary());
//!
//! for parcel in &result.parcels {
//!     println!("{} {:.1} m²", parcel.label, parcel.reference_area());
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod parser;
pub mod repair;
pub mod types;

pub use error::CpError;
pub use geometry::Polygonal;
pub use types::{AdministrativeUnitRef, ParcelRecord, ReadResult, ReadStats};

/// Lit une FeatureCollection WFS et retourne les parcelles avec leurs compteurs.
///
/// # Errors
///
/// Retourne `CpError::Xml` si le document n'est pas du XML bien formé. Les
/// erreurs propres à une feature ne remontent pas: la feature est ignorée.
pub fn read_parcels(xml: &str) -> Result<ReadResult, CpError> {
    parser::members::read_all(xml)
}
