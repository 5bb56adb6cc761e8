//! # cadastre-overlap
//!
//! Recouvrement entre un polygone utilisateur en S-JTSK (EPSG:5514) et les
//! parcelles cadastrales publiées par le WFS INSPIRE du ČÚZK.
//!
//! ## Features
//!
//! - Normalisation heuristique des sommets (signe, ordre des axes)
//! - Réparation des géométries invalides (utilisateur et parcelles)
//! - Surfaces et pourcentages recouverts par parcelle, calcul parallèle (rayon)
//! - Service HTTP actix-web et CLI
//! - Export GeoJSON des parcelles retenues
//!
//! ## Usage CLI
//!
//! ```bash
//! # Service HTTP
//! cadastre-overlap serve --port 8000
//!
//! # Calcul ponctuel sur le WFS, avec export GeoJSON
//! cadastre-overlap compute --coords '[[745000,1043000],[744900,1043000],[744900,1042900]]' --geojson out.geojson
//!
//! # Calcul hors ligne sur une réponse WFS enregistrée
//! cadastre-overlap compute --coords @polygon.json --gml parcels.gml --include-touches
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod overlap;
pub mod pipeline;
pub mod server;
pub mod wfs;

pub use api::{OverlapRequest, OverlapResponse};
pub use config::ServiceConfig;
pub use error::OverlapError;
pub use overlap::compute_overlap;
pub use pipeline::run_overlap;
pub use wfs::{FeatureSource, WfsClient};
