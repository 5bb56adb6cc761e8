//! Chaîne complète: normalisation, récupération WFS, lecture, recouvrement

use std::time::Instant;

use geo::Polygon;
use inspire_cp::{repair, ParcelRecord, Polygonal};
use tracing::info;

use crate::api::{OverlapRequest, OverlapResponse};
use crate::error::OverlapError;
use crate::normalize::normalize;
use crate::overlap::{bounding_box, compute_overlap};
use crate::wfs::FeatureSource;

/// Résultat d'une exécution, avec les parcelles lues (pour l'export)
#[derive(Debug)]
pub struct OverlapRun {
    pub response: OverlapResponse,
    pub parcels: Vec<ParcelRecord>,
}

/// Construit le polygone utilisateur réparé à partir des sommets bruts
///
/// # Errors
///
/// `OverlapError::Validation` si l'anneau normalisé est trop court ou si le
/// polygone réparé n'a plus de surface.
pub fn user_polygon(raw: &[[f64; 2]]) -> Result<Polygonal, OverlapError> {
    let ring = normalize(raw)?;
    let polygon = repair::make_valid(Polygon::new(ring, vec![]));

    if !polygon.has_area() {
        return Err(OverlapError::validation("Polygon is empty/invalid."));
    }
    Ok(polygon)
}

/// Exécute une requête de recouvrement de bout en bout
pub async fn run_overlap(
    request: &OverlapRequest,
    source: &dyn FeatureSource,
) -> Result<OverlapResponse, OverlapError> {
    Ok(run_overlap_detailed(request, source).await?.response)
}

/// Comme `run_overlap`, en conservant les parcelles lues
pub async fn run_overlap_detailed(
    request: &OverlapRequest,
    source: &dyn FeatureSource,
) -> Result<OverlapRun, OverlapError> {
    let raw = request.validate()?;
    let (user, bbox) = tokio::task::spawn_blocking(move || {
        let user = user_polygon(&raw)?;
        let bbox = bounding_box(&user)
            .ok_or_else(|| OverlapError::validation("Polygon is empty/invalid."))?;
        Ok::<_, OverlapError>((user, bbox))
    })
    .await??;

    let start = Instant::now();
    let xml = source.fetch(&bbox, request.count()).await?;
    let fetch_time = start.elapsed();

    let include_touches = request.include_touches;
    let (response, parcels) = tokio::task::spawn_blocking(move || {
        let result = inspire_cp::read_parcels(&xml)?;
        let response = compute_overlap(&user, &result.parcels, include_touches)?;
        info!(stats = %result.stats.summary(), "Read WFS payload");
        Ok::<_, OverlapError>((response, result.parcels))
    })
    .await??;

    info!(
        source = source.name(),
        min_x = bbox.min_x,
        min_y = bbox.min_y,
        max_x = bbox.max_x,
        max_y = bbox.max_y,
        parcels = parcels.len(),
        included = response.parcels.len(),
        fetch_ms = fetch_time.as_millis() as u64,
        total_ms = start.elapsed().as_millis() as u64,
        "Overlap computed"
    );

    Ok(OverlapRun { response, parcels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BoundingBox;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Source vide qui mémorise l'emprise demandée
    #[derive(Default)]
    struct RecordingSource {
        bbox: Mutex<Option<BoundingBox>>,
    }

    #[async_trait]
    impl FeatureSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        async fn fetch(&self, bbox: &BoundingBox, _limit: u32) -> Result<String, OverlapError> {
            if let Ok(mut slot) = self.bbox.lock() {
                *slot = Some(*bbox);
            }
            Ok(r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"/>"#.to_string())
        }
    }

    fn circle_request(n: usize) -> OverlapRequest {
        let coords = (0..n)
            .map(|k| {
                let angle = k as f64 / n as f64 * std::f64::consts::TAU;
                vec![745_000.0 + 500.0 * angle.cos(), 1_043_000.0 + 500.0 * angle.sin()]
            })
            .collect();
        OverlapRequest {
            coords,
            include_touches: false,
            limit: 10,
        }
    }

    // Runtime mono-thread: la construction du polygone doit quitter l'exécuteur
    #[tokio::test(flavor = "current_thread")]
    async fn test_large_polygon_off_executor() {
        let source = RecordingSource::default();
        let response = run_overlap(&circle_request(20_000), &source).await.unwrap();

        assert!(response.parcels.is_empty());
        assert!((response.polygon_area - std::f64::consts::PI * 250_000.0).abs() < 1.0);

        let bbox = source.bbox.lock().unwrap().unwrap();
        assert!((bbox.min_x + 745_500.0).abs() < 1e-6);
        assert!((bbox.max_y + 1_042_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_user_polygon_square() {
        let polygon = user_polygon(&[[0.0, 10.0], [10.0, 10.0], [10.0, 20.0], [0.0, 20.0]]).unwrap();
        assert!((polygon.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_user_polygon_flat_rejected() {
        // Tous les sommets alignés: plus aucune surface après réparation
        match user_polygon(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]]) {
            Err(OverlapError::Validation(msg)) => assert_eq!(msg, "Polygon is empty/invalid."),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_polygon_bowtie_repaired() {
        let polygon =
            user_polygon(&[[0.0, 10.0], [10.0, 20.0], [10.0, 10.0], [0.0, 20.0]]).unwrap();
        assert_eq!(polygon.kind(), "MultiPolygon");
        assert!((polygon.area() - 50.0).abs() < 1e-6);
    }
}
