//! Calcul du recouvrement entre le polygone utilisateur et les parcelles

use std::cmp::Ordering;
use std::collections::HashSet;

use inspire_cp::{ParcelRecord, Polygonal};
use rayon::prelude::*;
use tracing::debug;

use crate::api::{AdministrativeUnit, BoundingBox, OverlapResponse, ParcelOverlap};
use crate::error::OverlapError;

/// Emprise des anneaux extérieurs d'une géométrie
pub fn bounding_box(polygon: &Polygonal) -> Option<BoundingBox> {
    polygon.exterior_bounds().map(BoundingBox::from)
}

/// Arrondi décimal (demi-valeurs éloignées de zéro)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Intersection brute d'une parcelle retenue
struct Hit<'a> {
    index: usize,
    parcel: &'a ParcelRecord,
    area: f64,
}

/// Calcule les parcelles recouvertes par le polygone utilisateur
///
/// Une parcelle est retenue si l'intersection a une surface non nulle, ou si
/// `include_touches` est vrai et que les géométries se touchent. Les calculs
/// par parcelle sont indépendants et faits en parallèle; l'ordre des
/// parcelles en entrée est conservé avant le tri final.
///
/// # Errors
///
/// `OverlapError::Validation` si le polygone utilisateur est vide.
pub fn compute_overlap(
    user: &Polygonal,
    parcels: &[ParcelRecord],
    include_touches: bool,
) -> Result<OverlapResponse, OverlapError> {
    let bbox = bounding_box(user)
        .ok_or_else(|| OverlapError::validation("Polygon is empty/invalid."))?;

    let hits: Vec<Hit> = parcels
        .par_iter()
        .enumerate()
        .filter(|(_, parcel)| !parcel.geometry.is_empty())
        .filter_map(|(index, parcel)| {
            let area = user.intersection_area(&parcel.geometry);
            let included = area > 0.0 || (include_touches && user.intersects(&parcel.geometry));
            included.then_some(Hit {
                index,
                parcel,
                area,
            })
        })
        .collect();

    let mut overlap_total = 0.0;
    let mut seen = HashSet::new();
    let mut administrative_units = Vec::new();
    let mut results = Vec::with_capacity(hits.len());

    for hit in &hits {
        overlap_total += hit.area;

        let unit = &hit.parcel.administrative_unit;
        if let Some((name, href)) = unit.pair() {
            if seen.insert((name, href)) {
                administrative_units.push(AdministrativeUnit {
                    name: name.to_string(),
                    href: href.to_string(),
                });
            }
        }

        results.push(parcel_overlap(hit));
    }

    sort_results(&mut results);

    debug!(
        parcels = parcels.len(),
        included = results.len(),
        units = administrative_units.len(),
        "Computed overlap"
    );

    Ok(OverlapResponse {
        administrative_units,
        parcels: results,
        overlap_total: round_to(overlap_total, 1),
        polygon_area: round_to(user.area(), 1),
        bounding_box: bbox,
    })
}

fn parcel_overlap(hit: &Hit) -> ParcelOverlap {
    let parcel_area = hit.parcel.reference_area();
    let overlap_percent =
        (parcel_area > 0.0).then(|| round_to(hit.area / parcel_area * 100.0, 2));

    ParcelOverlap {
        label: hit.parcel.label.clone(),
        reference: hit.parcel.reference.clone(),
        parcel_area: round_to(parcel_area, 1),
        overlap_area: round_to(hit.area, 1),
        overlap_percent,
        administrative_unit_name: hit.parcel.administrative_unit.name.clone(),
        administrative_unit_href: hit.parcel.administrative_unit.href.clone(),
        source_index: hit.index,
    }
}

/// Surface d'intersection décroissante, puis référence, puis ordre WFS
pub fn sort_results(results: &mut [ParcelOverlap]) {
    results.sort_by(|a, b| {
        b.overlap_area
            .partial_cmp(&a.overlap_area)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.reference.cmp(&b.reference))
            .then_with(|| a.source_index.cmp(&b.source_index))
    });
}
