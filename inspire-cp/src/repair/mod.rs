//! Réparation des géométries invalides
//!
//! Un polygone valide est retourné tel quel. Sinon chaque anneau est résolu
//! en remplissage pair-impair via les opérations booléennes de `geo`, les trous
//! sont soustraits de l'extérieur, et le résultat peut changer de type
//! (polygone, multipolygone, ou collection linéaire si plus aucune surface
//! ne subsiste).

pub mod ring;
pub mod validate;

use geo::{BooleanOps, Coord, Geometry, GeometryCollection, LineString, MultiPolygon, Polygon};
use tracing::debug;

use crate::geometry::Polygonal;

/// Répare un polygone et retourne une géométrie surfacique valide
pub fn make_valid(polygon: Polygon) -> Polygonal {
    let errors = validate::validate_polygon(&polygon);
    if errors.is_empty() {
        return Polygonal::Polygon(polygon);
    }

    debug!(errors = ?errors, "Repairing invalid polygon");

    let shell = resolve_ring(polygon.exterior());
    let holes = polygon
        .interiors()
        .iter()
        .map(resolve_ring)
        .filter(|hole| !hole.0.is_empty())
        .fold(MultiPolygon::new(Vec::new()), |acc, hole| acc.union(&hole));

    let repaired = if holes.0.is_empty() || shell.0.is_empty() {
        shell
    } else {
        shell.difference(&holes)
    };

    if !repaired.0.is_empty() {
        return Polygonal::from_parts(repaired);
    }

    collapse(polygon.exterior())
}

/// Résout les auto-intersections d'un anneau isolé
fn resolve_ring(ring: &LineString) -> MultiPolygon {
    let mut coords: Vec<Coord> = ring
        .0
        .iter()
        .copied()
        .filter(|c| c.x.is_finite() && c.y.is_finite())
        .collect();
    ring::dedup_consecutive(&mut coords);
    ring::close(&mut coords);

    if ring::distinct_positions(&coords) < 3 {
        return MultiPolygon::new(Vec::new());
    }

    let subject = MultiPolygon::new(vec![Polygon::new(LineString::new(coords), vec![])]);
    subject.union(&MultiPolygon::new(Vec::new()))
}

/// Géométrie de repli quand l'anneau extérieur n'a plus de surface
fn collapse(exterior: &LineString) -> Polygonal {
    let mut coords: Vec<Coord> = exterior
        .0
        .iter()
        .copied()
        .filter(|c| c.x.is_finite() && c.y.is_finite())
        .collect();
    ring::dedup_consecutive(&mut coords);

    match ring::distinct_positions(&coords) {
        0 | 1 => Polygonal::empty(),
        _ => {
            debug!(points = coords.len(), "Polygon collapsed to linework");
            let linework = Geometry::LineString(LineString::new(coords));
            Polygonal::Collection(GeometryCollection(vec![linework]))
        }
    }
}
