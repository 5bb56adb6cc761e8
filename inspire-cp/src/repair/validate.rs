//! Détection des polygones invalides
//!
//! Un polygone est considéré valide si chaque anneau est fermé, possède au
//! moins 4 points finis, ne s'auto-intersecte pas, et si chaque trou est
//! contenu dans l'anneau extérieur sans chevaucher un autre trou.

use std::collections::HashSet;

use geo::algorithm::sweep::Intersections;
use geo::line_intersection::LineIntersection;
use geo::{Contains, Coord, Intersects, Line, LineString, Polygon};

use super::ring;

/// Liste les défauts d'un polygone (vide si valide)
pub fn validate_polygon(poly: &Polygon) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(err) = validate_ring(poly.exterior(), "exterior ring") {
        errors.push(err);
    }

    for (i, interior) in poly.interiors().iter().enumerate() {
        if let Some(err) = validate_ring(interior, &format!("interior ring {}", i)) {
            errors.push(err);
        }
    }

    // Les relations entre anneaux n'ont de sens que sur des anneaux sains
    if !errors.is_empty() || poly.interiors().is_empty() {
        return errors;
    }

    let shell = Polygon::new(poly.exterior().clone(), vec![]);
    let holes: Vec<Polygon> = poly
        .interiors()
        .iter()
        .map(|h| Polygon::new(h.clone(), vec![]))
        .collect();

    for (i, hole) in holes.iter().enumerate() {
        if !shell.contains(hole) {
            errors.push(format!("interior ring {} is not inside the exterior ring", i));
        }
        for (j, other) in holes.iter().enumerate().skip(i + 1) {
            if hole.intersects(other) {
                errors.push(format!("interior rings {} and {} intersect", i, j));
            }
        }
    }

    errors
}

/// Vérifie un anneau isolé
fn validate_ring(ring: &LineString, ring_name: &str) -> Option<String> {
    let coords = &ring.0;

    if !ring::is_closed_ring(coords) {
        return Some(format!("{} must be closed with at least 4 points", ring_name));
    }

    if let Some(idx) = coords
        .iter()
        .position(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Some(format!("{} has a non-finite coordinate at index {}", ring_name, idx));
    }

    if ring::distinct_positions(coords) < 3 {
        return Some(format!("{} is degenerate", ring_name));
    }

    if has_repeated_vertex(ring) || has_self_intersection(ring) {
        return Some(format!("{} has a self-intersection", ring_name));
    }

    None
}

/// Un sommet présent deux fois (hors fermeture) signale un pic ou un auto-contact
fn has_repeated_vertex(ring: &LineString) -> bool {
    let coords = &ring.0[..ring.0.len() - 1];
    let mut seen = HashSet::with_capacity(coords.len());

    !coords.iter().all(|c| seen.insert(ring::position_key(c)))
}

/// Balayage des arêtes: toute intersection autre que le sommet commun de deux
/// arêtes consécutives est une auto-intersection
///
/// Suppose l'absence de sommet répété: deux arêtes partageant une extrémité
/// sont alors forcément consécutives.
fn has_self_intersection(ring: &LineString) -> bool {
    Intersections::<Line>::from_iter(ring.lines()).any(|(a, b, intersection)| match intersection {
        LineIntersection::Collinear { .. } => true,
        LineIntersection::SinglePoint { intersection, .. } => {
            !(is_endpoint(&a, intersection) && is_endpoint(&b, intersection))
        }
    })
}

fn is_endpoint(line: &Line, c: Coord) -> bool {
    line.start == c || line.end == c
}
