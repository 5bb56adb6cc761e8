//! Parser pour les géométries GML 3.2 (`gml:Polygon`)

use geo::{Coord, LineString, Polygon};
use roxmltree::Node;
use tracing::debug;

use super::{first_descendant, GML_NS};
use crate::geometry::Polygonal;
use crate::repair::{self, ring};
use crate::CpError;

/// Parse un élément `gml:Polygon` et répare la géométrie obtenue
pub fn parse(polygon: Node) -> Result<Polygonal, CpError> {
    let raw = parse_polygon(polygon)?;
    Ok(repair::make_valid(raw))
}

/// Parse un élément `gml:Polygon` sans réparation
///
/// L'anneau extérieur est obligatoire. Les trous de moins de 4 points sont
/// ignorés silencieusement.
pub fn parse_polygon(polygon: Node) -> Result<Polygon, CpError> {
    let exterior = polygon
        .descendants()
        .filter(|n| n.has_tag_name((GML_NS, "exterior")))
        .find_map(|n| ring_coords(n).transpose())
        .transpose()?
        .ok_or_else(|| CpError::geometry_parse("No exterior posList found"))?;

    if exterior.is_empty() {
        return Err(CpError::geometry_parse("Empty exterior posList"));
    }
    if ring::distinct_positions(&exterior) < 3 {
        return Err(CpError::geometry_parse(format!(
            "Exterior ring has {} distinct positions, at least 3 required",
            ring::distinct_positions(&exterior)
        )));
    }

    let mut holes = Vec::new();
    for interior in polygon
        .descendants()
        .filter(|n| n.has_tag_name((GML_NS, "interior")))
    {
        let Some(coords) = ring_coords(interior)? else {
            continue;
        };
        if coords.len() >= 4 {
            holes.push(LineString::new(coords));
        } else {
            debug!(points = coords.len(), "Dropping degenerate interior ring");
        }
    }

    Ok(Polygon::new(LineString::new(exterior), holes))
}

/// Extrait les coordonnées d'un anneau (`gml:posList`, sinon suite de `gml:pos`)
///
/// Retourne `None` si l'anneau ne porte aucune liste de positions.
fn ring_coords(ring: Node) -> Result<Option<Vec<Coord>>, CpError> {
    if let Some(pos_list) = first_descendant(ring, GML_NS, "posList") {
        return match pos_list.text() {
            Some(text) => parse_pos_list(text).map(Some),
            None => Ok(None),
        };
    }

    let positions: Vec<&str> = ring
        .descendants()
        .filter(|n| n.has_tag_name((GML_NS, "pos")))
        .filter_map(|n| n.text())
        .collect();

    if positions.is_empty() {
        return Ok(None);
    }

    let mut coords = Vec::with_capacity(positions.len());
    for (i, text) in positions.iter().enumerate() {
        let values = parse_scalars(text)?;
        if values.len() < 2 {
            return Err(CpError::geometry_parse(format!(
                "gml:pos {} has {} values, expected 2",
                i,
                values.len()
            )));
        }
        coords.push(Coord {
            x: values[0],
            y: values[1],
        });
    }
    Ok(Some(coords))
}

/// Parse une `gml:posList` (X Y X Y ...) en coordonnées
///
/// Une valeur isolée en fin de liste est ignorée.
pub fn parse_pos_list(text: &str) -> Result<Vec<Coord>, CpError> {
    let values = parse_scalars(text)?;
    Ok(values
        .chunks_exact(2)
        .map(|pair| Coord {
            x: pair[0],
            y: pair[1],
        })
        .collect())
}

/// Parse une suite de nombres séparés par des blancs
fn parse_scalars(text: &str) -> Result<Vec<f64>, CpError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            fast_float::parse::<f64, _>(token)
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CpError::InvalidCoordinate {
                    token: token.to_string(),
                    position,
                })
        })
        .collect()
}
