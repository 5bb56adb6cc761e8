//! Lecture des `wfs:member` d'une FeatureCollection de parcelles

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::{first_child, first_descendant, gml, CP_NS, GML_NS, WFS_NS, XLINK_NS};
use crate::types::{AdministrativeUnitRef, ParcelRecord, ReadResult};
use crate::CpError;

/// Lit toutes les parcelles d'une réponse WFS
///
/// Seul un document XML illisible est fatal. Une feature sans géométrie ou
/// dont la géométrie est illisible est ignorée et comptabilisée dans les
/// statistiques.
pub fn read_all(xml: &str) -> Result<ReadResult, CpError> {
    let doc = Document::parse(xml)?;
    let mut result = ReadResult::default();

    for member in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name((WFS_NS, "member")))
    {
        result.stats.members += 1;

        let Some(parcel) = first_child(member, CP_NS, "CadastralParcel") else {
            result.stats.skipped_not_parcel += 1;
            continue;
        };

        let label = child_text(parcel, "label");
        let reference = child_text(parcel, "nationalCadastralReference");
        let area_text = child_text(parcel, "areaValue");
        let administrative_unit = read_zoning(parcel);

        let Some(polygon) = find_geometry(parcel) else {
            debug!(reference = %reference, "Parcel has no polygon geometry, skipping");
            result.stats.skipped_no_geometry += 1;
            continue;
        };

        let geometry = match gml::parse(polygon) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!(reference = %reference, error = %e, "Skipping parcel with unparsable geometry");
                result.stats.skipped_invalid += 1;
                continue;
            }
        };

        let declared_area = parse_declared_area(&area_text);
        if declared_area.is_none() && !area_text.trim().is_empty() {
            debug!(reference = %reference, area = %area_text, "Ignoring unusable declared area");
            result.stats.degraded_area += 1;
        }

        result.parcels.push(ParcelRecord {
            label,
            reference,
            declared_area,
            administrative_unit,
            geometry,
        });
        result.stats.parsed += 1;
    }

    debug!(
        members = result.stats.members,
        parsed = result.stats.parsed,
        skipped = result.stats.skipped(),
        "Read WFS members"
    );

    Ok(result)
}

/// Texte d'un enfant direct `cp:*`, chaîne vide si absent
fn child_text(parcel: Node, name: &str) -> String {
    first_child(parcel, CP_NS, name)
        .and_then(|n| n.text())
        .unwrap_or("")
        .to_string()
}

/// Référence `cp:zoning` (titre et lien XLink)
fn read_zoning(parcel: Node) -> AdministrativeUnitRef {
    match first_child(parcel, CP_NS, "zoning") {
        Some(zoning) => AdministrativeUnitRef {
            name: zoning.attribute((XLINK_NS, "title")).map(str::to_string),
            href: zoning.attribute((XLINK_NS, "href")).map(str::to_string),
        },
        None => AdministrativeUnitRef::default(),
    }
}

/// Premier `gml:Polygon` sous un `cp:geometry`
fn find_geometry<'a, 'input>(parcel: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    parcel
        .descendants()
        .filter(|n| n.has_tag_name((CP_NS, "geometry")))
        .find_map(|g| first_descendant(g, GML_NS, "Polygon"))
}

/// Surface déclarée: nombre fini, sinon absente
///
/// Une valeur nulle ou négative est conservée telle quelle; le pourcentage de
/// recouvrement de la parcelle sera alors indéfini.
pub fn parse_declared_area(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
