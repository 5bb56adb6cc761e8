//! Export des parcelles recouvertes en GeoJSON avec geozero

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;
use inspire_cp::ParcelRecord;
use serde_json::json;

use crate::api::{OverlapResponse, ParcelOverlap};

/// Code EPSG des géométries exportées (S-JTSK / Krovak East North)
pub const EXPORT_EPSG: u32 = 5514;

/// Exporte les parcelles retenues, dans l'ordre de la réponse
///
/// `parcels` est la liste lue depuis le WFS; chaque résultat y est retrouvé
/// par sa position d'origine.
pub fn export_to_geojson(
    response: &OverlapResponse,
    parcels: &[ParcelRecord],
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    write_collection(&mut writer, response, parcels)?;
    writer.flush()?;

    Ok(())
}

/// Écrit la FeatureCollection complète
pub fn write_collection<W: Write>(
    writer: &mut W,
    response: &OverlapResponse,
    parcels: &[ParcelRecord],
) -> Result<()> {
    // Header FeatureCollection avec CRS
    write!(
        writer,
        r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::{}"}}}},"features":["#,
        EXPORT_EPSG
    )?;

    let mut written = 0;
    for result in &response.parcels {
        let Some(parcel) = parcels.get(result.source_index) else {
            continue;
        };
        if written > 0 {
            write!(writer, ",")?;
        }
        write_feature(writer, result, parcel)?;
        written += 1;
    }

    write!(writer, "]}}")?;
    Ok(())
}

/// Écrit une parcelle en GeoJSON
fn write_feature<W: Write>(writer: &mut W, result: &ParcelOverlap, parcel: &ParcelRecord) -> Result<()> {
    write!(
        writer,
        r#"{{"type":"Feature","id":{},"#,
        serde_json::to_string(&result.reference)?
    )?;

    // Geometry via geozero
    write!(writer, r#""geometry":"#)?;
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    parcel.geometry.to_geometry().process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    let properties = json!({
        "label": result.label,
        "reference": result.reference,
        "parcelArea": result.parcel_area,
        "overlapArea": result.overlap_area,
        "overlapPercent": result.overlap_percent,
        "administrativeUnitName": result.administrative_unit_name,
        "administrativeUnitHref": result.administrative_unit_href,
    });
    write!(writer, r#","properties":{}}}"#, properties)?;

    Ok(())
}
