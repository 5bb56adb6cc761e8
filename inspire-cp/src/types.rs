//! Types de données pour le crate inspire-cp

use crate::geometry::Polygonal;

/// Référence vers l'unité administrative (katastrální území) d'une parcelle
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AdministrativeUnitRef {
    /// Nom affiché (`xlink:title`)
    pub name: Option<String>,

    /// Lien vers l'unité (`xlink:href`)
    pub href: Option<String>,
}

impl AdministrativeUnitRef {
    /// Retourne le couple (nom, lien) quand les deux sont renseignés et non vides
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.name.as_deref(), self.href.as_deref()) {
            (Some(name), Some(href)) if !name.is_empty() && !href.is_empty() => Some((name, href)),
            _ => None,
        }
    }
}

/// Une parcelle cadastrale lue depuis la réponse WFS
#[derive(Debug, Clone)]
pub struct ParcelRecord {
    /// Libellé de la parcelle (`cp:label`)
    pub label: String,

    /// Référence cadastrale nationale (`cp:nationalCadastralReference`)
    pub reference: String,

    /// Surface déclarée (`cp:areaValue`), absente si illisible
    pub declared_area: Option<f64>,

    /// Unité administrative (`cp:zoning`)
    pub administrative_unit: AdministrativeUnitRef,

    /// Géométrie réparée
    pub geometry: Polygonal,
}

impl ParcelRecord {
    /// Surface de référence: la surface déclarée si présente, sinon celle de la géométrie
    pub fn reference_area(&self) -> f64 {
        self.declared_area
            .unwrap_or_else(|| self.geometry.area())
    }
}

/// Compteurs de lecture d'une réponse WFS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Nombre de `wfs:member` rencontrés
    pub members: usize,
    /// Parcelles lues avec succès
    pub parsed: usize,
    /// Membres qui ne sont pas des `cp:CadastralParcel`
    pub skipped_not_parcel: usize,
    /// Parcelles sans élément `gml:Polygon`
    pub skipped_no_geometry: usize,
    /// Parcelles dont la géométrie est illisible
    pub skipped_invalid: usize,
    /// Parcelles dont la surface déclarée a été ignorée
    pub degraded_area: usize,
}

impl ReadStats {
    /// Nombre total de features ignorées
    pub fn skipped(&self) -> usize {
        self.skipped_not_parcel + self.skipped_no_geometry + self.skipped_invalid
    }

    /// Affichage compact
    pub fn summary(&self) -> String {
        format!(
            "{} members: {} parsed, {} skipped ({} not parcels, {} without geometry, {} invalid), {} without usable area",
            self.members,
            self.parsed,
            self.skipped(),
            self.skipped_not_parcel,
            self.skipped_no_geometry,
            self.skipped_invalid,
            self.degraded_area
        )
    }
}

/// Résultat de la lecture d'une réponse WFS
#[derive(Debug, Default)]
pub struct ReadResult {
    /// Parcelles, dans l'ordre du document
    pub parcels: Vec<ParcelRecord>,

    /// Compteurs de lecture
    pub stats: ReadStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_pair_requires_both_fields() {
        let unit = AdministrativeUnitRef {
            name: Some("Vinohrady".to_string()),
            href: None,
        };
        assert_eq!(unit.pair(), None);

        let unit = AdministrativeUnitRef {
            name: Some(String::new()),
            href: Some("urn:ku:727181".to_string()),
        };
        assert_eq!(unit.pair(), None);

        let unit = AdministrativeUnitRef {
            name: Some("Vinohrady".to_string()),
            href: Some("urn:ku:727181".to_string()),
        };
        assert_eq!(unit.pair(), Some(("Vinohrady", "urn:ku:727181")));
    }

    #[test]
    fn test_stats_summary() {
        let stats = ReadStats {
            members: 5,
            parsed: 3,
            skipped_not_parcel: 1,
            skipped_no_geometry: 0,
            skipped_invalid: 1,
            degraded_area: 2,
        };
        assert_eq!(stats.skipped(), 2);
        assert!(stats.summary().contains("3 parsed"));
    }
}
