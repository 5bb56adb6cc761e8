//! Opérations élémentaires sur les anneaux

use std::collections::HashSet;

use geo::Coord;

/// Ferme l'anneau si le premier point diffère du dernier (égalité exacte)
pub fn close(coords: &mut Vec<Coord>) {
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first);
        }
    }
}

/// Supprime les points strictement égaux à leur prédécesseur immédiat
pub fn dedup_consecutive(coords: &mut Vec<Coord>) {
    coords.dedup();
}

/// Clé exacte d'une position, `-0.0` et `0.0` confondus
pub fn position_key(c: &Coord) -> (u64, u64) {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

/// Nombre de positions distinctes d'un anneau fermé (sans le point de fermeture)
pub fn distinct_positions(coords: &[Coord]) -> usize {
    coords.iter().map(position_key).collect::<HashSet<_>>().len()
}

/// Vrai si l'anneau est fermé et possède au moins 4 points
pub fn is_closed_ring(coords: &[Coord]) -> bool {
    coords.len() >= 4 && coords.first() == coords.last()
}
