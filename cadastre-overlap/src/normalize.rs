//! Normalisation des sommets fournis par l'utilisateur
//!
//! Les polygones arrivent d'outils de dessin hétérogènes, sans convention
//! fiable d'ordre des axes ni de signe. Pour S-JTSK (EPSG:5514) la zone
//! d'intérêt est dans le quadrant négatif et |Y| > |X| sur tout le
//! territoire: les deux propriétés servent d'heuristique de correction.

use geo::{Coord, LineString};
use inspire_cp::repair::ring;

use crate::error::OverlapError;

/// Nombre minimal de points d'un anneau fermé
pub const MIN_RING_POINTS: usize = 4;

/// Transforme une liste brute de sommets en anneau fermé et dédupliqué
///
/// 1. chaque coordonnée devient `-|v|`
/// 2. si moins de `max(1, n / 2)` points vérifient `|y| > |x|`, X et Y sont
///    permutés pour tout l'anneau (égalité: pas de permutation)
/// 3. fermeture de l'anneau (égalité exacte)
/// 4. suppression des doublons consécutifs exacts
///
/// # Errors
///
/// `OverlapError::Validation` s'il reste moins de 4 points.
pub fn normalize(raw: &[[f64; 2]]) -> Result<LineString, OverlapError> {
    let mut coords: Vec<Coord> = raw
        .iter()
        .map(|[x, y]| Coord {
            x: -x.abs(),
            y: -y.abs(),
        })
        .collect();

    if needs_axis_swap(&coords) {
        for c in coords.iter_mut() {
            std::mem::swap(&mut c.x, &mut c.y);
        }
    }

    ring::close(&mut coords);
    ring::dedup_consecutive(&mut coords);

    if coords.len() < MIN_RING_POINTS {
        return Err(OverlapError::validation(
            "Polygon has too few points after normalization.",
        ));
    }

    Ok(LineString::new(coords))
}

/// Vote majoritaire sur l'ordre des axes
fn needs_axis_swap(coords: &[Coord]) -> bool {
    let good = coords.iter().filter(|c| c.y.abs() > c.x.abs()).count();
    good < (coords.len() / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(ring: &LineString) -> Vec<(f64, f64)> {
        ring.0.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_closes_and_negates() {
        let ring = normalize(&[
            [745_000.0, 1_043_000.0],
            [744_900.0, 1_043_000.0],
            [744_900.0, 1_042_900.0],
        ])
        .unwrap();

        assert_eq!(
            points(&ring),
            vec![
                (-745_000.0, -1_043_000.0),
                (-744_900.0, -1_043_000.0),
                (-744_900.0, -1_042_900.0),
                (-745_000.0, -1_043_000.0),
            ]
        );
    }

    #[test]
    fn test_swaps_transposed_input() {
        let ring = normalize(&[
            [-1_043_000.0, -745_000.0],
            [-1_043_000.0, -744_900.0],
            [-1_042_900.0, -744_900.0],
            [-1_043_000.0, -745_000.0],
        ])
        .unwrap();

        assert_eq!(ring.0[0], Coord { x: -745_000.0, y: -1_043_000.0 });
        assert_eq!(ring.0[2], Coord { x: -744_900.0, y: -1_042_900.0 });
    }

    #[test]
    fn test_removes_consecutive_duplicates() {
        let ring = normalize(&[
            [-5.0, -10.0],
            [-5.0, -10.0],
            [-4.0, -12.0],
            [-6.0, -11.0],
            [-6.0, -11.0],
        ])
        .unwrap();

        assert_eq!(
            points(&ring),
            vec![(-5.0, -10.0), (-4.0, -12.0), (-6.0, -11.0), (-5.0, -10.0)]
        );
        assert!(ring.0.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_idempotent() {
        let first = normalize(&[[-5.0, -10.0], [-4.0, -12.0], [-6.0, -11.0]]).unwrap();
        let raw: Vec<[f64; 2]> = first.0.iter().map(|c| [c.x, c.y]).collect();
        let second = normalize(&raw).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_does_not_swap() {
        // 2 points "corrects" sur 4: seuil max(1, 2) = 2 atteint
        let ring = normalize(&[[1.0, 10.0], [2.0, 20.0], [30.0, 3.0], [40.0, 4.0]]).unwrap();
        assert_eq!(ring.0[0], Coord { x: -1.0, y: -10.0 });
    }

    #[test]
    fn test_minority_swaps() {
        // 1 point "correct" sur 4: permutation
        let ring = normalize(&[[1.0, 10.0], [20.0, 2.0], [30.0, 3.0], [40.0, 4.0]]).unwrap();
        assert_eq!(ring.0[0], Coord { x: -10.0, y: -1.0 });
        assert_eq!(ring.0[1], Coord { x: -2.0, y: -20.0 });
    }

    #[test]
    fn test_sign_folding_collapses_mirrored_points() {
        // Les quatre sommets deviennent (-10, -5) puis sont permutés et dédupliqués
        let result = normalize(&[[10.0, 5.0], [10.0, -5.0], [-10.0, -5.0], [-10.0, 5.0]]);
        assert!(matches!(result, Err(OverlapError::Validation(_))));
    }

    #[test]
    fn test_too_few_points() {
        assert!(normalize(&[]).is_err());
        assert!(normalize(&[[1.0, 2.0], [3.0, 4.0]]).is_err());

        match normalize(&[[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]]) {
            Err(OverlapError::Validation(msg)) => {
                assert_eq!(msg, "Polygon has too few points after normalization.")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
