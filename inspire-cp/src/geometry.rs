//! Géométrie surfacique polymorphe
//!
//! La réparation d'un polygone invalide peut produire un polygone simple, un
//! multipolygone, ou une collection (linéaire dégénérée). Toutes les opérations
//! de surface et d'intersection sont définies pour chaque variante.

use std::borrow::Cow;

use geo::{
    Area, BooleanOps, BoundingRect, Geometry, GeometryCollection, Intersects, LineString,
    MultiPolygon, Point, Polygon, Rect,
};

/// Géométrie surfacique issue de la réparation
#[derive(Debug, Clone, PartialEq)]
pub enum Polygonal {
    /// Polygone simple valide
    Polygon(Polygon),
    /// Plusieurs polygones disjoints
    MultiPolygon(MultiPolygon),
    /// Collection hétérogène (parties surfaciques et linéaires)
    Collection(GeometryCollection),
}

impl Polygonal {
    /// Construit la variante la plus simple pour un ensemble de polygones
    pub fn from_parts(parts: MultiPolygon) -> Self {
        let mut polygons = parts.0;
        if polygons.len() == 1 {
            if let Some(polygon) = polygons.pop() {
                return Self::Polygon(polygon);
            }
        }
        Self::MultiPolygon(MultiPolygon::new(polygons))
    }

    /// Géométrie vide (aucune partie)
    pub fn empty() -> Self {
        Self::MultiPolygon(MultiPolygon::new(Vec::new()))
    }

    /// Vrai si la géométrie ne contient aucune coordonnée
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Polygon(p) => p.exterior().0.is_empty(),
            Self::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
            Self::Collection(_) => self.parts().is_empty(),
        }
    }

    /// Surface (non signée) des parties surfaciques
    pub fn area(&self) -> f64 {
        match self {
            Self::Polygon(p) => p.unsigned_area(),
            Self::MultiPolygon(mp) => mp.unsigned_area(),
            Self::Collection(_) => self.to_multi_polygon().unsigned_area(),
        }
    }

    /// Parties surfaciques sous forme de multipolygone
    pub fn to_multi_polygon(&self) -> MultiPolygon {
        match self {
            Self::Polygon(p) => MultiPolygon::new(vec![p.clone()]),
            Self::MultiPolygon(mp) => mp.clone(),
            Self::Collection(_) => MultiPolygon::new(
                self.parts()
                    .into_iter()
                    .filter_map(|part| match part {
                        Part::Area(p) => Some(p.into_owned()),
                        _ => None,
                    })
                    .collect(),
            ),
        }
    }

    /// Vrai si la géométrie possède une partie de surface non nulle
    pub fn has_area(&self) -> bool {
        self.area() > 0.0
    }

    /// Surface de l'intersection avec une autre géométrie
    pub fn intersection_area(&self, other: &Polygonal) -> f64 {
        let (Some(a), Some(b)) = (self.bounding_rect(), other.bounding_rect()) else {
            return 0.0;
        };
        if !a.intersects(&b) {
            return 0.0;
        }

        let left = self.to_multi_polygon();
        let right = other.to_multi_polygon();
        if left.0.is_empty() || right.0.is_empty() {
            return 0.0;
        }

        left.intersection(&right).unsigned_area()
    }

    /// Vrai si les deux géométries ont au moins un point commun (contact compris)
    pub fn intersects(&self, other: &Polygonal) -> bool {
        let (Some(a), Some(b)) = (self.bounding_rect(), other.bounding_rect()) else {
            return false;
        };
        if !a.intersects(&b) {
            return false;
        }

        let right = other.parts();
        self.parts()
            .iter()
            .any(|l| right.iter().any(|r| l.intersects(r)))
    }

    /// Emprise de toutes les coordonnées
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Self::Polygon(p) => p.bounding_rect(),
            Self::MultiPolygon(mp) => mp.bounding_rect(),
            Self::Collection(gc) => gc.bounding_rect(),
        }
    }

    /// Emprise des anneaux extérieurs des parties surfaciques
    pub fn exterior_bounds(&self) -> Option<Rect> {
        let exteriors: Vec<LineString> = self
            .to_multi_polygon()
            .0
            .into_iter()
            .map(|p| p.into_inner().0)
            .collect();
        geo::MultiLineString::new(exteriors).bounding_rect()
    }

    /// Conversion vers `geo::Geometry`
    pub fn to_geometry(&self) -> Geometry {
        match self {
            Self::Polygon(p) => Geometry::Polygon(p.clone()),
            Self::MultiPolygon(mp) => Geometry::MultiPolygon(mp.clone()),
            Self::Collection(gc) => Geometry::GeometryCollection(gc.clone()),
        }
    }

    /// Nom du type de géométrie
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::Collection(_) => "GeometryCollection",
        }
    }

    /// Aplatit la géométrie en parties élémentaires (empruntées si possible)
    fn parts(&self) -> Vec<Part<'_>> {
        let mut parts = Vec::new();
        match self {
            Self::Polygon(p) => push_polygon(&mut parts, Cow::Borrowed(p)),
            Self::MultiPolygon(mp) => {
                for p in &mp.0 {
                    push_polygon(&mut parts, Cow::Borrowed(p));
                }
            }
            Self::Collection(gc) => {
                for g in &gc.0 {
                    flatten(&mut parts, g);
                }
            }
        }
        parts
    }
}

impl From<Polygon> for Polygonal {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

/// Partie élémentaire d'une géométrie
#[derive(Debug, Clone)]
enum Part<'a> {
    Area(Cow<'a, Polygon>),
    Line(Cow<'a, LineString>),
    Point(Point),
}

impl Part<'_> {
    fn intersects(&self, other: &Part) -> bool {
        match (self, other) {
            (Part::Area(a), Part::Area(b)) => (**a).intersects(&**b),
            (Part::Area(a), Part::Line(l)) | (Part::Line(l), Part::Area(a)) => {
                (**a).intersects(&**l)
            }
            (Part::Area(a), Part::Point(p)) | (Part::Point(p), Part::Area(a)) => {
                (**a).intersects(p)
            }
            (Part::Line(a), Part::Line(b)) => (**a).intersects(&**b),
            (Part::Line(l), Part::Point(p)) | (Part::Point(p), Part::Line(l)) => {
                (**l).intersects(p)
            }
            (Part::Point(a), Part::Point(b)) => a == b,
        }
    }
}

fn push_polygon<'a>(parts: &mut Vec<Part<'a>>, polygon: Cow<'a, Polygon>) {
    if !polygon.exterior().0.is_empty() {
        parts.push(Part::Area(polygon));
    }
}

fn push_line<'a>(parts: &mut Vec<Part<'a>>, line: Cow<'a, LineString>) {
    match line.0.len() {
        0 => {}
        1 => parts.push(Part::Point(Point(line.0[0]))),
        _ => parts.push(Part::Line(line)),
    }
}

fn flatten<'a>(parts: &mut Vec<Part<'a>>, geometry: &'a Geometry) {
    match geometry {
        Geometry::Point(p) => parts.push(Part::Point(*p)),
        Geometry::MultiPoint(mp) => parts.extend(mp.0.iter().map(|p| Part::Point(*p))),
        Geometry::Line(l) => {
            push_line(parts, Cow::Owned(LineString::new(vec![l.start, l.end])))
        }
        Geometry::LineString(ls) => push_line(parts, Cow::Borrowed(ls)),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                push_line(parts, Cow::Borrowed(ls));
            }
        }
        Geometry::Polygon(p) => push_polygon(parts, Cow::Borrowed(p)),
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                push_polygon(parts, Cow::Borrowed(p));
            }
        }
        Geometry::Rect(r) => push_polygon(parts, Cow::Owned(r.to_polygon())),
        Geometry::Triangle(t) => push_polygon(parts, Cow::Owned(t.to_polygon())),
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                flatten(parts, g);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, polygon};

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]
    }

    #[test]
    fn test_from_parts_single() {
        let parts = MultiPolygon::new(vec![square(0.0, 0.0, 1.0)]);
        assert!(matches!(Polygonal::from_parts(parts), Polygonal::Polygon(_)));
    }

    #[test]
    fn test_from_parts_multi() {
        let parts = MultiPolygon::new(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)]);
        let geom = Polygonal::from_parts(parts);
        assert_eq!(geom.kind(), "MultiPolygon");
        assert!((geom.area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let geom = Polygonal::empty();
        assert!(geom.is_empty());
        assert_eq!(geom.area(), 0.0);
        assert!(geom.bounding_rect().is_none());
    }

    #[test]
    fn test_is_empty_per_variant() {
        assert!(!Polygonal::from(square(0.0, 0.0, 1.0)).is_empty());
        assert!(Polygonal::from(Polygon::new(LineString::new(vec![]), vec![])).is_empty());

        let multi = Polygonal::MultiPolygon(MultiPolygon::new(vec![
            Polygon::new(LineString::new(vec![]), vec![]),
            square(3.0, 3.0, 1.0),
        ]));
        assert!(!multi.is_empty());

        let points_only = Polygonal::Collection(GeometryCollection(vec![Geometry::Point(
            Point::new(1.0, 1.0),
        )]));
        assert!(!points_only.is_empty());
        assert!(Polygonal::Collection(GeometryCollection(vec![])).is_empty());
    }

    #[test]
    fn test_multi_polygon_intersects_collection_parts() {
        let multi = Polygonal::from_parts(MultiPolygon::new(vec![
            square(0.0, 0.0, 1.0),
            square(10.0, 10.0, 1.0),
        ]));
        let collection = Polygonal::Collection(GeometryCollection(vec![
            Geometry::Rect(Rect::new(coord! { x: 10.5, y: 10.5 }, coord! { x: 12.0, y: 12.0 })),
            Geometry::Point(Point::new(50.0, 50.0)),
        ]));
        assert!(multi.intersects(&collection));
        assert!((multi.intersection_area(&collection) - 0.25).abs() < 1e-9);
        assert_eq!(collection.to_multi_polygon().0.len(), 1);
    }

    #[test]
    fn test_intersection_area_partial() {
        let a = Polygonal::from(square(0.0, 0.0, 10.0));
        let b = Polygonal::from(square(5.0, 5.0, 10.0));
        assert!((a.intersection_area(&b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersection_area_disjoint() {
        let a = Polygonal::from(square(0.0, 0.0, 10.0));
        let b = Polygonal::from(square(50.0, 50.0, 10.0));
        assert_eq!(a.intersection_area(&b), 0.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_corner_contact_intersects_without_area() {
        let a = Polygonal::from(square(0.0, 0.0, 10.0));
        let b = Polygonal::from(square(10.0, 10.0, 10.0));
        assert!(a.intersection_area(&b) < 1e-9);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_collection_linework() {
        let line = LineString::new(vec![coord! { x: 0.0, y: 5.0 }, coord! { x: 20.0, y: 5.0 }]);
        let collection = Polygonal::Collection(GeometryCollection(vec![
            Geometry::LineString(line),
        ]));
        let square = Polygonal::from(square(0.0, 0.0, 10.0));

        assert!(!collection.is_empty());
        assert_eq!(collection.area(), 0.0);
        assert_eq!(square.intersection_area(&collection), 0.0);
        assert!(square.intersects(&collection));
    }

    #[test]
    fn test_exterior_bounds_ignores_linework() {
        let collection = Polygonal::Collection(GeometryCollection(vec![
            Geometry::Polygon(square(0.0, 0.0, 2.0)),
            Geometry::LineString(LineString::new(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 100.0, y: 100.0 },
            ])),
        ]));
        let bounds = collection.exterior_bounds().unwrap();
        assert_eq!(bounds.max().x, 2.0);
        assert_eq!(collection.bounding_rect().unwrap().max().x, 100.0);
    }
}
