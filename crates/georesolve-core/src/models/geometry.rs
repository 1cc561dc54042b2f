//! Geometry values returned by the geocoding service.
//!
//! These types mirror the payloads carried on the wire (centroids, bounding
//! rectangles and boundaries) and convert into `geo` crate types for
//! consumers that need native geometry.

use serde::{Deserialize, Serialize};

/// Longitude of the antimeridian
pub const ANTIMERIDIAN: f64 = 180.0;

/// Immutable longitude/latitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned longitude/latitude box.
///
/// A rect whose `min_lon` is greater than its `max_lon` wraps across the
/// antimeridian. Use [`GeoRect::split_antimeridian`] to obtain non-crossing
/// parts for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoRect {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self { min_lon, min_lat, max_lon, max_lat }
    }

    /// Check if the rect wraps across the antimeridian
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Split into non-crossing parts.
    ///
    /// Returns the rect itself when it does not cross the antimeridian,
    /// otherwise `min_lon..180` followed by `-180..max_lon`.
    pub fn split_antimeridian(&self) -> Vec<GeoRect> {
        if !self.crosses_antimeridian() {
            return vec![*self];
        }

        vec![
            GeoRect::new(self.min_lon, self.min_lat, ANTIMERIDIAN, self.max_lat),
            GeoRect::new(-ANTIMERIDIAN, self.min_lat, self.max_lon, self.max_lat),
        ]
    }
}

/// Closed sequence of points; callers keep first == last
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring {
    pub points: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

/// Exterior ring followed by zero or more holes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[Ring] {
        if self.rings.is_empty() {
            &[]
        } else {
            &self.rings[1..]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Multipolygon {
    pub polygons: Vec<Polygon>,
}

impl Multipolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

/// Boundary payload of a feature, decoded once from its GeoJSON `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Boundary {
    Point(GeoPoint),
    Polygon(Polygon),
    MultiPolygon(Multipolygon),
}

fn to_geo_line_string(ring: &Ring) -> geo::LineString<f64> {
    geo::LineString::new(ring.points.iter().map(|p| geo::Coord { x: p.lon, y: p.lat }).collect())
}

impl From<&GeoPoint> for geo::Point<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo::Point::new(point.lon, point.lat)
    }
}

impl From<&GeoRect> for geo::Polygon<f64> {
    fn from(rect: &GeoRect) -> Self {
        geo::Rect::new(
            geo::Coord { x: rect.min_lon, y: rect.min_lat },
            geo::Coord { x: rect.max_lon, y: rect.max_lat },
        )
        .to_polygon()
    }
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let exterior = polygon
            .exterior()
            .map(to_geo_line_string)
            .unwrap_or_else(|| geo::LineString::new(vec![]));
        let interiors = polygon.interiors().iter().map(to_geo_line_string).collect();
        geo::Polygon::new(exterior, interiors)
    }
}

impl From<&Multipolygon> for geo::MultiPolygon<f64> {
    fn from(multipolygon: &Multipolygon) -> Self {
        geo::MultiPolygon::new(multipolygon.polygons.iter().map(geo::Polygon::from).collect())
    }
}

impl From<&Boundary> for geo::Geometry<f64> {
    fn from(boundary: &Boundary) -> Self {
        match boundary {
            Boundary::Point(p) => geo::Geometry::Point(p.into()),
            Boundary::Polygon(p) => geo::Geometry::Polygon(p.into()),
            Boundary::MultiPolygon(mp) => geo::Geometry::MultiPolygon(mp.into()),
        }
    }
}
