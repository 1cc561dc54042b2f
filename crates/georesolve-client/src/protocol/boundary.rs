//! Boundary decoding from GeoJSON geometry.

use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{Boundary, GeoPoint, Multipolygon, Polygon, Ring};
use serde_json::Value;

/// Decode a feature boundary.
///
/// The service sends GeoJSON either embedded as a string or as an object.
/// A bare `{lon, lat}` object is accepted as a point.
pub fn parse_boundary(value: &Value) -> Result<Boundary> {
    let geojson: geojson::GeoJson = match value {
        Value::String(text) => text
            .parse()
            .map_err(|e| GeocodingError::Protocol(format!("Invalid boundary GeoJSON: {}", e)))?,
        Value::Object(map) if !map.contains_key("type") => {
            return parse_lon_lat(value).map(Boundary::Point);
        }
        other => geojson::GeoJson::from_json_value(other.clone())
            .map_err(|e| GeocodingError::Protocol(format!("Invalid boundary GeoJSON: {}", e)))?,
    };

    let geometry = match geojson {
        geojson::GeoJson::Geometry(geometry) => geometry,
        geojson::GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| GeocodingError::Protocol("Boundary feature has no geometry".to_string()))?,
        geojson::GeoJson::FeatureCollection(_) => {
            return Err(GeocodingError::Protocol(
                "Boundary must be a geometry, not a feature collection".to_string(),
            ))
        }
    };

    match geometry.value {
        geojson::Value::Point(position) => to_point(&position).map(Boundary::Point),
        geojson::Value::Polygon(rings) => to_polygon(&rings).map(Boundary::Polygon),
        geojson::Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| to_polygon(rings))
            .collect::<Result<Vec<_>>>()
            .map(|polygons| Boundary::MultiPolygon(Multipolygon::new(polygons))),
        geojson::Value::MultiPoint(_) => Err(unsupported("MultiPoint")),
        geojson::Value::LineString(_) => Err(unsupported("LineString")),
        geojson::Value::MultiLineString(_) => Err(unsupported("MultiLineString")),
        geojson::Value::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
    }
}

fn unsupported(kind: &str) -> GeocodingError {
    GeocodingError::Protocol(format!("Unsupported boundary geometry: {}", kind))
}

fn parse_lon_lat(value: &Value) -> Result<GeoPoint> {
    let lon = value.get("lon").and_then(Value::as_f64);
    let lat = value.get("lat").and_then(Value::as_f64);
    match (lon, lat) {
        (Some(lon), Some(lat)) => Ok(GeoPoint::new(lon, lat)),
        _ => Err(GeocodingError::Protocol(format!("Invalid point: {}", value))),
    }
}

fn to_point(position: &[f64]) -> Result<GeoPoint> {
    match position {
        [lon, lat, ..] => Ok(GeoPoint::new(*lon, *lat)),
        _ => Err(GeocodingError::Protocol(format!(
            "Position needs at least 2 coordinates, got {}",
            position.len()
        ))),
    }
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|p| to_point(p)).collect::<Result<Vec<_>>>().map(Ring::new))
        .collect::<Result<Vec<_>>>()
        .map(Polygon::new)
}
