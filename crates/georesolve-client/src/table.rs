//! Row-oriented views over resolved features.
//!
//! Every table starts with the `id`, `request` and `found_name` columns,
//! followed by the parent columns that hold at least one value, the optional
//! `highlights` column, and the geometry columns of its payload kind.

use std::fmt;

use georesolve_core::models::{Boundary, GeoPoint, GeoRect};
use tabled::builder::Builder;
use tabled::settings::Style;

pub const COLUMN_ID: &str = "id";
pub const COLUMN_REQUEST: &str = "request";
pub const COLUMN_FOUND_NAME: &str = "found_name";
pub const COLUMN_COUNTY: &str = "parent_county";
pub const COLUMN_STATE: &str = "parent_state";
pub const COLUMN_COUNTRY: &str = "parent_country";
pub const COLUMN_HIGHLIGHTS: &str = "highlights";

/// Payload columns of a table
pub trait TableGeometry {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// Conversion of a payload into `geo` geometry
pub trait NativeGeometry {
    fn to_geo(&self) -> geo::Geometry<f64>;
}

impl TableGeometry for () {
    fn headers() -> Vec<&'static str> {
        vec![]
    }

    fn cells(&self) -> Vec<String> {
        vec![]
    }
}

impl TableGeometry for GeoPoint {
    fn headers() -> Vec<&'static str> {
        vec!["lon", "lat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.lon.to_string(), self.lat.to_string()]
    }
}

impl NativeGeometry for GeoPoint {
    fn to_geo(&self) -> geo::Geometry<f64> {
        geo::Geometry::Point(self.into())
    }
}

impl TableGeometry for GeoRect {
    fn headers() -> Vec<&'static str> {
        vec!["lonmin", "latmin", "lonmax", "latmax"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.min_lon.to_string(),
            self.min_lat.to_string(),
            self.max_lon.to_string(),
            self.max_lat.to_string(),
        ]
    }
}

impl NativeGeometry for GeoRect {
    fn to_geo(&self) -> geo::Geometry<f64> {
        geo::Geometry::Polygon(self.into())
    }
}

impl TableGeometry for Boundary {
    fn headers() -> Vec<&'static str> {
        vec!["geometry"]
    }

    fn cells(&self) -> Vec<String> {
        let summary = match self {
            Boundary::Point(p) => format!("POINT ({} {})", p.lon, p.lat),
            Boundary::Polygon(p) => format!("POLYGON ({} rings)", p.rings.len()),
            Boundary::MultiPolygon(mp) => format!("MULTIPOLYGON ({} polygons)", mp.polygons.len()),
        };
        vec![summary]
    }
}

impl NativeGeometry for Boundary {
    fn to_geo(&self) -> geo::Geometry<f64> {
        self.into()
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRow<G> {
    pub id: String,
    pub request: String,
    pub found_name: String,
    pub parent_county: Option<String>,
    pub parent_state: Option<String>,
    pub parent_country: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub geometry: G,
}

/// Ordered rows of one payload kind
#[derive(Debug, Clone, PartialEq)]
pub struct GeoTable<G> {
    rows: Vec<GeoRow<G>>,
    highlights: bool,
}

pub type PlacesTable = GeoTable<()>;
pub type CentroidsTable = GeoTable<GeoPoint>;
pub type LimitsTable = GeoTable<GeoRect>;
pub type PositionsTable = GeoTable<GeoRect>;
pub type BoundariesTable = GeoTable<Boundary>;

impl<G> GeoTable<G> {
    pub fn new(rows: Vec<GeoRow<G>>, highlights: bool) -> Self {
        Self { rows, highlights }
    }

    pub fn rows(&self) -> &[GeoRow<G>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn requests(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.request.as_str()).collect()
    }

    pub fn found_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.found_name.as_str()).collect()
    }

    fn has_county(&self) -> bool {
        self.rows.iter().any(|r| r.parent_county.is_some())
    }

    fn has_state(&self) -> bool {
        self.rows.iter().any(|r| r.parent_state.is_some())
    }

    fn has_country(&self) -> bool {
        self.rows.iter().any(|r| r.parent_country.is_some())
    }
}

impl<G: TableGeometry> GeoTable<G> {
    /// Column names in output order
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec![COLUMN_ID, COLUMN_REQUEST, COLUMN_FOUND_NAME];
        if self.has_county() {
            columns.push(COLUMN_COUNTY);
        }
        if self.has_state() {
            columns.push(COLUMN_STATE);
        }
        if self.has_country() {
            columns.push(COLUMN_COUNTRY);
        }
        if self.highlights {
            columns.push(COLUMN_HIGHLIGHTS);
        }
        columns.extend(G::headers());
        columns
    }

    /// Cell values of every row, aligned with [`GeoTable::columns`]
    pub fn records(&self) -> Vec<Vec<String>> {
        let (county, state, country) = (self.has_county(), self.has_state(), self.has_country());

        self.rows
            .iter()
            .map(|row| {
                let mut record = vec![row.id.clone(), row.request.clone(), row.found_name.clone()];
                if county {
                    record.push(row.parent_county.clone().unwrap_or_default());
                }
                if state {
                    record.push(row.parent_state.clone().unwrap_or_default());
                }
                if country {
                    record.push(row.parent_country.clone().unwrap_or_default());
                }
                if self.highlights {
                    record.push(row.highlights.as_ref().map(|h| h.join(", ")).unwrap_or_default());
                }
                record.extend(row.geometry.cells());
                record
            })
            .collect()
    }
}

impl<G: NativeGeometry> GeoTable<G> {
    /// Native geometry of every row
    pub fn to_geo(&self) -> Vec<geo::Geometry<f64>> {
        self.rows.iter().map(|r| r.geometry.to_geo()).collect()
    }
}

impl<G: TableGeometry> fmt::Display for GeoTable<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.columns().into_iter().map(String::from));
        for record in self.records() {
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        write!(f, "{}", table)
    }
}
