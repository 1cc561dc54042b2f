//! Resolved entity set returned by a geocoding round trip.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{
    Answer, Boundary, ExplicitRequest, Feature, GeoPoint, LevelKind, MapRegion,
    PayloadKind, RegionQuery, Request, Resolution,
};

use crate::ports::GeocodingService;
use crate::table::{
    BoundariesTable, CentroidsTable, GeoRow, GeoTable, LimitsTable, PlacesTable, PositionsTable,
};

/// Request names that never label a row
const US_48: &str = "us-48";

/// Immutable, order-preserving handle over resolved features.
///
/// Answers are aligned one to one with the queries that produced them,
/// duplicates included. Materialization methods are derived views; the ones
/// that need payloads the set does not hold fetch them by id.
#[derive(Clone)]
pub struct Geocodes {
    service: Arc<dyn GeocodingService>,
    level: LevelKind,
    queries: Vec<RegionQuery>,
    answers: Vec<Answer>,
    highlights: bool,
    inc_res: u8,
}

impl fmt::Debug for Geocodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Geocodes")
            .field("level", &self.level)
            .field("queries", &self.queries)
            .field("answers", &self.answers)
            .field("highlights", &self.highlights)
            .finish()
    }
}

impl Geocodes {
    pub fn new(
        service: Arc<dyn GeocodingService>,
        level: LevelKind,
        answers: Vec<Answer>,
        queries: Vec<RegionQuery>,
        highlights: bool,
    ) -> Result<Self> {
        if !answers.is_empty() && answers.len() != queries.len() {
            return Err(GeocodingError::Protocol(format!(
                "Expected {} answers, one per query, but got {}",
                queries.len(),
                answers.len()
            )));
        }

        Ok(Self { service, level, queries, answers, highlights, inc_res: 0 })
    }

    /// Raise the auto-detected boundary resolution by `delta`
    pub fn with_resolution_increment(mut self, delta: u8) -> Self {
        self.inc_res = delta;
        self
    }

    pub fn level(&self) -> LevelKind {
        self.level
    }

    pub fn queries(&self) -> &[RegionQuery] {
        &self.queries
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// All features in query order
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.answers.iter().flat_map(|a| a.features.iter())
    }

    /// Number of resolved features
    pub fn len(&self) -> usize {
        self.features().count()
    }

    pub fn is_empty(&self) -> bool {
        self.features().next().is_none()
    }

    /// Feature ids without duplicates, in first-seen order
    pub fn unique_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.features()
            .filter(|f| seen.insert(f.id.as_str()))
            .map(|f| f.id.clone())
            .collect()
    }

    /// One single-slot set per query
    pub fn as_list(&self) -> Vec<Geocodes> {
        self.slots()
            .map(|(query, answer)| Geocodes {
                service: Arc::clone(&self.service),
                level: self.level,
                queries: vec![query.clone()],
                answers: vec![answer.clone()],
                highlights: self.highlights,
                inc_res: self.inc_res,
            })
            .collect()
    }

    /// One place per query slot, positionally aligned with the queries, for
    /// use as the parents of another request.
    ///
    /// Fails when a slot resolved to anything but exactly one feature, since
    /// a parent list must keep one entry per name.
    pub fn to_parents(&self) -> Result<Vec<MapRegion>> {
        self.slots()
            .map(|(query, answer)| match answer.features.as_slice() {
                [feature] => Ok(MapRegion::place(
                    feature.id.clone(),
                    Some(select_request_string(query.request.as_deref(), &feature.name)),
                    self.level,
                )),
                features => Err(GeocodingError::ExpectedSingleEntry {
                    argument: "parents",
                    count: features.len(),
                }),
            })
            .collect()
    }

    /// Every feature as a place, flattened across slots
    pub fn to_map_regions(&self) -> Vec<MapRegion> {
        self.slots()
            .flat_map(|(query, answer)| {
                answer.features.iter().map(move |feature| {
                    MapRegion::place(
                        feature.id.clone(),
                        Some(select_request_string(query.request.as_deref(), &feature.name)),
                        self.level,
                    )
                })
            })
            .collect()
    }

    /// All features as a single id set
    pub fn to_scope(&self) -> MapRegion {
        MapRegion::Ids(self.unique_ids())
    }

    /// Centroid of the only entity in the set
    pub fn closest_point(&self) -> Result<GeoPoint> {
        let ids = self.unique_ids();
        if ids.len() != 1 {
            return Err(GeocodingError::ExpectedSingleEntry { argument: "closest_to", count: ids.len() });
        }

        if let Some(centroid) = self.features().find_map(|f| f.centroid) {
            return Ok(centroid);
        }

        let payloads = self.fetch(PayloadKind::Centroids, None)?;
        payloads
            .get(&ids[0])
            .and_then(|f| f.centroid)
            .ok_or_else(|| GeocodingError::MissingPayload { id: ids[0].clone(), payload: "centroid" })
    }

    /// Name and parent columns of every feature
    pub fn to_table(&self) -> PlacesTable {
        self.materialize(|_| Some(vec![()]))
    }

    pub fn centroids(&self) -> Result<CentroidsTable> {
        let payloads = self.payloads(PayloadKind::Centroids, |f| f.centroid.is_some())?;
        Ok(self.materialize(|feature| {
            let centroid = payloads.get(&feature.id).and_then(|p| p.centroid);
            present(centroid.map(|c| vec![c]), feature, "centroid")
        }))
    }

    /// Bounding boxes; a box crossing the antimeridian yields two rows
    pub fn limits(&self) -> Result<LimitsTable> {
        let payloads = self.payloads(PayloadKind::Limits, |f| f.limit.is_some())?;
        Ok(self.materialize(|feature| {
            let limit = payloads.get(&feature.id).and_then(|p| p.limit);
            present(limit.map(|r| r.split_antimeridian()), feature, "limit")
        }))
    }

    /// Viewport boxes; a box crossing the antimeridian yields two rows
    pub fn positions(&self) -> Result<PositionsTable> {
        let payloads = self.payloads(PayloadKind::Positions, |f| f.position.is_some())?;
        Ok(self.materialize(|feature| {
            let position = payloads.get(&feature.id).and_then(|p| p.position);
            present(position.map(|r| r.split_antimeridian()), feature, "position")
        }))
    }

    /// Boundaries at `resolution`, or at a resolution picked from the level
    /// and the number of features
    pub fn boundaries(&self, resolution: Option<Resolution>) -> Result<BoundariesTable> {
        if self.is_empty() {
            return Ok(GeoTable::new(vec![], self.highlights));
        }

        let resolution = resolution
            .unwrap_or_else(|| Resolution::autodetect(self.level, self.len(), self.inc_res));
        let payloads = self.fetch(PayloadKind::Boundaries, Some(resolution))?;

        Ok(self.materialize(|feature| {
            let boundary: Option<Boundary> = payloads.get(&feature.id).and_then(|p| p.boundary.clone());
            present(boundary.map(|b| vec![b]), feature, "boundary")
        }))
    }

    fn slots(&self) -> impl Iterator<Item = (&RegionQuery, &Answer)> {
        self.queries.iter().zip(self.answers.iter())
    }

    /// Payloads by feature id, from the set itself when every feature already
    /// carries the payload, otherwise from an explicit request
    fn payloads<P>(&self, kind: PayloadKind, has_payload: P) -> Result<HashMap<String, Feature>>
    where
        P: Fn(&Feature) -> bool,
    {
        if self.features().all(&has_payload) {
            return Ok(self.features().map(|f| (f.id.clone(), f.clone())).collect());
        }
        self.fetch(kind, None)
    }

    fn fetch(&self, kind: PayloadKind, resolution: Option<Resolution>) -> Result<HashMap<String, Feature>> {
        let ids = self.unique_ids();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut request = ExplicitRequest::new(vec![kind], ids);
        request.resolution = resolution;

        tracing::debug!(
            payload = kind.as_str(),
            ids = request.ids.len(),
            resolution = ?resolution.map(|r| r.value()),
            "Fetching payload by id"
        );

        let success = self.service.do_request(&Request::Explicit(request))?.into_success()?;

        let mut payloads = HashMap::new();
        for feature in success.answers.into_iter().flat_map(|a| a.features) {
            payloads.entry(feature.id.clone()).or_insert(feature);
        }
        Ok(payloads)
    }

    /// One row per feature per geometry part, in query order
    fn materialize<G, F>(&self, geometry: F) -> GeoTable<G>
    where
        F: Fn(&Feature) -> Option<Vec<G>>,
    {
        let mut rows = Vec::new();

        for (query, answer) in self.slots() {
            for feature in &answer.features {
                let Some(parts) = geometry(feature) else {
                    continue;
                };

                let request = select_request_string(query.request.as_deref(), &feature.name);
                for part in parts {
                    rows.push(GeoRow {
                        id: feature.id.clone(),
                        request: request.clone(),
                        found_name: feature.name.clone(),
                        parent_county: query.county.as_ref().and_then(|r| r.name_or_none()).map(str::to_string),
                        parent_state: query.state.as_ref().and_then(|r| r.name_or_none()).map(str::to_string),
                        parent_country: query.country.as_ref().and_then(|r| r.name_or_none()).map(str::to_string),
                        highlights: if self.highlights { feature.highlights.clone() } else { None },
                        geometry: part,
                    });
                }
            }
        }

        GeoTable::new(rows, self.highlights)
    }
}

fn present<G>(parts: Option<Vec<G>>, feature: &Feature, payload: &'static str) -> Option<Vec<G>> {
    if parts.is_none() {
        tracing::warn!(id = %feature.id, payload, "Geocoding response has no payload for feature, skipping row");
    }
    parts
}

/// Label of a row: the requested name, or the found name when the request
/// has no usable name
pub fn select_request_string(request: Option<&str>, found_name: &str) -> String {
    match request {
        Some(request) if !request.is_empty() && !request.eq_ignore_ascii_case(US_48) => request.to_string(),
        _ => found_name.to_string(),
    }
}

impl fmt::Display for Geocodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

impl From<&Geocodes> for MapRegion {
    fn from(geocodes: &Geocodes) -> Self {
        geocodes.to_scope()
    }
}
