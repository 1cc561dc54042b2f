//! Request builder for name-based and reverse geocoding.
//!
//! A [`Geocoder`] collects names, positional parents, a request-wide scope and
//! per-name overrides, then projects them into a [`GeocodingRequest`]. Every
//! builder method consumes the builder and returns a new value, so a partially
//! configured builder can be cloned and reused.

use std::collections::HashMap;

use crate::error::{GeocodingError, Result};
use crate::models::{
    AmbiguityResolver, GeoPoint, GeoRect, GeocodingRequest, IgnoringStrategy, LevelKind, MapRegion,
    PayloadKind, RegionQuery, ReverseGeocodingRequest,
};

/// A positional parent value; `None` leaves the slot without a parent
#[derive(Debug, Clone, PartialEq)]
pub struct Parent(pub Option<MapRegion>);

impl From<&str> for Parent {
    fn from(name: &str) -> Self {
        Parent(Some(MapRegion::with_name(name)))
    }
}

impl From<String> for Parent {
    fn from(name: String) -> Self {
        Parent(Some(MapRegion::Name(name)))
    }
}

impl From<MapRegion> for Parent {
    fn from(region: MapRegion) -> Self {
        Parent(Some(region))
    }
}

impl From<&MapRegion> for Parent {
    fn from(region: &MapRegion) -> Self {
        Parent(Some(region.clone()))
    }
}

impl<T: Into<MapRegion>> From<Option<T>> for Parent {
    fn from(value: Option<T>) -> Self {
        Parent(value.map(Into::into))
    }
}

/// Scope of a single `where` override
#[derive(Debug, Clone, PartialEq)]
pub enum WhereScope {
    /// Region the name must be searched in; must refer to exactly one entity
    Region(MapRegion),
    /// Box the namesake centroid must fall into
    Within(GeoRect),
}

/// Target parents and override values for [`Geocoder::where_`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    county: Option<MapRegion>,
    state: Option<MapRegion>,
    country: Option<MapRegion>,
    scope: Option<WhereScope>,
    closest_to: Option<GeoPoint>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn county(mut self, county: impl Into<MapRegion>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn state(mut self, state: impl Into<MapRegion>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<MapRegion>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<MapRegion>) -> Self {
        self.scope = Some(WhereScope::Region(scope.into()));
        self
    }

    pub fn within(mut self, rect: GeoRect) -> Self {
        self.scope = Some(WhereScope::Within(rect));
        self
    }

    pub fn closest_to(mut self, point: GeoPoint) -> Self {
        self.closest_to = Some(point);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    name: String,
    county: Option<MapRegion>,
    state: Option<MapRegion>,
    country: Option<MapRegion>,
}

impl SlotKey {
    fn parents_description(&self) -> Vec<String> {
        let mut parents = Vec::new();
        if let Some(county) = &self.county {
            parents.push(format!("county={}", county));
        }
        if let Some(state) = &self.state {
            parents.push(format!("state={}", state));
        }
        if let Some(country) = &self.country {
            parents.push(format!("country={}", country));
        }
        parents
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SlotOverride {
    scope: Option<MapRegion>,
    ambiguity_resolver: AmbiguityResolver,
}

/// Builder of a name-based geocoding request
#[derive(Debug, Clone, PartialEq)]
pub struct Geocoder {
    level: Option<LevelKind>,
    names: Vec<String>,
    scope: Vec<MapRegion>,
    countries: Vec<Option<MapRegion>>,
    states: Vec<Option<MapRegion>>,
    counties: Vec<Option<MapRegion>>,
    default_resolver: AmbiguityResolver,
    overrides: HashMap<SlotKey, SlotOverride>,
    highlights: bool,
    allow_ambiguous: bool,
    inc_res: u8,
}

/// Geocode `names` at `level`; no names selects every object of the level
pub fn geocode<I, S>(level: Option<LevelKind>, names: I) -> Geocoder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Geocoder::new(level, names)
}

pub fn geocode_countries<I, S>(names: I) -> Geocoder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Geocoder::new(Some(LevelKind::Country), names)
}

pub fn geocode_states<I, S>(names: I) -> Geocoder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Geocoder::new(Some(LevelKind::State), names)
}

pub fn geocode_counties<I, S>(names: I) -> Geocoder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Geocoder::new(Some(LevelKind::County), names)
}

pub fn geocode_cities<I, S>(names: I) -> Geocoder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Geocoder::new(Some(LevelKind::City), names)
}

impl Geocoder {
    pub fn new<I, S>(level: Option<LevelKind>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level,
            names: names.into_iter().map(Into::into).collect(),
            scope: Vec::new(),
            countries: Vec::new(),
            states: Vec::new(),
            counties: Vec::new(),
            default_resolver: AmbiguityResolver::Empty,
            overrides: HashMap::new(),
            highlights: false,
            allow_ambiguous: false,
            inc_res: 0,
        }
    }

    /// Select every object of `level`
    pub fn all(level: LevelKind) -> Self {
        Self::new(Some(level), Vec::<String>::new())
    }

    pub fn level(&self) -> Option<LevelKind> {
        self.level
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn highlights_enabled(&self) -> bool {
        self.highlights
    }

    pub fn resolution_increment(&self) -> u8 {
        self.inc_res
    }

    /// Request-wide region applied to every query
    pub fn scope(mut self, scope: impl Into<MapRegion>) -> Result<Self> {
        self.scope = vec![scope.into().ensure_single("scope")?];
        Ok(self)
    }

    pub fn countries<I, P>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Parent>,
    {
        self.countries = make_parents(countries);
        self
    }

    pub fn states<I, P>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Parent>,
    {
        self.states = make_parents(states);
        self
    }

    pub fn counties<I, P>(mut self, counties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Parent>,
    {
        self.counties = make_parents(counties);
        self
    }

    /// Add the `highlights` payload and column
    pub fn highlights(mut self, enabled: bool) -> Self {
        self.highlights = enabled;
        self
    }

    /// Keep every namesake of names without an explicit resolver
    pub fn allow_ambiguous(mut self) -> Self {
        self.default_resolver = AmbiguityResolver::Ignoring(IgnoringStrategy::TakeNamesakes);
        self.allow_ambiguous = true;
        self
    }

    /// Drop names with no match instead of failing
    pub fn drop_not_found(mut self) -> Self {
        self.default_resolver = AmbiguityResolver::Ignoring(IgnoringStrategy::SkipMissing);
        self
    }

    /// Drop names with no match or several matches instead of failing
    pub fn drop_not_matched(mut self) -> Self {
        self.default_resolver = AmbiguityResolver::Ignoring(IgnoringStrategy::SkipAll);
        self
    }

    /// Raise the auto-detected boundary resolution by `delta`
    pub fn inc_res(mut self, delta: u8) -> Self {
        self.inc_res = delta;
        self
    }

    /// Override scope and resolver of every slot matching `name` and the parents
    /// in `filter`. A later call for the same slot replaces the earlier one.
    pub fn where_(mut self, name: &str, filter: Where) -> Result<Self> {
        let key = SlotKey {
            name: name.to_string(),
            county: filter.county.map(|r| r.ensure_single("counties")).transpose()?,
            state: filter.state.map(|r| r.ensure_single("states")).transpose()?,
            country: filter.country.map(|r| r.ensure_single("countries")).transpose()?,
        };

        if !self.query_exists(&key) {
            return Err(GeocodingError::NotFoundInNames {
                name: key.name.clone(),
                parents: key.parents_description(),
            });
        }

        let slot_override = match filter.scope {
            None => SlotOverride {
                scope: None,
                ambiguity_resolver: AmbiguityResolver::new(None, filter.closest_to, None)?,
            },
            Some(WhereScope::Within(rect)) => SlotOverride {
                scope: None,
                ambiguity_resolver: AmbiguityResolver::new(None, filter.closest_to, Some(rect))?,
            },
            Some(WhereScope::Region(region)) => SlotOverride {
                scope: Some(region.ensure_single("scope")?),
                ambiguity_resolver: AmbiguityResolver::new(None, filter.closest_to, None)?,
            },
        };

        self.overrides.insert(key, slot_override);
        Ok(self)
    }

    fn query_exists(&self, key: &SlotKey) -> bool {
        (0..self.names.len()).any(|i| {
            self.names[i] == key.name
                && parent_at(&self.countries, i) == key.country.as_ref()
                && parent_at(&self.states, i) == key.state.as_ref()
                && parent_at(&self.counties, i) == key.county.as_ref()
        })
    }

    /// Project the accumulated state into a request; no network call happens here
    pub fn build_request(&self) -> Result<GeocodingRequest> {
        check_single_parents(&self.countries, "countries")?;
        check_single_parents(&self.states, "states")?;
        check_single_parents(&self.counties, "counties")?;

        let queries = if self.names.is_empty() {
            vec![RegionQuery {
                request: None,
                country: single_parent(&self.countries)?,
                state: single_parent(&self.states)?,
                county: single_parent(&self.counties)?,
                ..Default::default()
            }]
        } else {
            if !self.countries.is_empty() && !self.scope.is_empty() {
                return Err(GeocodingError::CountriesWithScope);
            }

            self.check_parents_count(&self.countries, "countries")?;
            self.check_parents_count(&self.states, "states")?;
            self.check_parents_count(&self.counties, "counties")?;

            self.names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let country = parent_at(&self.countries, i).cloned();
                    let state = parent_at(&self.states, i).cloned();
                    let county = parent_at(&self.counties, i).cloned();

                    let key = SlotKey {
                        name: name.clone(),
                        county: county.clone(),
                        state: state.clone(),
                        country: country.clone(),
                    };

                    let (scope, ambiguity_resolver) = match self.overrides.get(&key) {
                        Some(over) => {
                            (over.scope.clone(), over.ambiguity_resolver.or(self.default_resolver))
                        }
                        None => (None, self.default_resolver),
                    };

                    RegionQuery {
                        request: Some(name.clone()),
                        scope,
                        ambiguity_resolver,
                        country,
                        state,
                        county,
                    }
                })
                .collect()
        };

        let mut payload = vec![PayloadKind::Limits, PayloadKind::Positions, PayloadKind::Centroids];
        if self.highlights {
            payload.push(PayloadKind::Highlights);
        }

        let request = GeocodingRequest::new(
            payload,
            queries,
            self.scope.clone(),
            self.level,
            self.allow_ambiguous,
        )?;

        tracing::debug!(
            queries = request.region_queries.len(),
            level = ?request.level,
            allow_ambiguous = request.allow_ambiguous,
            "Built geocoding request"
        );

        Ok(request)
    }

    fn check_parents_count(&self, parents: &[Option<MapRegion>], level: &'static str) -> Result<()> {
        if !parents.is_empty() && parents.len() != self.names.len() {
            return Err(GeocodingError::ParentCountMismatch {
                level,
                parents: parents.len(),
                names: self.names.len(),
            });
        }
        Ok(())
    }
}

fn make_parents<I, P>(values: I) -> Vec<Option<MapRegion>>
where
    I: IntoIterator<Item = P>,
    P: Into<Parent>,
{
    values.into_iter().map(|v| v.into().0).collect()
}

fn parent_at(parents: &[Option<MapRegion>], index: usize) -> Option<&MapRegion> {
    parents.get(index).and_then(Option::as_ref)
}

/// Each parent stands for the one entity its query is searched in
fn check_single_parents(parents: &[Option<MapRegion>], argument: &'static str) -> Result<()> {
    for region in parents.iter().flatten() {
        if region.len() != 1 {
            return Err(GeocodingError::ExpectedSingleEntry { argument, count: region.len() });
        }
    }
    Ok(())
}

fn single_parent(parents: &[Option<MapRegion>]) -> Result<Option<MapRegion>> {
    match parents.len() {
        0 => Ok(None),
        1 => Ok(parents[0].clone()),
        n => Err(GeocodingError::TooManyParents(n)),
    }
}

/// Builder of a coordinate-to-object request
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocoder {
    coordinates: Vec<GeoPoint>,
    level: LevelKind,
    scope: Option<MapRegion>,
    inc_res: u8,
}

pub fn reverse_geocode(coordinates: Vec<GeoPoint>, level: LevelKind) -> ReverseGeocoder {
    ReverseGeocoder::new(coordinates, level)
}

impl ReverseGeocoder {
    pub fn new(coordinates: Vec<GeoPoint>, level: LevelKind) -> Self {
        Self { coordinates, level, scope: None, inc_res: 0 }
    }

    pub fn scope(mut self, scope: impl Into<MapRegion>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn inc_res(mut self, delta: u8) -> Self {
        self.inc_res = delta;
        self
    }

    pub fn level(&self) -> LevelKind {
        self.level
    }

    pub fn resolution_increment(&self) -> u8 {
        self.inc_res
    }

    pub fn build_request(&self) -> ReverseGeocodingRequest {
        ReverseGeocodingRequest {
            requested_payload: vec![PayloadKind::Centroids, PayloadKind::Positions, PayloadKind::Limits],
            resolution: None,
            coordinates: self.coordinates.clone(),
            level: self.level,
            scope: self.scope.clone(),
        }
    }

    /// One query per coordinate, named `[lon, lat]`
    pub fn queries(&self) -> Vec<RegionQuery> {
        self.coordinates
            .iter()
            .map(|p| RegionQuery::named(format!("[{:?}, {:?}]", p.lon, p.lat)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(request: &GeocodingRequest) -> Vec<Option<&str>> {
        request.region_queries.iter().map(|q| q.request.as_deref()).collect()
    }

    #[test]
    fn test_simple() {
        let request = geocode(None, ["foo"]).build_request().unwrap();

        assert_eq!(request.region_queries, vec![RegionQuery::named("foo")]);
        assert_eq!(
            request.requested_payload,
            vec![PayloadKind::Limits, PayloadKind::Positions, PayloadKind::Centroids]
        );
        assert!(!request.allow_ambiguous);
    }

    #[test]
    fn test_where_overrides_scope() {
        let request = geocode(None, ["foo"])
            .where_("foo", Where::new().scope("bar"))
            .unwrap()
            .build_request()
            .unwrap();

        assert_eq!(request.region_queries[0].scope, Some(MapRegion::with_name("bar")));
        assert!(request.scope.is_empty());
    }

    #[test]
    fn test_where_twice_keeps_last_scope() {
        let request = geocode(None, ["foo"])
            .where_("foo", Where::new().scope("bar"))
            .unwrap()
            .where_("foo", Where::new().scope("baz"))
            .unwrap()
            .build_request()
            .unwrap();

        assert_eq!(request.region_queries[0].scope, Some(MapRegion::with_name("baz")));
    }

    #[test]
    fn test_where_with_parents_and_duplicated_names() {
        let request = geocode(None, ["foo", "foo"])
            .states(["bar", "baz"])
            .where_("foo", Where::new().state("baz").scope("spam"))
            .unwrap()
            .build_request()
            .unwrap();

        assert_eq!(request.region_queries[0].scope, None);
        assert_eq!(request.region_queries[1].scope, Some(MapRegion::with_name("spam")));
    }

    #[test]
    fn test_parents_can_contain_nulls() {
        let request = geocode(None, ["foo", "bar"])
            .states([None, Some("baz")])
            .build_request()
            .unwrap();

        assert_eq!(request.region_queries[0].state, None);
        assert_eq!(request.region_queries[1].state, Some(MapRegion::with_name("baz")));
    }

    #[test]
    fn test_region_parent_keeps_ids() {
        let request = geocode(None, ["foo"])
            .states([MapRegion::place("bar_id", Some("bar".to_string()), LevelKind::State)])
            .build_request()
            .unwrap();

        assert_eq!(request.region_queries[0].state.as_ref().map(|s| s.values()), Some(vec!["bar_id"]));
    }

    #[test]
    fn test_where_within_box() {
        let rect = GeoRect::new(1.0, 2.0, 3.0, 4.0);
        let request = geocode(None, ["foo"])
            .where_("foo", Where::new().within(rect))
            .unwrap()
            .build_request()
            .unwrap();

        let query = &request.region_queries[0];
        assert_eq!(query.scope, None);
        assert_eq!(query.ambiguity_resolver, AmbiguityResolver::Within(rect));
    }

    #[test]
    fn test_where_within_and_closest_to_conflict() {
        let err = geocode(None, ["foo"])
            .where_(
                "foo",
                Where::new().within(GeoRect::new(1.0, 2.0, 3.0, 4.0)).closest_to(GeoPoint::new(1.0, 2.0)),
            )
            .unwrap_err();
        assert!(matches!(err, GeocodingError::ConflictingResolver));
    }

    #[test]
    fn test_allow_ambiguous_does_not_override_where() {
        let request = geocode(None, ["foo", "bar"])
            .where_("foo", Where::new().closest_to(GeoPoint::new(1.0, 2.0)))
            .unwrap()
            .allow_ambiguous()
            .build_request()
            .unwrap();

        assert!(request.allow_ambiguous);
        assert_eq!(
            request.region_queries[0].ambiguity_resolver,
            AmbiguityResolver::ClosestTo(GeoPoint::new(1.0, 2.0))
        );
        assert_eq!(
            request.region_queries[1].ambiguity_resolver,
            AmbiguityResolver::Ignoring(IgnoringStrategy::TakeNamesakes)
        );
    }

    #[test]
    fn test_allow_ambiguous_before_where() {
        let request = geocode(None, ["foo"])
            .allow_ambiguous()
            .where_("foo", Where::new().scope("bar"))
            .unwrap()
            .build_request()
            .unwrap();

        // Scope-only override keeps the default strategy
        assert_eq!(
            request.region_queries[0].ambiguity_resolver,
            AmbiguityResolver::Ignoring(IgnoringStrategy::TakeNamesakes)
        );
    }

    #[test]
    fn test_ignoring_strategies() {
        let missing = geocode(None, ["foo"]).drop_not_found().build_request().unwrap();
        assert_eq!(
            missing.region_queries[0].ambiguity_resolver.ignoring_strategy(),
            Some(IgnoringStrategy::SkipMissing)
        );
        assert!(!missing.allow_ambiguous);

        let all = geocode(None, ["foo"]).drop_not_matched().build_request().unwrap();
        assert_eq!(all.region_queries[0].ambiguity_resolver.ignoring_strategy(), Some(IgnoringStrategy::SkipAll));
    }

    #[test]
    fn test_global_scope() {
        let request = geocode(None, ["foo"]).scope("bar").unwrap().build_request().unwrap();
        assert_eq!(request.scope, vec![MapRegion::with_name("bar")]);
        assert_eq!(request.region_queries[0].scope, None);

        let request = geocode(None, ["foo"])
            .scope(MapRegion::with_ids(["bar_id"]))
            .unwrap()
            .build_request()
            .unwrap();
        assert_eq!(request.scope, vec![MapRegion::with_ids(["bar_id"])]);
    }

    #[test]
    fn test_request_without_name() {
        let request = geocode_counties(Vec::<String>::new()).states(["New York"]).build_request().unwrap();

        assert_eq!(request.level, Some(LevelKind::County));
        assert_eq!(names_of(&request), vec![None]);
        assert_eq!(request.region_queries[0].state, Some(MapRegion::with_name("New York")));
    }

    #[test]
    fn test_select_all_with_too_many_parents() {
        let err = Geocoder::all(LevelKind::County).states(["a", "b"]).build_request().unwrap_err();
        assert!(matches!(err, GeocodingError::TooManyParents(2)));
    }

    #[test]
    fn test_request_countries() {
        let request = Geocoder::all(LevelKind::Country).build_request().unwrap();
        assert_eq!(request.level, Some(LevelKind::Country));
        assert_eq!(names_of(&request), vec![None]);
    }

    #[test]
    fn test_us_48_in_scope() {
        let request = geocode_states(Vec::<String>::new()).scope("us-48").unwrap().build_request().unwrap();
        assert_eq!(request.scope, vec![MapRegion::with_name("us-48")]);
        assert_eq!(request.region_queries[0].scope, None);
    }

    #[test]
    fn test_scope_and_parent_county() {
        let request = geocode_cities(["foo_city"])
            .counties(["foo_county"])
            .scope("foo_country")
            .unwrap()
            .build_request()
            .unwrap();

        assert_eq!(request.level, Some(LevelKind::City));
        assert_eq!(request.scope, vec![MapRegion::with_name("foo_country")]);
        assert_eq!(request.region_queries[0].county, Some(MapRegion::with_name("foo_county")));
    }

    #[test]
    fn test_error_when_country_and_scope_set() {
        let err = geocode(None, ["foo"]).countries(["bar"]).scope("baz").unwrap().build_request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: countries and scope can't be used simultaneously");
    }

    #[test]
    fn test_error_when_names_and_parents_have_different_size() {
        let err = geocode(None, ["foo"]).countries(["bar", "baz"]).build_request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: countries count(2) != names count(1)");

        let err = geocode(None, ["foo"]).states(["bar", "baz"]).build_request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: states count(2) != names count(1)");

        let err = geocode(None, ["foo"]).counties(["bar", "baz"]).build_request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: counties count(2) != names count(1)");

        let err = geocode(None, ["foo", "bar"]).countries(["baz"]).build_request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: countries count(1) != names count(2)");
    }

    #[test]
    fn test_error_for_where_with_unknown_name() {
        let err = geocode(None, ["foo"]).where_("bar", Where::new().scope("baz")).unwrap_err();
        assert_eq!(err.to_string(), "bar is not found in names");

        let err = geocode(None, ["foo"])
            .where_("bar", Where::new().country("baz").scope("spam"))
            .unwrap_err();
        assert_eq!(err.to_string(), "bar(country=baz) is not found in names");
    }

    #[test]
    fn test_error_multi_entry_scope() {
        let err = geocode(None, ["foo"])
            .where_("foo", Where::new().scope(MapRegion::with_ids(["bar_id", "baz_id"])))
            .unwrap_err();
        assert_eq!(err.to_string(), "'scope' has 2 entries, but expected to have exactly 1");

        let err = geocode(None, ["foo"]).scope(MapRegion::with_ids(["bar_id", "baz_id"])).unwrap_err();
        assert_eq!(err.to_string(), "'scope' has 2 entries, but expected to have exactly 1");
    }

    #[test]
    fn test_error_multi_entry_parent() {
        let err = geocode_cities(["foo"])
            .states([MapRegion::with_ids(["a", "b"])])
            .build_request()
            .unwrap_err();
        assert_eq!(err.to_string(), "'states' has 2 entries, but expected to have exactly 1");

        let err = geocode_cities(["foo", "bar"])
            .countries([None, Some(MapRegion::with_ids(["a", "b", "c"]))])
            .build_request()
            .unwrap_err();
        assert_eq!(err.to_string(), "'countries' has 3 entries, but expected to have exactly 1");

        let err = geocode_cities(["foo"])
            .where_("foo", Where::new().country(MapRegion::with_ids(["a", "b"])))
            .unwrap_err();
        assert!(matches!(err, GeocodingError::ExpectedSingleEntry { argument: "countries", count: 2 }));
    }

    #[test]
    fn test_error_for_where_with_unknown_place_parent() {
        let place = MapRegion::place("42", Some("texas".to_string()), LevelKind::State);
        let err = geocode_cities(["foo"]).where_("bar", Where::new().state(place)).unwrap_err();
        assert_eq!(err.to_string(), "bar(state=texas) is not found in names");
    }

    #[test]
    fn test_missing_level_and_names() {
        let err = geocode(None, Vec::<String>::new()).build_request().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required argument. You must enter level and scope or request."
        );
    }

    #[test]
    fn test_builder_is_reusable() {
        let base = geocode(None, ["foo", "bar"]);
        let scoped = base.clone().where_("foo", Where::new().scope("baz")).unwrap();

        assert_eq!(base.build_request().unwrap().region_queries[0].scope, None);
        assert!(scoped.build_request().unwrap().region_queries[0].scope.is_some());
        assert_eq!(base.build_request().unwrap(), base.build_request().unwrap());
    }

    #[test]
    fn test_highlights_payload() {
        let request = geocode(None, ["foo"]).highlights(true).build_request().unwrap();
        assert!(request.requested_payload.contains(&PayloadKind::Highlights));
    }

    #[test]
    fn test_reverse_geocoder() {
        let geocoder = reverse_geocode(vec![GeoPoint::new(1.5, -2.0)], LevelKind::City).scope("foo");
        let request = geocoder.build_request();

        assert_eq!(request.level, LevelKind::City);
        assert_eq!(request.scope, Some(MapRegion::with_name("foo")));
        assert_eq!(geocoder.queries(), vec![RegionQuery::named("[1.5, -2.0]")]);
    }
}
