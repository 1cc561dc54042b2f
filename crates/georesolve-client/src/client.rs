use std::sync::Arc;

use georesolve_core::config::LayeredConfig;
use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{LevelKind, Request, Resolution, NAMESAKE_MAX_COUNT};
use georesolve_core::{Geocoder, ReverseGeocoder};

use crate::geocodes::Geocodes;
use crate::http::HttpGeocodingService;
use crate::ports::GeocodingService;
use crate::table::{BoundariesTable, CentroidsTable, LimitsTable, PlacesTable, PositionsTable};

/// Either kind of configured lookup
#[derive(Debug, Clone, Copy)]
pub enum GeocoderRef<'a> {
    Forward(&'a Geocoder),
    Reverse(&'a ReverseGeocoder),
}

impl<'a> From<&'a Geocoder> for GeocoderRef<'a> {
    fn from(geocoder: &'a Geocoder) -> Self {
        GeocoderRef::Forward(geocoder)
    }
}

impl<'a> From<&'a ReverseGeocoder> for GeocoderRef<'a> {
    fn from(geocoder: &'a ReverseGeocoder) -> Self {
        GeocoderRef::Reverse(geocoder)
    }
}

/// Runs geocoding round trips against a service
#[derive(Clone)]
pub struct GeocodingClient {
    service: Arc<dyn GeocodingService>,
    namesake_example_limit: usize,
}

impl GeocodingClient {
    pub fn new(service: Arc<dyn GeocodingService>) -> Self {
        Self { service, namesake_example_limit: NAMESAKE_MAX_COUNT }
    }

    /// Client talking HTTP to the configured server
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::new(Arc::new(HttpGeocodingService::from_config(config)))
            .with_namesake_example_limit(config.namesake_example_limit.value)
    }

    pub fn with_namesake_example_limit(mut self, limit: usize) -> Self {
        self.namesake_example_limit = limit;
        self
    }

    pub fn service(&self) -> &Arc<dyn GeocodingService> {
        &self.service
    }

    /// Resolve names into a set of features
    pub fn geocode(&self, geocoder: &Geocoder) -> Result<Geocodes> {
        let request = geocoder
            .build_request()?
            .with_namesake_example_limit(self.namesake_example_limit);
        let queries = request.region_queries.clone();

        tracing::info!(
            level = ?geocoder.level(),
            names = geocoder.names().len(),
            "Geocoding"
        );

        let success = self.service.do_request(&Request::Geocoding(request))?.into_success()?;

        let level = success.level.or(geocoder.level()).ok_or_else(|| {
            GeocodingError::Protocol("response has no level and none was requested".to_string())
        })?;

        tracing::debug!(
            level = %level,
            answers = success.answers.len(),
            "Geocoding complete"
        );

        let geocodes = Geocodes::new(
            Arc::clone(&self.service),
            level,
            success.answers,
            queries,
            geocoder.highlights_enabled(),
        )?;

        Ok(geocodes.with_resolution_increment(geocoder.resolution_increment()))
    }

    /// Find the features that contain each coordinate
    pub fn reverse_geocode(&self, geocoder: &ReverseGeocoder) -> Result<Geocodes> {
        let request = geocoder.build_request();

        tracing::info!(
            level = %geocoder.level(),
            coordinates = request.coordinates.len(),
            "Reverse geocoding"
        );

        let success = self.service.do_request(&Request::Reverse(request))?.into_success()?;
        let level: LevelKind = success.level.unwrap_or(geocoder.level());

        let geocodes = Geocodes::new(
            Arc::clone(&self.service),
            level,
            success.answers,
            geocoder.queries(),
            false,
        )?;

        Ok(geocodes.with_resolution_increment(geocoder.resolution_increment()))
    }

    pub fn get_geocodes<'a>(&self, geocoder: impl Into<GeocoderRef<'a>>) -> Result<PlacesTable> {
        Ok(self.resolve(geocoder.into())?.to_table())
    }

    pub fn get_centroids<'a>(&self, geocoder: impl Into<GeocoderRef<'a>>) -> Result<CentroidsTable> {
        self.resolve(geocoder.into())?.centroids()
    }

    pub fn get_limits<'a>(&self, geocoder: impl Into<GeocoderRef<'a>>) -> Result<LimitsTable> {
        self.resolve(geocoder.into())?.limits()
    }

    pub fn get_positions<'a>(&self, geocoder: impl Into<GeocoderRef<'a>>) -> Result<PositionsTable> {
        self.resolve(geocoder.into())?.positions()
    }

    pub fn get_boundaries<'a>(
        &self,
        geocoder: impl Into<GeocoderRef<'a>>,
        resolution: Option<Resolution>,
    ) -> Result<BoundariesTable> {
        self.resolve(geocoder.into())?.boundaries(resolution)
    }

    fn resolve(&self, geocoder: GeocoderRef<'_>) -> Result<Geocodes> {
        match geocoder {
            GeocoderRef::Forward(geocoder) => self.geocode(geocoder),
            GeocoderRef::Reverse(geocoder) => self.reverse_geocode(geocoder),
        }
    }
}
