use georesolve_core::config::LayeredConfig;
use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{Request, Response};

use crate::ports::GeocodingService;
use crate::protocol::{format_request, parse_response};

/// Geocoding service reached over HTTP
pub struct HttpGeocodingService {
    /// Service endpoint (e.g., "http://localhost:3012")
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpGeocodingService {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: reqwest::Client::new() }
    }

    /// Create from the resolved `server_url` setting
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::new(config.server_url.value.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl GeocodingService for HttpGeocodingService {
    fn do_request(&self, request: &Request) -> Result<Response> {
        let body = format_request(request)?;

        // Use tokio runtime to execute async request
        let runtime = tokio::runtime::Runtime::new().map_err(|e| GeocodingError::Transport {
            reason: format!("Failed to create async runtime: {}", e),
        })?;

        tracing::debug!(url = %self.url, mode = request.mode(), "Sending geocoding request");

        let text = runtime.block_on(async {
            let response = self.client.post(&self.url).json(&body).send().await.map_err(|e| {
                GeocodingError::Transport {
                    reason: format!("Failed to connect to geocoding service at {}: {}", self.url, e),
                }
            })?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(GeocodingError::Transport {
                    reason: format!("Geocoding service error ({}): {}", status, error_text),
                });
            }

            response.text().await.map_err(|e| GeocodingError::Transport {
                reason: format!("Failed to read geocoding response: {}", e),
            })
        })?;

        let response = parse_response(&text)?;
        tracing::debug!(status = response.status(), "Received geocoding response");

        Ok(response)
    }
}
