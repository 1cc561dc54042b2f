//! Shared fixtures for client integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use georesolve_client::{GeocodingClient, GeocodingService};
use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{
    Answer, Feature, GeoPoint, GeoRect, LevelKind, Request, Response, SuccessResponse,
};

/// Replays canned responses in order and records every request it receives
#[derive(Default)]
pub struct ScriptedService {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedService {
    pub fn new(responses: Vec<Response>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses.into()), requests: Mutex::new(vec![]) })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl GeocodingService for ScriptedService {
    fn do_request(&self, request: &Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GeocodingError::Transport { reason: "no scripted response left".to_string() })
    }
}

/// Route library logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn client(service: &Arc<ScriptedService>) -> GeocodingClient {
    GeocodingClient::new(Arc::clone(service) as Arc<dyn GeocodingService>)
}

pub fn success(level: LevelKind, answers: Vec<Answer>) -> Response {
    Response::Success(SuccessResponse { message: String::new(), level: Some(level), answers })
}

/// Feature carrying every payload a geocoding response includes by default
pub fn feature(id: &str, name: &str) -> Feature {
    Feature {
        centroid: Some(GeoPoint::new(1.0, 2.0)),
        limit: Some(GeoRect::new(0.0, 1.0, 2.0, 3.0)),
        position: Some(GeoRect::new(0.5, 1.5, 1.5, 2.5)),
        ..Feature::new(id, name)
    }
}

pub fn answer(features: Vec<Feature>) -> Answer {
    Answer::new(features)
}
