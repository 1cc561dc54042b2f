//! Response decoding for protocol version 3.

use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{
    AmbiguousFeature, Answer, Feature, GeoPoint, GeoRect, LevelKind, Response, SuccessResponse,
};
use serde::Deserialize;

use super::boundary::parse_boundary;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Success,
    Ambiguous,
    Error,
}

#[derive(Debug, Deserialize)]
struct ResponseJson {
    status: Status,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<DataJson>,
}

#[derive(Debug, Default, Deserialize)]
struct DataJson {
    #[serde(default)]
    level: Option<LevelKind>,
    #[serde(default)]
    answers: Vec<AnswerJson>,
    #[serde(default)]
    features: Vec<AmbiguousFeature>,
}

#[derive(Debug, Deserialize)]
struct AnswerJson {
    #[serde(default)]
    features: Vec<FeatureJson>,
}

#[derive(Debug, Deserialize)]
struct FeatureJson {
    id: String,
    #[serde(default)]
    query: Option<String>,
    name: String,
    #[serde(default)]
    highlights: Option<Vec<String>>,
    #[serde(default)]
    boundary: Option<serde_json::Value>,
    #[serde(default)]
    centroid: Option<GeoPoint>,
    #[serde(default)]
    limit: Option<GeoRect>,
    #[serde(default)]
    position: Option<GeoRect>,
}

impl TryFrom<FeatureJson> for Feature {
    type Error = GeocodingError;

    fn try_from(json: FeatureJson) -> Result<Self> {
        let boundary = match json.boundary {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(parse_boundary(&value)?),
        };

        Ok(Feature {
            id: json.id,
            query: json.query,
            name: json.name,
            highlights: json.highlights,
            centroid: json.centroid,
            boundary,
            limit: json.limit,
            position: json.position,
        })
    }
}

/// Decode a JSON response document
pub fn parse_response(text: &str) -> Result<Response> {
    let json: ResponseJson = serde_json::from_str(text)
        .map_err(|e| GeocodingError::Protocol(format!("Failed to parse response: {}", e)))?;

    let data = json.data.unwrap_or_default();

    let response = match json.status {
        Status::Success => {
            let answers = data
                .answers
                .into_iter()
                .map(|answer| {
                    answer
                        .features
                        .into_iter()
                        .map(Feature::try_from)
                        .collect::<Result<Vec<_>>>()
                        .map(Answer::new)
                })
                .collect::<Result<Vec<_>>>()?;

            Response::Success(SuccessResponse { message: json.message, level: data.level, answers })
        }
        Status::Ambiguous => Response::Ambiguous {
            message: json.message,
            level: data.level,
            features: data.features,
        },
        Status::Error => Response::Error { message: json.message },
    };

    Ok(response)
}
