use serde::{Deserialize, Serialize};

use super::geometry::{Boundary, GeoPoint, GeoRect};
use super::region::LevelKind;
use crate::error::{GeocodingError, Result};

/// Maximum number of not-found names listed in an ambiguity message
const NOT_FOUND_DISPLAY_LIMIT: usize = 10;

/// A resolved geographic entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,

    /// Name the entity was requested by, if the service echoes it
    pub query: Option<String>,

    /// Name the service found
    pub name: String,

    pub highlights: Option<Vec<String>>,
    pub centroid: Option<GeoPoint>,
    pub boundary: Option<Boundary>,
    pub limit: Option<GeoRect>,
    pub position: Option<GeoRect>,
}

impl Feature {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Default::default() }
    }
}

/// Candidate features for one query slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Answer {
    pub features: Vec<Feature>,
}

impl Answer {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamesakeParent {
    pub name: String,
    pub level: LevelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namesake {
    pub name: String,
    pub parents: Vec<NamesakeParent>,
}

/// Diagnostics for a name that matched zero or several objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguousFeature {
    pub query: String,
    pub total_namesake_count: usize,
    pub namesake_examples: Vec<Namesake>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuccessResponse {
    pub message: String,
    pub level: Option<LevelKind>,
    pub answers: Vec<Answer>,
}

/// Outcome of one round trip to the geocoding service
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(SuccessResponse),
    Ambiguous {
        message: String,
        level: Option<LevelKind>,
        features: Vec<AmbiguousFeature>,
    },
    Error {
        message: String,
    },
}

impl Response {
    pub fn status(&self) -> &'static str {
        match self {
            Response::Success(_) => "success",
            Response::Ambiguous { .. } => "ambiguous",
            Response::Error { .. } => "error",
        }
    }

    /// Unwrap a success response or turn the failure into an error
    pub fn into_success(self) -> Result<SuccessResponse> {
        match self {
            Response::Success(success) => Ok(success),
            Response::Ambiguous { features, .. } => {
                Err(GeocodingError::Ambiguous(format_ambiguous_message(&features)))
            }
            Response::Error { message } => Err(GeocodingError::Service(message)),
        }
    }
}

/// Render the diagnostics of an ambiguous response.
///
/// Names that matched nothing are reported first and exclusively; otherwise
/// every multi-match name contributes a block terminated by a newline.
pub fn format_ambiguous_message(features: &[AmbiguousFeature]) -> String {
    let mut not_found: Vec<&str> = Vec::new();
    for feature in features.iter().filter(|f| f.total_namesake_count == 0) {
        if !not_found.contains(&feature.query.as_str()) {
            not_found.push(&feature.query);
        }
    }

    if !not_found.is_empty() {
        let mut text = String::from("No objects were found for ");
        if not_found.len() > NOT_FOUND_DISPLAY_LIMIT {
            text.push_str(&not_found[..NOT_FOUND_DISPLAY_LIMIT].join(", "));
            text.push_str(&format!(" and ({}) more", not_found.len() - NOT_FOUND_DISPLAY_LIMIT));
        } else {
            text.push_str(&not_found.join(", "));
        }
        text.push_str(".\n");
        return text;
    }

    let multiple: Vec<&AmbiguousFeature> =
        features.iter().filter(|f| f.total_namesake_count > 0).collect();
    if multiple.is_empty() {
        return "Invalid bad feature".to_string();
    }

    multiple
        .into_iter()
        .map(|f| format!("{}\n", multiple_objects_message(f)))
        .collect()
}

fn multiple_objects_message(feature: &AmbiguousFeature) -> String {
    let lines: Vec<String> = feature
        .namesake_examples
        .iter()
        .map(|namesake| {
            if namesake.parents.is_empty() {
                format!("- {}", namesake.name)
            } else {
                let parents: Vec<&str> = namesake.parents.iter().map(|p| p.name.as_str()).collect();
                format!("- {} ({})", namesake.name, parents.join(", "))
            }
        })
        .collect();

    let header = format!(
        "Multiple objects ({}) were found for {}",
        feature.total_namesake_count, feature.query
    );

    if lines.is_empty() {
        format!("{}.", header)
    } else {
        format!("{}:\n{}", header, lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambiguous(query: &str, count: usize, examples: Vec<Namesake>) -> AmbiguousFeature {
        AmbiguousFeature { query: query.to_string(), total_namesake_count: count, namesake_examples: examples }
    }

    #[test]
    fn test_multiple_objects_message() {
        let features = vec![ambiguous(
            "NY",
            2,
            vec![Namesake {
                name: "NY".to_string(),
                parents: vec![NamesakeParent { name: "England".to_string(), level: LevelKind::Country }],
            }],
        )];

        assert_eq!(
            format_ambiguous_message(&features),
            "Multiple objects (2) were found for NY:\n- NY (England)\n"
        );
    }

    #[test]
    fn test_namesake_without_parents() {
        let features = vec![ambiguous(
            "foo",
            3,
            vec![
                Namesake { name: "foo".to_string(), parents: vec![] },
                Namesake {
                    name: "foo".to_string(),
                    parents: vec![
                        NamesakeParent { name: "bar".to_string(), level: LevelKind::State },
                        NamesakeParent { name: "baz".to_string(), level: LevelKind::Country },
                    ],
                },
            ],
        )];

        assert_eq!(
            format_ambiguous_message(&features),
            "Multiple objects (3) were found for foo:\n- foo\n- foo (bar, baz)\n"
        );
    }

    #[test]
    fn test_count_without_examples() {
        let features = vec![ambiguous("foo", 5, vec![])];
        assert_eq!(format_ambiguous_message(&features), "Multiple objects (5) were found for foo.\n");
    }

    #[test]
    fn test_not_found_names_take_priority() {
        let features = vec![ambiguous("foo", 2, vec![]), ambiguous("bar", 0, vec![]), ambiguous("baz", 0, vec![])];
        assert_eq!(format_ambiguous_message(&features), "No objects were found for bar, baz.\n");
    }

    #[test]
    fn test_not_found_names_are_truncated() {
        let features: Vec<AmbiguousFeature> =
            (0..12).map(|i| ambiguous(&format!("n{}", i), 0, vec![])).collect();
        assert_eq!(
            format_ambiguous_message(&features),
            "No objects were found for n0, n1, n2, n3, n4, n5, n6, n7, n8, n9 and (2) more.\n"
        );
    }

    #[test]
    fn test_error_response_is_verbatim() {
        let response = Response::Error { message: "error msg".to_string() };
        match response.into_success() {
            Err(GeocodingError::Service(message)) => assert_eq!(message, "error msg"),
            other => panic!("Expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_success() {
        let success = Response::Success(SuccessResponse::default()).into_success().unwrap();
        assert!(success.answers.is_empty());
    }
}
