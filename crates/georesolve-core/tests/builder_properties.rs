//! Property-based tests for the request builder.
//!
//! Query slots must stay aligned with the caller's names and parents, and
//! `where` overrides must only touch the slots they name.

use georesolve_core::models::{GeoRect, MapRegion};
use georesolve_core::{geocode, Where};
use proptest::prelude::*;

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 1..8)
}

fn names_and_parents() -> impl Strategy<Value = (Vec<String>, Vec<Option<String>>)> {
    names_strategy().prop_flat_map(|names| {
        let len = names.len();
        (Just(names), prop::collection::vec(prop::option::of("[A-Z]{1,3}"), len))
    })
}

proptest! {
    /// Queries follow the names one to one, in order, duplicates included
    #[test]
    fn prop_queries_preserve_order(names in names_strategy()) {
        let request = geocode(None, names.clone()).build_request().unwrap();

        let requested: Vec<String> = request
            .region_queries
            .iter()
            .map(|q| q.request.clone().unwrap_or_default())
            .collect();
        prop_assert_eq!(requested, names);
    }

    /// Every slot gets the parent at the same position
    #[test]
    fn prop_parents_are_positional((names, parents) in names_and_parents()) {
        let request = geocode(None, names.clone())
            .states(parents.clone())
            .countries(parents.clone())
            .build_request()
            .unwrap();

        prop_assert_eq!(request.region_queries.len(), names.len());
        for (query, parent) in request.region_queries.iter().zip(&parents) {
            let expected = parent.clone().map(MapRegion::Name);
            prop_assert_eq!(&query.state, &expected);
            prop_assert_eq!(&query.country, &expected);
        }
    }

    /// Parent lists of a different length are rejected
    #[test]
    fn prop_parent_count_mismatch(names in names_strategy(), extra in 1usize..4) {
        let parents: Vec<&str> = vec!["p"; names.len() + extra];
        let err = geocode(None, names.clone()).counties(parents).build_request().unwrap_err();

        prop_assert_eq!(
            err.to_string(),
            format!("Invalid request: counties count({}) != names count({})", names.len() + extra, names.len())
        );
    }

    /// `where` without parents only changes slots with the same name
    #[test]
    fn prop_where_touches_matching_slots(names in names_strategy(), pick in any::<prop::sample::Index>()) {
        let target = names[pick.index(names.len())].clone();
        let request = geocode(None, names.clone())
            .where_(&target, Where::new().scope("scope"))
            .unwrap()
            .build_request()
            .unwrap();

        for query in &request.region_queries {
            if query.request.as_deref() == Some(target.as_str()) {
                prop_assert_eq!(&query.scope, &Some(MapRegion::with_name("scope")));
            } else {
                prop_assert_eq!(&query.scope, &None);
            }
        }
    }

    /// The last `where` on a slot wins
    #[test]
    fn prop_where_last_write_wins(names in names_strategy(), scopes in prop::collection::vec("[a-z]{1,4}", 1..5)) {
        let target = names[0].clone();
        let mut geocoder = geocode(None, names.clone());
        for scope in &scopes {
            geocoder = geocoder.where_(&target, Where::new().scope(scope.as_str())).unwrap();
        }

        let request = geocoder.build_request().unwrap();
        let last = scopes.last().cloned().map(MapRegion::Name);
        prop_assert_eq!(&request.region_queries[0].scope, &last);
    }

    /// Building is a pure projection of the builder state
    #[test]
    fn prop_build_is_idempotent(names in names_strategy(), lon in -180.0f64..180.0) {
        let geocoder = geocode(None, names.clone())
            .where_(&names[0], Where::new().within(GeoRect::new(lon, -10.0, lon, 10.0)))
            .unwrap()
            .allow_ambiguous();

        prop_assert_eq!(geocoder.build_request().unwrap(), geocoder.build_request().unwrap());
    }
}

#[test]
fn test_countries_round_trip() {
    let request = geocode(None, ["foo", "foo"]).countries(["bar", "baz"]).build_request().unwrap();

    assert_eq!(request.region_queries[0].country, Some(MapRegion::with_name("bar")));
    assert_eq!(request.region_queries[1].country, Some(MapRegion::with_name("baz")));
}
