//! Property tests for row materialization

mod common;

use common::{answer, client, feature, success, ScriptedService};
use georesolve_core::geocode_cities;
use georesolve_core::models::{Feature, GeoRect, LevelKind};
use proptest::prelude::*;

fn lon() -> impl Strategy<Value = f64> {
    (-179i32..=179).prop_map(f64::from)
}

proptest! {
    #[test]
    fn prop_rect_rows_follow_antimeridian(min_lon in lon(), max_lon in lon()) {
        prop_assume!(min_lon != max_lon);

        let rect = GeoRect::new(min_lon, -10.0, max_lon, 10.0);
        let service = ScriptedService::new(vec![success(
            LevelKind::City,
            vec![answer(vec![Feature { limit: Some(rect), ..feature("1", "Foo") }])],
        )]);

        let limits = client(&service).get_limits(&geocode_cities(["foo"])).unwrap();

        if min_lon > max_lon {
            prop_assert_eq!(limits.len(), 2);
            prop_assert_eq!(limits.rows()[0].geometry.max_lon, 180.0);
            prop_assert_eq!(limits.rows()[1].geometry.min_lon, -180.0);
            prop_assert_eq!(limits.found_names(), vec!["Foo", "Foo"]);
        } else {
            prop_assert_eq!(limits.len(), 1);
            prop_assert_eq!(limits.rows()[0].geometry, rect);
        }
    }

    #[test]
    fn prop_rows_keep_query_order(ids in prop::collection::vec(0u8..5, 1..8)) {
        let names: Vec<String> = ids.iter().map(|id| format!("name{}", id)).collect();
        let answers = ids
            .iter()
            .map(|id| answer(vec![feature(&id.to_string(), &format!("Name{}", id))]))
            .collect();
        let service = ScriptedService::new(vec![success(LevelKind::City, answers)]);

        let table = client(&service).get_geocodes(&geocode_cities(names.clone())).unwrap();

        let expected_ids: Vec<String> = ids.iter().map(u8::to_string).collect();
        prop_assert_eq!(table.ids(), expected_ids.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(table.requests(), names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
