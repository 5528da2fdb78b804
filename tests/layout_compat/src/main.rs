fn main() {
    println!("Run `cargo test -p layout-compat` to execute layout compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use serde::Deserialize;
    use steambridge_callbacks::{DecodeError, decode, shape_for};
    use steambridge_native::CallbackId;

    /// A captured native result buffer and what it must decode to.
    #[derive(Debug, Deserialize)]
    struct Fixture {
        description: String,
        callback: i32,
        hex: String,
        /// Fields the decoded result must carry. Extra fields are allowed.
        #[serde(default)]
        expected: Option<serde_json::Value>,
        /// Expected decode error kind instead of a result.
        #[serde(default)]
        error: Option<String>,
    }

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn load_fixture(name: &str) -> Fixture {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn error_kind(e: &DecodeError) -> &'static str {
        match e {
            DecodeError::Truncated { .. } => "truncated",
            DecodeError::ShapeMismatch { .. } => "shapeMismatch",
        }
    }

    /// Decodes the fixture buffer and compares every expected field.
    fn check(name: &str) {
        let fixture = load_fixture(name);
        let callback = CallbackId(fixture.callback);
        let shape = shape_for(callback)
            .unwrap_or_else(|| panic!("{name}: no shape registered for callback {callback}"));
        let buf = hex::decode(&fixture.hex)
            .unwrap_or_else(|e| panic!("{name}: bad hex: {e}"));

        let decoded = decode(callback, shape, &buf);

        if let Some(kind) = &fixture.error {
            match decoded {
                Err(e) => assert_eq!(error_kind(&e), kind.as_str(), "{name}: {}", fixture.description),
                Ok(result) => panic!("{name}: expected {kind} error, decoded {result:?}"),
            }
            return;
        }

        let result = decoded.unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));
        let actual = serde_json::to_value(&result)
            .unwrap_or_else(|e| panic!("{name}: failed to serialize: {e}"));
        let expected = fixture
            .expected
            .unwrap_or_else(|| panic!("{name}: fixture has neither expected nor error"));
        let expected = expected
            .as_object()
            .unwrap_or_else(|| panic!("{name}: expected must be an object"));

        for (field, want) in expected {
            assert_eq!(
                actual.get(field),
                Some(want),
                "{name} ({}): field {field}\n  decoded: {actual}",
                fixture.description
            );
        }
    }

    #[test]
    fn every_fixture_has_a_test() {
        let mut names: Vec<String> = fs::read_dir(fixtures_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json"))
            .collect();
        names.sort();
        assert_eq!(names, FIXTURES);
    }

    const FIXTURES: &[&str] = &[
        "connection_status_changed.json",
        "create_item_result.json",
        "delete_item_result.json",
        "duration_control.json",
        "favorite_items_changed.json",
        "get_user_item_vote_result.json",
        "leaderboard_find_result.json",
        "leaderboard_score_uploaded.json",
        "set_user_item_vote_result.json",
        "store_auth_url_response.json",
        "submit_item_update_result.json",
        "subscribe_published_file_result.json",
        "truncated_create_item_result.json",
    ];

    // --- Hand-decoded workshop results ---

    #[test]
    fn fixture_create_item_result() {
        check("create_item_result.json");
    }

    #[test]
    fn fixture_submit_item_update_result() {
        check("submit_item_update_result.json");
    }

    #[test]
    fn fixture_subscribe_published_file_result() {
        check("subscribe_published_file_result.json");
    }

    #[test]
    fn fixture_delete_item_result() {
        check("delete_item_result.json");
    }

    #[test]
    fn fixture_set_user_item_vote_result() {
        check("set_user_item_vote_result.json");
    }

    #[test]
    fn fixture_get_user_item_vote_result() {
        check("get_user_item_vote_result.json");
    }

    #[test]
    fn fixture_favorite_items_changed() {
        check("favorite_items_changed.json");
    }

    #[test]
    fn fixture_truncated_create_item_result() {
        check("truncated_create_item_result.json");
    }

    // --- Networking ---

    #[test]
    fn fixture_connection_status_changed() {
        check("connection_status_changed.json");
    }

    // --- Generic aligned results ---

    #[test]
    fn fixture_leaderboard_find_result() {
        check("leaderboard_find_result.json");
    }

    #[test]
    fn fixture_leaderboard_score_uploaded() {
        check("leaderboard_score_uploaded.json");
    }

    #[test]
    fn fixture_duration_control() {
        check("duration_control.json");
    }

    #[test]
    fn fixture_store_auth_url_response() {
        check("store_auth_url_response.json");
    }
}
