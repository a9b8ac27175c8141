//! Progress file round trips and recovery

use guide_core::core::progress::ProgressMap;
use guide_core::core::types::{KeyScheme, ProgressKey};
use guide_core::persistence::{load_from_disk, save_to_disk, JsonFileStore, ProgressPort};
use guide_core::{Action, Config, GuideEngine};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let map: ProgressMap = [("oop-0", true), ("orm-0", false), ("basics-0", true)]
        .into_iter()
        .collect();

    save_to_disk(&map, &path).unwrap();
    let reloaded = load_from_disk(&path).unwrap();

    assert_eq!(reloaded, map);
    for (key, done) in map.iter() {
        assert_eq!(reloaded.is_completed(&ProgressKey::from(key)), done);
    }
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn test_legacy_payload_keeps_booleans_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    fs::write(&path, r#"{"oop-0": true, "orm-0": "yes", "git-0": null}"#).unwrap();

    let map = JsonFileStore::new(&path).load();
    let expected: ProgressMap = [("oop-0", true)].into_iter().collect();
    assert_eq!(map, expected);
}

#[test]
fn test_non_object_payload_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    for payload in ["[]", "42", "\"oop-0\"", "", "{"] {
        fs::write(&path, payload).unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty(), "payload {:?}", payload);
    }
}

#[test]
fn test_engine_restores_progress_on_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path());

    {
        let mut engine = GuideEngine::from_config(&config).unwrap();
        engine.dispatch(Action::SelectTopic("docker".into())).unwrap();
        engine
            .dispatch(Action::ToggleProgress {
                section_id: "containers".into(),
                index: 0,
            })
            .unwrap();
        engine.dispatch(Action::ToggleTheme).unwrap();
    }

    let engine = GuideEngine::from_config(&config).unwrap();
    assert!(engine
        .progress()
        .is_completed(&ProgressKey::from("containers-0")));
    assert_eq!(engine.percent(), 11);
    // Session state is not persisted.
    assert!(!engine.state().dark_mode);
    assert_eq!(engine.state().selected_topic_id, None);

    let raw = fs::read_to_string(config.progress_path()).unwrap();
    assert_eq!(raw, r#"{"containers-0":true}"#);
}

#[test]
fn test_custom_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    fs::write(
        &catalog_path,
        r#"[{"id":"rust","title":"Rust","icon":"book-open","sections":[
            {"id":"own","title":"Ownership","content":[
                {"question":"Who owns?","answer":"One owner.","codeExample":"let s = String::new();"}]}]}]"#,
    )
    .unwrap();

    let mut config = Config::new(dir.path());
    config.catalog_path = Some(catalog_path);
    config.key_scheme = KeyScheme::TopicQualified;

    let mut engine = GuideEngine::from_config(&config).unwrap();
    assert_eq!(engine.catalog().topics().len(), 1);
    engine.toggle_progress("own", 0).unwrap();
    assert_eq!(engine.percent(), 100);
    assert!(engine.progress().is_completed(&ProgressKey::from("rust/own-0")));
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(dir.path());
    config.catalog_path = Some(dir.path().join("nope.json"));
    assert!(GuideEngine::from_config(&config).is_err());
}
