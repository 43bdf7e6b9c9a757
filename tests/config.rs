//! Config persistence tests

use stanza::EditorConfig;

#[test]
fn test_defaults() {
    let config = EditorConfig::default();
    assert!(config.highlighting);
    assert_eq!(config.quit_times, 3);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EditorConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = EditorConfig {
        highlighting: false,
        quit_times: 1,
    };
    config.save_to(&path).unwrap();

    let loaded = EditorConfig::load_from(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "highlighting: false\n").unwrap();

    let config = EditorConfig::load_from(&path);
    assert!(!config.highlighting);
    assert_eq!(config.quit_times, 3);
}

#[test]
fn test_unparseable_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, ": not yaml [").unwrap();

    let config = EditorConfig::load_from(&path);
    assert_eq!(config, EditorConfig::default());
}
