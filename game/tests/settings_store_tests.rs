use std::fs;

use blockfall::background::BackgroundMode;
use blockfall::piece::PieceKind;
use blockfall::settings::{
    GameSettings, SettingsError, SettingsOverrides, SettingsStore, resolve_settings,
};
use blockfall::spawner::SpawnMode;

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SettingsStore::new(dir.path().join("absent.json"));

    assert!(store.try_load().expect("missing file is fine").is_none());
    assert_eq!(store.load(), GameSettings::default());
}

#[test]
fn save_then_load_restores_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

    let mut settings = GameSettings::default();
    settings.board.width = 12;
    settings.spawn.mode = SpawnMode::Fixed(PieceKind::S);
    settings.spawn.seed = Some(99);
    settings.background = BackgroundMode::Cycle;
    settings.timing.gravity_interval_ms = 750;

    store.save(&settings).expect("save");
    let loaded = store.try_load().expect("load").expect("file exists");

    assert_eq!(loaded, settings);
}

#[test]
fn malformed_file_reports_parse_error_and_load_falls_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").expect("write");
    let store = SettingsStore::new(&path);

    match store.try_load() {
        Err(SettingsError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(store.load(), GameSettings::default());
}

#[test]
fn partial_file_fills_defaults_and_clamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "board": { "width": 1000 }, "timing": { "gravity_interval_ms": 0 } }"#,
    )
    .expect("write");

    let loaded = SettingsStore::new(&path)
        .try_load()
        .expect("load")
        .expect("file exists");

    assert_eq!(loaded.board.width, 64);
    assert_eq!(loaded.board.height, 20);
    assert_eq!(loaded.timing.gravity_interval_ms, 1);
    assert_eq!(loaded.window, GameSettings::default().window);
}

#[test]
fn command_line_wins_over_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "spawn": { "mode": "uniform", "seed": 5 }, "board": { "width": 8 } }"#,
    )
    .expect("write");

    let from_file =
        resolve_settings(Some(path.as_path()), SettingsOverrides::default()).expect("resolve");
    assert_eq!(from_file.spawn.mode, SpawnMode::Uniform);
    assert_eq!(from_file.spawn.seed, Some(5));

    let overrides = SettingsOverrides {
        seed: Some(77),
        piece: Some(PieceKind::O),
    };
    let resolved = resolve_settings(Some(path.as_path()), overrides).expect("resolve");
    assert_eq!(resolved.spawn.mode, SpawnMode::Fixed(PieceKind::O));
    assert_eq!(resolved.spawn.seed, Some(77));
    assert_eq!(resolved.board.width, 8);
}

#[test]
fn explicit_settings_path_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.json");

    match resolve_settings(Some(path.as_path()), SettingsOverrides::default()) {
        Err(SettingsError::Missing { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected missing-file error, got {other:?}"),
    }
}

#[test]
fn explicit_settings_path_must_parse() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "board": 5 }"#).expect("write");

    let err = resolve_settings(Some(path.as_path()), SettingsOverrides::default())
        .expect_err("board must be an object");
    assert!(matches!(err, SettingsError::Parse { .. }), "{err}");
}
