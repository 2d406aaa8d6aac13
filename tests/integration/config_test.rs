//! Configuration file tests.

use bbviz::config::Config;
use bbviz::data::SourceKind;
use bbviz::error::VizError;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_load_full_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[data]
source = "sqlite"
database = "/srv/bb/BattedBallData.db"

[roster]
hitters = "/srv/bb/hitters.json"

[ui]
hover_debounce_ms = 250
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.data.source, SourceKind::Sqlite);
    assert_eq!(config.data.database, PathBuf::from("/srv/bb/BattedBallData.db"));
    assert_eq!(config.data.api_url, "http://127.0.0.1:5000");
    assert_eq!(config.roster.hitters, Some(PathBuf::from("/srv/bb/hitters.json")));
    assert_eq!(config.roster.pitchers, None);
    assert_eq!(config.ui.hover_debounce_ms, 250);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_file_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[data\nsource = 1").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, VizError::Config(_)));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_unknown_source_kind_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[data]\nsource = \"postgres\"\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_http_source_requires_web_url() {
    let mut config = Config::default();
    config.data.source = SourceKind::Http;
    config.data.api_url = "ftp://stats.example.com".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid scheme 'ftp'"));
}
