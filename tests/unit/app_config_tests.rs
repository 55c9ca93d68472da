/*!
 * Tests for app configuration functionality
 */

use std::path::PathBuf;

use xliffsync::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("xliffsync.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.languages, vec!["en"]);
    let reloaded = Config::load(&path).unwrap();
    assert_eq!(reloaded.extension, "xliff");
    assert_eq!(reloaded.localization_path, PathBuf::from("localizations"));
}

#[test]
fn test_save_then_load_shouldKeepAllFields() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("config.json");
    let config = Config {
        languages: vec!["de".to_string(), "pt-BR".to_string()],
        localization_path: PathBuf::from("build/l10n"),
        extension: "xlf".to_string(),
        project_path: Some(PathBuf::from("App.xcodeproj")),
        nodes_path: Some(PathBuf::from("nodes.json")),
        concurrent_languages: true,
        log_level: LogLevel::Debug,
    };

    config.save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded.languages, config.languages);
    assert_eq!(loaded.localization_path, config.localization_path);
    assert_eq!(loaded.extension, "xlf");
    assert_eq!(loaded.project_path, config.project_path);
    assert_eq!(loaded.nodes_path, config.nodes_path);
    assert!(loaded.concurrent_languages);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "bad.json", "{ languages: ").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_validate_withPathLikeLanguage_shouldFail() {
    let config = Config {
        languages: vec!["../etc".to_string()],
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withBaseAndRegionalCodes_shouldPass() {
    let config = Config {
        languages: vec!["Base".to_string(), "zh-Hans".to_string(), "pt_BR".to_string()],
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_log_level_to_level_filter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
