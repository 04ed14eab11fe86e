/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use log::LevelFilter;
use std::path::PathBuf;
use vocabtrain::app_config::{Config, DatabaseConfig, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.database.path, None);
    assert!(!config.database.in_memory);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withEmptyPath_shouldFail() {
    let mut config = Config::default();
    config.database.path = Some(PathBuf::new());
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withDirectoryPath_shouldFail() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = Config::default();
    config.database.path = Some(dir.path().to_path_buf());
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefault() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_loadOrCreate_withExistingFile_shouldReadValues() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{ "database": { "in_memory": true }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert!(config.database.in_memory);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{}")?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_databaseConfig_open_withInMemory_shouldIgnorePath() -> Result<()> {
    let config = DatabaseConfig {
        path: Some(PathBuf::from("/nonexistent/dir/words.db")),
        in_memory: true,
    };

    let db = config.open()?;
    assert!(db.is_in_memory());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
