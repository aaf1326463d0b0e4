use tempfile::TempDir;
use waymark_core::types::AppConfig;

/// Verify a missing config file yields the defaults.
#[test]
fn test_missing_file_defaults() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.bridge.request_timeout_ms, 5000);
    assert_eq!(config.views.recent_limit, 5);
}

/// Verify saved values round-trip through the file.
#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    let mut config = AppConfig::default();
    config.views.recent_limit = 8;
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

/// Verify a partial file fills in the remaining sections.
#[test]
fn test_partial_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[bridge]\nrequest_timeout_ms = 250\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.bridge.request_timeout_ms, 250);
    assert_eq!(config.bridge.channel_capacity, 64);
    assert_eq!(config.views.recent_limit, 5);
}

/// Verify zero values are reported and replaced.
#[test]
fn test_invalid_values() {
    let mut config = AppConfig::default();
    config.bridge.request_timeout_ms = 0;
    config.views.recent_limit = 0;

    assert_eq!(config.validate().len(), 2);

    let fixed = config.with_defaults_for_invalid();
    assert!(fixed.validate().is_empty());
    assert_eq!(fixed.bridge.request_timeout_ms, 5000);
}

/// Verify malformed TOML is a parse error.
#[test]
fn test_malformed_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[bridge\n").unwrap();

    assert!(AppConfig::load(&path).is_err());
}
