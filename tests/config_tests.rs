use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use wayfarer::client::DEFAULT_ENDPOINT;
use wayfarer::config::{Config, ModelOverrides};

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).expect("defaults");

    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.timeout_seconds, 30);
    assert!(config.api_key.is_empty());
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .update(
            Some("saved-key".to_string()),
            Some("http://localhost:9000".to_string()),
            ModelOverrides {
                plan: Some("gemini-2.5-pro".to_string()),
                ..ModelOverrides::default()
            },
            Some(45),
        )
        .expect("valid update");
    config.save_to(&path).expect("Failed to save config");

    let loaded = Config::load_from(&path).expect("Failed to load config");
    assert_eq!(loaded.api_key, "saved-key");
    assert_eq!(loaded.endpoint, "http://localhost:9000");
    assert_eq!(loaded.models.plan, "gemini-2.5-pro");
    assert_eq!(loaded.models.budget, "gemini-3-flash-preview");
    assert_eq!(loaded.timeout_seconds, 45);

    let settings = loaded.client_settings().expect("valid settings");
    assert_eq!(settings.timeout, Duration::from_secs(45));
    assert_eq!(settings.endpoint.as_str(), "http://localhost:9000/");
}

#[test]
fn test_empty_key_is_not_written() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("config.toml");

    Config::default().save_to(&path).expect("Failed to save config");
    let content = fs::read_to_string(&path).expect("Failed to read config");
    assert!(!content.contains("api_key"));
    assert!(content.contains("[models]"));
}

#[test]
fn test_invalid_toml_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "timeout_seconds = \"soon\"").expect("Failed to write config");

    let error = Config::load_from(&path).expect_err("invalid config should fail");
    assert!(error.to_string().contains("Invalid configuration file"));
}

#[test]
fn test_update_rejects_bad_endpoint() {
    let mut config = Config::default();
    let result = config.update(
        None,
        Some("not a url".to_string()),
        ModelOverrides::default(),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_api_key_is_trimmed() {
    let config = Config {
        api_key: "  padded-key \n".to_string(),
        ..Config::default()
    };
    assert_eq!(config.api_key().expect("key is set"), "padded-key");
}
