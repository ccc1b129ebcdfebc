//! Configuration loading tests

use std::env;

use fabric3_domain::Error;
use fabric3_infrastructure::config::{ConfigBuilder, ConfigLoader, RuntimeConfig};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("fabric3.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[runtime]
name = "node-1"
autowire = false
interceptors = ["trace"]

[monitor]
ring_size = 128
destinations = ["default", "audit"]

[channels]
async_fan_out = true
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_FILE")
        .load()
        .unwrap();

    assert_eq!(config.runtime.name, "node-1");
    assert!(!config.runtime.autowire);
    assert_eq!(config.runtime.interceptors, ["trace"]);
    assert_eq!(config.monitor.ring_size, 128);
    assert_eq!(config.monitor.destinations, ["default", "audit"]);
    assert!(config.channels.async_fan_out);
    // untouched sections keep their defaults
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_invalid_log_level_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_LEVEL")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix("F3_CFG_MISSING")
        .load()
        .unwrap();

    assert_eq!(config.runtime.name, "vm");
    assert!(config.runtime.autowire);
    assert!(config.monitor.enabled);
}

#[test]
fn test_ring_size_must_be_power_of_two() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[monitor]\nring_size = 100\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_RING")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_empty_destinations_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[monitor]\ndestinations = []\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_DEST")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[runtime]\nname = \"from-file\"\n");
    // SAFETY: the variable name is unique to this test
    unsafe {
        env::set_var("F3_CFG_ENV_RUNTIME__NAME", "from-env");
    }

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_ENV")
        .load();

    // SAFETY: as above
    unsafe {
        env::remove_var("F3_CFG_ENV_RUNTIME__NAME");
    }
    assert_eq!(config.unwrap().runtime.name, "from-env");
}

#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let config = ConfigBuilder::new()
        .with_runtime(RuntimeConfig {
            name: "saved".to_string(),
            ..RuntimeConfig::default()
        })
        .build();

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("F3_CFG_SAVE");
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.load().unwrap().runtime.name, "saved");
}
