//! Configuration persistence tests: TOML round trips through real
//! files and malformed files are rejected on load.

use std::fs;
use std::time::Duration;

use pulsa::config::CardConfig;
use tempfile::TempDir;

#[test]
fn default_config_passes_validation() {
    let config = CardConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pulsa.toml");

    let config = CardConfig::default();
    config.save_to(&path).unwrap();
    assert!(path.exists());

    let loaded = CardConfig::load_from(&path).unwrap();
    assert_eq!(loaded.stages.len(), 3);
    assert_eq!(loaded.stages[0].target, 80.0);
    assert_eq!(loaded.stages[2].target, 100.0);
    assert_eq!(loaded.space_messages, config.space_messages);
    assert_eq!(loaded.final_lines.len(), 5);
    assert_eq!(loaded.timings.tick, Duration::from_millis(20));
    assert_eq!(loaded.timings.advance_delay, Duration::from_millis(2000));
    assert_eq!(loaded.confetti.count, 100);
    assert_eq!(loaded.confetti.palette.len(), 6);
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("pulsa.toml");

    CardConfig::default().save_to(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(CardConfig::load_from(&path).is_err());
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pulsa.toml");
    fs::write(&path, "stages = [ this is not toml").unwrap();
    assert!(CardConfig::load_from(&path).is_err());
}

#[test]
fn load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pulsa.toml");

    // Structurally valid TOML that fails validation: zero tick
    let toml_str = toml::to_string(&CardConfig::default())
        .unwrap()
        .replace("tick = 20", "tick = 0");
    fs::write(&path, toml_str).unwrap();
    assert!(CardConfig::load_from(&path).is_err());

    // And a target outside (0, 100]
    let toml_str = toml::to_string(&CardConfig::default())
        .unwrap()
        .replace("target = 80.0", "target = 250.0");
    fs::write(&path, toml_str).unwrap();
    assert!(CardConfig::load_from(&path).is_err());
}

#[test]
fn overrides_take_effect() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pulsa.toml");

    let mut config = CardConfig::default();
    config.base_speed = 2.5;
    config.stages[0].message = "¡Casi!".to_string();
    config.save_to(&path).unwrap();

    let loaded = CardConfig::load_from(&path).unwrap();
    assert_eq!(loaded.base_speed, 2.5);
    assert_eq!(loaded.stages[0].message, "¡Casi!");
}
