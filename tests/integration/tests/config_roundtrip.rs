//! Config save/load roundtrip integration tests.

use keystash_core::config::{Config, LogLevel};
use keystash_secrets::{MemoryVault, SecretStore};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keystash.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.store.service, config.store.service);
    assert_eq!(loaded.logging.level, config.logging.level);
}

#[test]
fn test_hand_written_json5_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keystash.json5");
    std::fs::write(
        &path,
        "{\n  // shared with the desktop app\n  store: { service: 'com.example.desktop' },\n  logging: { level: 'warn' },\n}\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.store.service, "com.example.desktop");
    assert_eq!(config.logging.level, LogLevel::Warn);
}

#[test]
fn test_configured_service_scopes_store() {
    let mut config = Config::default();
    config.store.service = "from-config".to_string();

    let store = SecretStore::new(config.store.service.clone(), MemoryVault::new());
    store.set("value", "key").unwrap();
    assert_eq!(store.vault().raw_item("from-config", "key"), Some(b"value".to_vec()));
}
