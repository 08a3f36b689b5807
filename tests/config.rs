use std::path::PathBuf;

use operations_core::ConfigManager;

fn config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

#[test]
fn test_shipped_defaults_load() {
    let manager =
        ConfigManager::load_from_directory_with_env(Some(config_dir()), "development").unwrap();
    let config = manager.config();

    assert_eq!(config.wizard.max_input_length, 4000);
    assert_eq!(config.conversion.max_content_bytes, 1_048_576);
    assert!(config.artifacts.enabled);
    assert_eq!(config.artifacts.status, "draft");
}

#[test]
fn test_test_environment_overrides() {
    let manager = ConfigManager::load_from_directory_with_env(Some(config_dir()), "test").unwrap();
    assert_eq!(manager.environment(), "test");
    assert_eq!(manager.config().wizard.max_input_length, 1000);
}
