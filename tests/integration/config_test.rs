//! Config Integration Tests
//!
//! Covers the config file lifecycle and building a service from it.

use prolly::{AppConfig, AppError, ConfigService, OutcomeService};

#[test]
fn test_default_config_file_never_stores_keys() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");

    let service = ConfigService::open(&path).unwrap();
    let resolved = service
        .get_config()
        .clone()
        .with_overrides_from(|k| (k == "GROQ_API_KEY").then(|| "gsk-live".to_string()));
    assert_eq!(resolved.completion.api_key.as_deref(), Some("gsk-live"));

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(!on_disk.contains("gsk-live"));
    assert!(!on_disk.contains("api_key"));
}

#[test]
fn test_service_from_config_requires_groq_key() {
    let err = OutcomeService::from_config(&AppConfig::default()).err().unwrap();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("GROQ_API_KEY"));
}

#[test]
fn test_service_from_config_rejects_invalid_settings() {
    let mut config = AppConfig::default();
    config.completion.api_key = Some("gsk-test".to_string());
    config.search.base_url = Some("::not a url::".to_string());

    let err = OutcomeService::from_config(&config).err().unwrap();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_service_from_config_with_both_keys() {
    let config = AppConfig::default().with_overrides_from(|k| match k {
        "GROQ_API_KEY" => Some("gsk-test".to_string()),
        "EXA_API_KEY" => Some("exa-test".to_string()),
        _ => None,
    });

    let service = OutcomeService::from_config(&config).unwrap();
    assert_eq!(service.provider_name(), "groq");
}
