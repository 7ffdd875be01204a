// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use tempfile::TempDir;

use support_chat::config::{CatalogEntry, Settings, DEFAULT_PREAMBLE, FINE_TUNED_MODEL_ID};
use support_chat::error::SupportError;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.provider.api_key_env, "OPENAI_API_KEY");
    assert_eq!(settings.provider.base_url, "https://api.openai.com/v1");
    assert_eq!(settings.provider.timeout_secs, 60);
    assert_eq!(settings.chat.default_model, "Wellness Wag (fine-tuned)");
    assert_eq!(settings.chat.preamble, DEFAULT_PREAMBLE);

    let sampling = settings.chat.sampling;
    assert!((sampling.temperature - 0.9).abs() < f32::EPSILON);
    assert!((sampling.top_p - 1.0).abs() < f32::EPSILON);
    assert!((sampling.frequency_penalty - 0.5).abs() < f32::EPSILON);
    assert!(sampling.presence_penalty.abs() < f32::EPSILON);
    assert_eq!(sampling.max_completion_tokens, 2048);
}

#[test]
fn test_default_catalog_order() {
    let settings = Settings::default();
    let names: Vec<&str> = settings
        .catalog
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();

    assert_eq!(names, vec!["Wellness Wag (fine-tuned)", "GPT-4o mini", "GPT-4o"]);
    assert_eq!(settings.catalog[0].model_id, FINE_TUNED_MODEL_ID);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
    assert_eq!(settings.catalog.len(), 3);
}

#[test]
fn test_save_and_load_roundtrip_with_custom_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.catalog = vec![CatalogEntry::new("House", "ft:house-model")];
    settings.chat.default_model = "House".to_string();
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.catalog, settings.catalog);
    assert_eq!(loaded.chat.default_model, "House");
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "chat": { "preamble": "Short preamble" } }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.chat.preamble, "Short preamble");
    assert_eq!(settings.chat.default_model, "Wellness Wag (fine-tuned)");
    assert_eq!(settings.catalog.len(), 3);
}

#[test]
fn test_legacy_system_prompt_key_is_migrated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "chat": { "system_prompt": "Legacy text" } }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.chat.preamble, "Legacy text");
}

#[test]
fn test_save_preserves_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "operator_notes": "keep me" }"#).unwrap();

    Settings::default().save_to(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["operator_notes"], "keep me");
    assert_eq!(raw["chat"]["default_model"], "Wellness Wag (fine-tuned)");
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ broken").unwrap();

    assert!(matches!(
        Settings::load_from(&path),
        Err(SupportError::Json(_))
    ));
}

#[test]
fn test_validate_rejects_default_model_outside_catalog() {
    let mut settings = Settings::default();
    settings.chat.default_model = "Nonexistent".to_string();

    assert!(matches!(settings.validate(), Err(SupportError::Config(_))));
}

#[test]
fn test_validate_rejects_empty_catalog() {
    let mut settings = Settings::default();
    settings.catalog.clear();

    assert!(matches!(settings.validate(), Err(SupportError::Config(_))));
}
