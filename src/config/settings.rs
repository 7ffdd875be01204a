// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for support-chat
//!
//! Handles loading and saving settings from ~/.support-chat/settings.json

use serde::{Deserialize, Serialize};

use crate::llm::provider::SamplingConfig;

mod io;
mod migration;
mod validation;

/// Main settings structure, stored in ~/.support-chat/settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Completion service configuration
    #[serde(default)]
    pub provider: OpenAiConfig,

    /// Chat behavior: active model, preamble, sampling
    #[serde(default)]
    pub chat: ChatConfig,

    /// Models the operator can switch between
    #[serde(default = "default_catalog")]
    pub catalog: Vec<CatalogEntry>,
}

/// OpenAI-compatible completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Conversation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Catalog display name of the model active at startup
    #[serde(default = "default_model")]
    pub default_model: String,

    /// System preamble seeded into every transcript
    #[serde(default = "default_preamble")]
    pub preamble: String,

    /// Fixed sampling parameters
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// One entry in the model catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Name shown to the operator
    pub display_name: String,
    /// Identifier sent to the completion service
    pub model_id: String,
}

impl CatalogEntry {
    pub fn new(display_name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            model_id: model_id.into(),
        }
    }
}

/// Fine-tuned support model served by default
pub const FINE_TUNED_MODEL_ID: &str =
    "ft:gpt-4o-mini-2024-07-18:enacton-technologies-private-limited::B9tchehH";

pub const DEFAULT_PREAMBLE: &str = "You are a highly professional and helpful customer support assistant for Wellness Wag, a company specializing in providing Emotional Support Animal (ESA) letters. Your primary responsibility is to assist users with accurate, clear, and empathetic answers related to the process of obtaining ESA letters, including but not limited to the legal requirements, eligibility criteria, application process, state-specific laws, and the overall steps involved in obtaining an ESA letter.

You should ensure that all responses are professional, concise, and respectful, addressing users' inquiries in a supportive and informative manner. In cases where a user asks for guidance, you should offer clear and actionable steps to assist them in navigating the process.

It is important that you do not respond to any inquiries that are unrelated to the issuance of ESA letters or Wellness Wag’s services. This includes, but is not limited to, requests for creative content such as poems, songs, or any other off-topic discussions. Additionally, avoid engaging in any casual, irrelevant, or inappropriate conversations.

Your focus should remain entirely on assisting users in understanding the requirements and process of obtaining an ESA letter, and providing them with the best support and resources available.
";

fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Wellness Wag (fine-tuned)", FINE_TUNED_MODEL_ID),
        CatalogEntry::new("GPT-4o mini", "gpt-4o-mini"),
        CatalogEntry::new("GPT-4o", "gpt-4o"),
    ]
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_model() -> String {
    "Wellness Wag (fine-tuned)".to_string()
}

fn default_preamble() -> String {
    DEFAULT_PREAMBLE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: OpenAiConfig::default(),
            chat: ChatConfig::default(),
            catalog: default_catalog(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            preamble: default_preamble(),
            sampling: SamplingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.catalog.len(), 3);
        assert_eq!(settings.chat.default_model, "Wellness Wag (fine-tuned)");
        assert_eq!(settings.catalog[0].model_id, FINE_TUNED_MODEL_ID);
    }

    #[test]
    fn test_openai_config_default() {
        let config = OpenAiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_chat_config_default() {
        let config = ChatConfig::default();
        assert!(config.preamble.starts_with("You are a highly professional"));
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn test_default_preamble_text() {
        assert_eq!(DEFAULT_PREAMBLE.split("\n\n").count(), 4);
        assert!(DEFAULT_PREAMBLE.contains("Wellness Wag\u{2019}s services"));
        assert!(!DEFAULT_PREAMBLE.contains("Wellness Wag's"));
        assert!(DEFAULT_PREAMBLE.ends_with("resources available.\n"));
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.catalog, Settings::default().catalog);
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test_settings.json");

        let mut settings = Settings::default();
        settings.chat.preamble = "Short preamble".to_string();
        settings.chat.sampling.temperature = 0.3;

        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.chat.preamble, "Short preamble");
        assert!((loaded.chat.sampling.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_settings_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir
            .path()
            .join("nested")
            .join("dir")
            .join("settings.json");

        Settings::default().save_to(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_settings_save_preserves_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"operator_note": "keep me"}"#).unwrap();

        Settings::default().save_to(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["operator_note"], "keep me");
        assert!(raw["catalog"].is_array());
    }

    #[test]
    fn test_settings_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"chat": {"default_model": "GPT-4o"}}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.chat.default_model, "GPT-4o");
        assert_eq!(settings.chat.preamble, DEFAULT_PREAMBLE);
        assert_eq!(settings.catalog.len(), 3);
    }

    #[test]
    fn test_default_path() {
        let path = Settings::default_path();
        assert!(path.ends_with("settings.json"));
    }
}
