// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for support-chat
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for support-chat operations
#[derive(Error, Debug)]
pub enum SupportError {
    /// Completion service errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Operator picked a display name that is not in the model catalog
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// API-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// No API key was available when the call was made
    #[error("No API key configured (set {0})")]
    MissingApiKey(String),

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Context window exceeded
    #[error("Context too long: {current} tokens exceeds limit of {limit}")]
    ContextTooLong { current: u32, limit: u32 },

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,
}

/// Result type alias for support-chat operations
pub type Result<T> = std::result::Result<T, SupportError>;

impl SupportError {
    /// Whether this error came from the completion service call
    /// (network, auth, quota, or a malformed payload).
    pub fn is_external_service(&self) -> bool {
        matches!(self, SupportError::Api(_) | SupportError::Http(_))
    }
}
