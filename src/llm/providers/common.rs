// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::{ApiError, SupportError};

/// Parse token counts from an arbitrary message by extracting the first numeric tokens.
pub(crate) fn parse_numeric_token_counts(message: &str) -> (u32, u32) {
    let numbers: Vec<u32> = message
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|s| s.parse().ok())
        .collect();

    match numbers.as_slice() {
        [current, limit, ..] => (*current, *limit),
        [single] => (*single, 0),
        _ => (0, 0),
    }
}

/// Parse numeric Retry-After header (seconds).
pub(crate) fn parse_retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Construct a standardized server error.
pub(crate) fn server_error(status: u16, message: impl Into<String>) -> SupportError {
    SupportError::Api(ApiError::ServerError {
        status,
        message: message.into(),
    })
}

/// Classify a transport failure from reqwest.
pub(crate) fn transport_error(err: reqwest::Error) -> SupportError {
    if err.is_timeout() {
        SupportError::Api(ApiError::Timeout)
    } else if err.is_connect() || err.is_request() {
        SupportError::Api(ApiError::Network(err.to_string()))
    } else {
        SupportError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_numeric_token_counts() {
        assert_eq!(
            parse_numeric_token_counts("used 150000 tokens, max 128000"),
            (150000, 128000)
        );
        assert_eq!(parse_numeric_token_counts("limit 42"), (42, 0));
        assert_eq!(parse_numeric_token_counts("no numbers"), (0, 0));
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after_seconds(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("17"));
        assert_eq!(parse_retry_after_seconds(&headers), Some(17));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after_seconds(&headers), None);
    }

    #[test]
    fn test_server_error() {
        let err = server_error(503, "overloaded");
        assert!(matches!(
            err,
            SupportError::Api(ApiError::ServerError { status: 503, .. })
        ));
    }
}
