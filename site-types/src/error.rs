/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! API error types.
//!
//! Every failed JSON API response is returned as `APIResponse<APIError>` with
//! `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"INVALID_EMAIL"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail (upstream bodies,
/// transport errors) that is useful during development but should be stripped
/// or redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"INVALID_SIGNATURE"`, `"PAGE_NOT_FOUND"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    /// Should be omitted or redacted in production responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            engineering_error: None,
        }
    }

    pub fn invalid_email() -> Self {
        Self::new("INVALID_EMAIL", "Valid email is required.")
    }

    pub fn newsletter_unavailable() -> Self {
        Self::new(
            "NEWSLETTER_UNAVAILABLE",
            "Newsletter subscriptions are not configured.",
        )
    }

    pub fn subscription_failed(detail: &str) -> Self {
        Self {
            engineering_error: Some(detail.to_string()),
            ..Self::new("SUBSCRIPTION_FAILED", "Error subscribing to updates")
        }
    }

    pub fn invalid_signature() -> Self {
        Self::new("INVALID_SIGNATURE", "Invalid signature")
    }

    pub fn missing_body() -> Self {
        Self::new("MISSING_BODY", "Missing body")
    }

    pub fn page_not_found(slug: &str) -> Self {
        Self::new("PAGE_NOT_FOUND", format!("Page '{slug}' not found"))
    }

    pub fn cms_unavailable(detail: &str) -> Self {
        Self {
            engineering_error: Some(detail.to_string()),
            ..Self::new("CMS_UNAVAILABLE", "Content is temporarily unavailable")
        }
    }

    pub fn internal_error(detail: &str) -> Self {
        Self {
            engineering_error: Some(detail.to_string()),
            ..Self::new("INTERNAL_ERROR", "Internal server error")
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
