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

//! Response types for the site's JSON API.
//!
//! Every JSON endpoint except the reviews proxy returns an [`APIResponse<T>`]
//! envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Top-level API response envelope.
///
/// All JSON endpoints wrap their payload in this structure so that
/// clients always see a consistent `{ "success", "result" }` shape.
///
/// # Success example
///
/// ```json
/// { "success": true, "result": { "subscribed": true } }
/// ```
///
/// # Error example
///
/// ```json
/// { "success": false, "result": { "code": "INVALID_EMAIL", "message": "..." } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `POST /api/newsletter` (200 OK).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubscribeResponse {
    pub subscribed: bool,
}

/// Response payload for `POST /api/sanity/revalidate` (200 OK).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RevalidateResponse {
    /// Cache tags that were invalidated.
    pub revalidated: Vec<String>,
    /// Number of cached entries dropped across all caches.
    pub evicted: usize,
}
