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

//! CMS webhook that drops cached content.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use site_types::responses::RevalidateResponse;
use site_types::APIResponse;

use crate::cms::{SANITY_TAG, SYNC_TAGS_TAG};
use crate::error::AppError;
use crate::state::AppState;
use crate::webhook::{self, SIGNATURE_HEADER};

/// POST /api/sanity/revalidate
///
/// With a secret configured the signature must verify (401 otherwise). A
/// missing or non-JSON body is a 400.
pub async fn revalidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<APIResponse<RevalidateResponse>>, AppError> {
    if let Some(secret) = state.revalidate_secret.as_deref() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !webhook::verify(secret, signature, &body) {
            tracing::warn!("Rejected CMS webhook with invalid signature");
            return Err(AppError::invalid_signature());
        }
    }

    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) if !value.is_null() => {}
        _ => return Err(AppError::missing_body()),
    }

    let mut evicted = 0;
    for tag in [SANITY_TAG, SYNC_TAGS_TAG] {
        evicted += state.content.invalidate(tag).await;
    }
    tracing::info!(evicted, "Revalidated CMS content");

    Ok(Json(APIResponse::ok(RevalidateResponse {
        revalidated: vec![SANITY_TAG.to_string(), SYNC_TAGS_TAG.to_string()],
        evicted,
    })))
}
