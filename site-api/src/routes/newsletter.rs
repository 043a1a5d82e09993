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

//! Newsletter signup.

use axum::{body::Bytes, extract::State, Json};
use site_types::requests::SubscribeRequest;
use site_types::responses::SubscribeResponse;
use site_types::APIResponse;

use crate::error::AppError;
use crate::state::AppState;

const VALID_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn validate_email(email: Option<&str>) -> Result<&str, AppError> {
    let email = email.map(str::trim).filter(|e| !e.is_empty() && e.len() <= 320);
    match email {
        Some(email)
            if regex::Regex::new(VALID_EMAIL_PATTERN).is_ok_and(|re| re.is_match(email)) =>
        {
            Ok(email)
        }
        _ => Err(AppError::invalid_email()),
    }
}

/// POST /api/newsletter
///
/// The body is parsed by hand so any malformed payload is a 400 with the
/// usual error envelope.
pub async fn subscribe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<APIResponse<SubscribeResponse>>, AppError> {
    let Some(mailing_list) = state.mailing_list.as_ref() else {
        tracing::error!("Newsletter subscription attempted without mailing list configuration");
        return Err(AppError::newsletter_unavailable());
    };

    let request: SubscribeRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::invalid_email())?;
    let email = validate_email(request.email.as_deref())?;

    mailing_list.subscribe(email).await.map_err(|err| {
        tracing::warn!("Newsletter subscription failed: {err}");
        AppError::subscription_failed(&err.to_string())
    })?;

    tracing::info!("Newsletter subscription added");
    Ok(Json(APIResponse::ok(SubscribeResponse { subscribed: true })))
}
