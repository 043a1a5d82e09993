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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every JSON error is returned as `APIResponse<APIError>` with
//! `success: false`, paired with the appropriate HTTP status code. Page
//! routes render the same error as an HTML document instead.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use site_types::{APIError, APIResponse};

use crate::render::page::error_document;

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn invalid_email() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::invalid_email())
    }

    pub fn newsletter_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            APIError::newsletter_unavailable(),
        )
    }

    pub fn subscription_failed(detail: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            APIError::subscription_failed(detail),
        )
    }

    pub fn invalid_signature() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, APIError::invalid_signature())
    }

    pub fn missing_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_body())
    }

    pub fn page_not_found(slug: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, APIError::page_not_found(slug))
    }

    pub fn cms_unavailable(detail: &str) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, APIError::cms_unavailable(detail))
    }

    pub fn internal(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::internal_error(detail),
        )
    }

    /// The error as a minimal HTML page with the same status.
    pub fn into_html(self) -> Response {
        let html = error_document(self.status.as_u16(), &self.body.message);
        (self.status, Html(html.into_string())).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<crate::cms::CmsError> for AppError {
    fn from(err: crate::cms::CmsError) -> Self {
        tracing::error!("CMS error: {err}");
        Self::cms_unavailable(&err.to_string())
    }
}
