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

//! Axum router configuration for the site.

pub mod newsletter;
pub mod pages;
pub mod revalidate;
pub mod reviews;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Build the full application router: pages plus the JSON API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        // API
        .route("/api/reviews", get(reviews::get_reviews))
        .route("/api/newsletter", post(newsletter::subscribe))
        .route("/api/sanity/revalidate", post(revalidate::revalidate))
        // Pages
        .route("/", get(pages::home))
        .route("/index", get(pages::index_redirect))
        .route("/{slug}", get(pages::page))
        .fallback(pages::not_found)
}
