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

//! Site server entry point.
//!
//! Serves CMS pages as server-rendered HTML along with the reviews proxy,
//! newsletter signup and CMS revalidation webhook.

use site_api::config::Config;
use site_api::routes;
use site_api::state::AppState;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("failed to load configuration");

    tracing::info!(
        mode = %config.render_mode,
        site_url = %config.site_url,
        dataset = %config.cms.dataset,
        "Loaded configuration"
    );
    if config.reviews.api_key.is_none() {
        tracing::warn!("GOOGLE_PLACES_API_KEY is not set; reviews blocks will show a notice");
    }
    if config.newsletter.is_none() {
        tracing::warn!("Resend is not configured; newsletter signups will return 503");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::new(&config);
    let app = routes::router()
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("Site listening on {}", config.listen_addr);

    axum::serve(listener, app).await.expect("server error");
}
