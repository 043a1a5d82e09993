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

//! HTTP seam for the Places API.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::TaggedCache;

/// Cache tag for stored Places responses.
pub const PLACES_CACHE_TAG: &str = "google-places";

/// A fully shaped Places details request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    /// How long a successful response may be reused.
    pub revalidate: Duration,
}

impl PlacesRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn cache_key(&self) -> String {
        format!(
            "{}|{}",
            self.url,
            self.header("X-Goog-FieldMask").unwrap_or_default()
        )
    }
}

/// Status and body of a completed exchange, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Performs one GET per call. Implementations must not retry.
#[async_trait]
pub trait PlacesTransport: Send + Sync {
    async fn get(&self, request: PlacesRequest) -> Result<TransportResponse, TransportError>;
}

/// `reqwest` transport that reuses successful bodies for the request's
/// revalidation window.
pub struct HttpPlacesTransport {
    client: reqwest::Client,
    cache: TaggedCache<TransportResponse>,
}

impl HttpPlacesTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            cache: TaggedCache::new(),
        }
    }
}

impl Default for HttpPlacesTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlacesTransport for HttpPlacesTransport {
    async fn get(&self, request: PlacesRequest) -> Result<TransportResponse, TransportError> {
        let cache_key = request.cache_key();
        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::debug!(url = %request.url, "Places response served from cache");
            return Ok(hit);
        }

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        let resp = builder.send().await?;
        let response = TransportResponse {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        };

        if response.is_success() {
            self.cache
                .insert(
                    cache_key,
                    response.clone(),
                    &[PLACES_CACHE_TAG],
                    request.revalidate,
                )
                .await;
        }
        Ok(response)
    }
}
