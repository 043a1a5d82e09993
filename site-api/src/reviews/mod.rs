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

//! Google Places reviews lookup and normalisation.
//!
//! One GET per lookup, no retries. The provider is asked for a fixed field
//! mask only; sorting, rating filters and truncation happen locally on
//! whatever it returns (at most a handful of reviews), so a result can hold
//! fewer reviews than requested even when the place has more.

pub mod payload;
pub mod transport;

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use site_types::reviews::{DEFAULT_AUTHOR_NAME, DEFAULT_LANGUAGE_CODE};
use site_types::{Review, ReviewAuthor, ReviewQuery, ReviewsError, ReviewsResult, SortOrder};
use url::Url;

use crate::config::ReviewsConfig;
use payload::{LocalizedText, PlaceDetails, RawReview};
use transport::{HttpPlacesTransport, PlacesRequest, PlacesTransport};

pub const FIELD_MASK: &str = "displayName,rating,userRatingCount,reviews";

/// Reuse window for provider responses.
pub const REVALIDATE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Fetches and normalises reviews for a place.
#[derive(Clone)]
pub struct ReviewsClient {
    config: ReviewsConfig,
    transport: Arc<dyn PlacesTransport>,
}

impl ReviewsClient {
    pub fn new(config: ReviewsConfig, transport: Arc<dyn PlacesTransport>) -> Self {
        Self { config, transport }
    }

    /// Client backed by the cached `reqwest` transport.
    pub fn http(config: ReviewsConfig) -> Self {
        Self::new(config, Arc::new(HttpPlacesTransport::new()))
    }

    /// Shape the provider request, or report which setting is missing.
    pub fn build_request(&self, query: &ReviewQuery) -> Result<PlacesRequest, ReviewsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ReviewsError::MissingApiKey)?;
        let place_id = first_non_empty(query.place_id.as_deref(), self.config.default_place_id.as_deref())
            .ok_or(ReviewsError::MissingPlaceId)?;
        let language = first_non_empty(
            query.language_code.as_deref(),
            self.config.default_language.as_deref(),
        )
        .unwrap_or(DEFAULT_LANGUAGE_CODE);

        let invalid_endpoint = || ReviewsError::InvalidEndpoint(self.config.endpoint.clone());
        let mut url = Url::parse(&self.config.endpoint).map_err(|_| invalid_endpoint())?;
        url.path_segments_mut()
            .map_err(|_| invalid_endpoint())?
            .pop_if_empty()
            .push(place_id);
        url.query_pairs_mut().append_pair("languageCode", language);

        Ok(PlacesRequest {
            url: url.to_string(),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("X-Goog-Api-Key", api_key.to_string()),
                ("X-Goog-FieldMask", FIELD_MASK.to_string()),
            ],
            revalidate: REVALIDATE_AFTER,
        })
    }

    /// Typed lookup. The `Ok` value never carries an error message.
    pub async fn try_fetch_reviews(&self, query: &ReviewQuery) -> Result<ReviewsResult, ReviewsError> {
        let request = self.build_request(query)?;
        let response = self
            .transport
            .get(request)
            .await
            .map_err(|e| ReviewsError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(ReviewsError::Transport {
                status: response.status,
                body: response.body,
            });
        }

        let details: PlaceDetails = serde_json::from_str(&response.body)
            .map_err(|e| ReviewsError::Decode(e.to_string()))?;
        Ok(normalize(details, query))
    }

    /// Lookup that folds every failure into [`ReviewsResult::error`].
    pub async fn fetch_reviews(&self, query: &ReviewQuery) -> ReviewsResult {
        match self.try_fetch_reviews(query).await {
            Ok(result) => result,
            Err(err) => {
                if err.is_config_missing() {
                    tracing::warn!("Reviews lookup skipped: {err}");
                } else {
                    tracing::error!("Reviews lookup failed: {err}");
                }
                ReviewsResult::from(err)
            }
        }
    }
}

fn first_non_empty<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    primary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|s| !s.is_empty()))
}

fn parse_publish_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Apply the query's sort, rating floor and cap to a provider response.
pub fn normalize(details: PlaceDetails, query: &ReviewQuery) -> ReviewsResult {
    let mut raw = details.reviews.unwrap_or_default();

    if query.sort_order == SortOrder::Newest {
        // Stable, so ties and undated reviews keep provider order.
        raw.sort_by_key(|r| {
            Reverse(
                parse_publish_time(r.publish_time.as_deref())
                    .map(|t| t.timestamp_millis())
                    .unwrap_or(0),
            )
        });
    }

    let floor = query.rating_floor();
    let reviews = raw
        .into_iter()
        .filter(|r| r.rating.unwrap_or(0.0) >= floor)
        .map(normalize_review)
        .take(query.max_reviews())
        .collect();

    ReviewsResult {
        place_name: details.display_name.and_then(|n| n.text),
        average_rating: details.rating,
        user_rating_count: details.user_rating_count,
        reviews,
        error: None,
    }
}

fn trimmed(text: Option<&LocalizedText>) -> Option<String> {
    text.and_then(|t| t.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn normalize_review(raw: RawReview) -> Review {
    let text = trimmed(raw.text.as_ref()).or_else(|| trimmed(raw.original_text.as_ref()));
    let language_code = raw
        .text
        .as_ref()
        .and_then(|t| t.language_code.clone())
        .filter(|l| !l.is_empty())
        .or_else(|| raw.original_text.as_ref().and_then(|t| t.language_code.clone()));
    let author = raw.author_attribution.unwrap_or_default();

    Review {
        id: raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        rating: Review::normalize_rating(raw.rating),
        text,
        language_code,
        published_at: parse_publish_time(raw.publish_time.as_deref()),
        published_relative_description: raw.relative_publish_time_description,
        author: ReviewAuthor {
            name: author
                .display_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
            profile_url: author.uri,
            avatar_url: author.photo_uri,
        },
    }
}
