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

//! Reviews proxy.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use site_types::{MinimumRating, ReviewQuery, ReviewsResult, SortOrder};

use crate::state::AppState;

/// Build a query from raw parameters, ignoring values that do not parse.
pub fn query_from_params(params: &HashMap<String, String>) -> ReviewQuery {
    let get = |name: &str| {
        params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };
    ReviewQuery {
        place_id: get("placeId").map(str::to_string),
        limit: get("limit").and_then(|v| v.parse().ok()),
        minimum_rating: get("minimumRating").map(MinimumRating::parse),
        sort_order: get("sortOrder").map(SortOrder::parse).unwrap_or_default(),
        language_code: get("languageCode").map(str::to_string),
    }
}

/// GET /api/reviews
///
/// Always 200; failures are reported in the `error` field.
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ReviewsResult> {
    let query = query_from_params(&params);
    Json(state.reviews.fetch_reviews(&query).await)
}
