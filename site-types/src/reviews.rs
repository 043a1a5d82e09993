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

//! Normalised third-party reviews and the policy used to select them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::blocks::ReviewsCarouselBlock;

/// Upper bound on reviews per request; the Places API never returns more.
pub const MAX_REVIEWS_CEILING: usize = 10;
/// Reviews shown when the caller does not ask for a specific number.
pub const DEFAULT_MAX_REVIEWS: usize = 6;
pub const DEFAULT_LANGUAGE_CODE: &str = "en-GB";
pub const DEFAULT_AUTHOR_NAME: &str = "Google reviewer";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A single review, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Opaque and unique within a result.
    pub id: String,
    /// Always within `0.0..=5.0`.
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Human phrasing such as "2 weeks ago", as supplied by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_relative_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub author: ReviewAuthor,
}

impl Review {
    /// Clamp a provider rating into `0.0..=5.0`. Missing or NaN becomes 0.
    pub fn normalize_rating(raw: Option<f64>) -> f64 {
        match raw {
            Some(value) if !value.is_nan() => value.clamp(0.0, 5.0),
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Query policy
// ---------------------------------------------------------------------------

/// Lowest star rating a review must have to be shown.
///
/// The CMS offers `"any"`, `"3"`, `"4"` and `"5"`; any other numeric string or
/// JSON number is accepted as a custom floor. Anything unparsable means "any".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MinimumRating {
    #[default]
    Any,
    Three,
    Four,
    Five,
    Custom(f64),
}

impl MinimumRating {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "any" => MinimumRating::Any,
            "3" => MinimumRating::Three,
            "4" => MinimumRating::Four,
            "5" => MinimumRating::Five,
            other => other
                .parse::<f64>()
                .map(MinimumRating::from_number)
                .unwrap_or(MinimumRating::Any),
        }
    }

    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() || value == 0.0 {
            MinimumRating::Any
        } else if value == 3.0 {
            MinimumRating::Three
        } else if value == 4.0 {
            MinimumRating::Four
        } else if value == 5.0 {
            MinimumRating::Five
        } else {
            MinimumRating::Custom(value)
        }
    }

    /// Numeric floor within `0.0..=5.0`.
    pub fn floor(self) -> f64 {
        match self {
            MinimumRating::Any => 0.0,
            MinimumRating::Three => 3.0,
            MinimumRating::Four => 4.0,
            MinimumRating::Five => 5.0,
            MinimumRating::Custom(value) if value.is_nan() => 0.0,
            MinimumRating::Custom(value) => value.clamp(0.0, 5.0),
        }
    }
}

impl fmt::Display for MinimumRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimumRating::Any => f.write_str("any"),
            MinimumRating::Three => f.write_str("3"),
            MinimumRating::Four => f.write_str("4"),
            MinimumRating::Five => f.write_str("5"),
            MinimumRating::Custom(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for MinimumRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinimumRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => MinimumRating::parse(&text),
            Raw::Number(value) => MinimumRating::from_number(value),
        })
    }
}

/// Order in which reviews are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SortOrder {
    /// Provider order.
    #[default]
    MostRelevant,
    /// Newest publish time first.
    Newest,
}

impl SortOrder {
    /// Unrecognised values fall back to [`SortOrder::MostRelevant`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "newest" => SortOrder::Newest,
            _ => SortOrder::MostRelevant,
        }
    }
}

impl From<String> for SortOrder {
    fn from(raw: String) -> Self {
        SortOrder::parse(&raw)
    }
}

/// Caller policy for a reviews lookup. Absent fields fall back to
/// configuration or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub minimum_rating: Option<MinimumRating>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl ReviewQuery {
    /// `limit` clamped into `1..=10`; 6 when absent or not positive.
    pub fn max_reviews(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => usize::try_from(limit)
                .unwrap_or(MAX_REVIEWS_CEILING)
                .min(MAX_REVIEWS_CEILING),
            _ => DEFAULT_MAX_REVIEWS,
        }
    }

    pub fn rating_floor(&self) -> f64 {
        self.minimum_rating.unwrap_or_default().floor()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<&ReviewsCarouselBlock> for ReviewQuery {
    fn from(block: &ReviewsCarouselBlock) -> Self {
        Self {
            place_id: non_empty(&block.place_id),
            limit: block.maximum_reviews,
            minimum_rating: block.minimum_rating,
            sort_order: block.sort_order.unwrap_or_default(),
            language_code: non_empty(&block.language_code),
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Why a reviews lookup produced no reviews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewsError {
    #[error("Missing GOOGLE_PLACES_API_KEY environment variable.")]
    MissingApiKey,

    #[error("Missing Google Place ID. Provide it in the CMS or set GOOGLE_PLACES_PLACE_ID.")]
    MissingPlaceId,

    /// `GOOGLE_PLACES_ENDPOINT` is not a usable base URL.
    #[error("Invalid GOOGLE_PLACES_ENDPOINT: {0}")]
    InvalidEndpoint(String),

    /// The provider answered with a non-success status.
    #[error("Google Places API error: {status} {body}")]
    Transport { status: u16, body: String },

    #[error("Failed to fetch Google reviews: {0}")]
    Network(String),

    #[error("Failed to decode Google Places response: {0}")]
    Decode(String),
}

impl ReviewsError {
    /// True when the lookup was skipped because configuration is incomplete.
    pub fn is_config_missing(&self) -> bool {
        matches!(
            self,
            ReviewsError::MissingApiKey | ReviewsError::MissingPlaceId
        )
    }
}

/// Outcome of a reviews lookup.
///
/// On failure `reviews` is empty and `error` carries a display message; a
/// successful lookup may still legitimately return zero reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewsResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<ReviewsError> for ReviewsResult {
    fn from(err: ReviewsError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimum_rating_maps_cms_options() {
        assert_eq!(MinimumRating::parse("any").floor(), 0.0);
        assert_eq!(MinimumRating::parse("3").floor(), 3.0);
        assert_eq!(MinimumRating::parse("4").floor(), 4.0);
        assert_eq!(MinimumRating::parse("5").floor(), 5.0);
    }

    #[test]
    fn minimum_rating_accepts_custom_numbers_and_clamps() {
        assert_eq!(MinimumRating::parse("4.5"), MinimumRating::Custom(4.5));
        assert_eq!(MinimumRating::parse("4.5").floor(), 4.5);
        assert_eq!(MinimumRating::parse("12").floor(), 5.0);
        assert_eq!(MinimumRating::parse("-2").floor(), 0.0);
    }

    #[test]
    fn unparsable_minimum_rating_means_any() {
        assert_eq!(MinimumRating::parse("lots"), MinimumRating::Any);
        assert_eq!(MinimumRating::parse("NaN").floor(), 0.0);
        assert_eq!(MinimumRating::parse("").floor(), 0.0);
    }

    #[test]
    fn minimum_rating_deserializes_from_string_or_number() {
        let from_str: MinimumRating = serde_json::from_value(json!("4")).unwrap();
        let from_num: MinimumRating = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(from_str, MinimumRating::Four);
        assert_eq!(from_num, MinimumRating::Three);
        assert_eq!(serde_json::to_value(MinimumRating::Five).unwrap(), json!("5"));
    }

    #[test]
    fn sort_order_falls_back_to_most_relevant() {
        let newest: SortOrder = serde_json::from_value(json!("newest")).unwrap();
        let other: SortOrder = serde_json::from_value(json!("alphabetical")).unwrap();
        assert_eq!(newest, SortOrder::Newest);
        assert_eq!(other, SortOrder::MostRelevant);
        assert_eq!(serde_json::to_value(SortOrder::MostRelevant).unwrap(), json!("most_relevant"));
    }

    #[test]
    fn max_reviews_is_clamped() {
        let query = |limit| ReviewQuery {
            limit,
            ..ReviewQuery::default()
        };
        assert_eq!(query(None).max_reviews(), 6);
        assert_eq!(query(Some(0)).max_reviews(), 6);
        assert_eq!(query(Some(-3)).max_reviews(), 6);
        assert_eq!(query(Some(1)).max_reviews(), 1);
        assert_eq!(query(Some(8)).max_reviews(), 8);
        assert_eq!(query(Some(50)).max_reviews(), 10);
    }

    #[test]
    fn review_rating_is_clamped() {
        assert_eq!(Review::normalize_rating(Some(7.0)), 5.0);
        assert_eq!(Review::normalize_rating(Some(-1.0)), 0.0);
        assert_eq!(Review::normalize_rating(Some(f64::NAN)), 0.0);
        assert_eq!(Review::normalize_rating(None), 0.0);
        assert_eq!(Review::normalize_rating(Some(4.0)), 4.0);
    }

    #[test]
    fn query_from_carousel_block_drops_blank_overrides() {
        let block = ReviewsCarouselBlock {
            place_id: Some("  ".to_string()),
            language_code: Some("de".to_string()),
            maximum_reviews: Some(4),
            minimum_rating: Some(MinimumRating::Four),
            sort_order: Some(SortOrder::Newest),
            ..ReviewsCarouselBlock::default()
        };

        let query = ReviewQuery::from(&block);
        assert_eq!(query.place_id, None);
        assert_eq!(query.language_code.as_deref(), Some("de"));
        assert_eq!(query.max_reviews(), 4);
        assert_eq!(query.rating_floor(), 4.0);
        assert_eq!(query.sort_order, SortOrder::Newest);
    }

    #[test]
    fn error_collapses_into_empty_result() {
        let result = ReviewsResult::from(ReviewsError::Transport {
            status: 403,
            body: "denied".to_string(),
        });
        assert!(result.reviews.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Google Places API error: 403 denied")
        );
        assert!(ReviewsError::MissingApiKey.is_config_missing());
        assert!(!ReviewsError::Decode("eof".into()).is_config_missing());
        assert_eq!(
            ReviewsError::InvalidEndpoint("mailto:ops@example.com".into()).to_string(),
            "Invalid GOOGLE_PLACES_ENDPOINT: mailto:ops@example.com"
        );
    }

    #[test]
    fn result_serializes_camel_case_without_absent_fields() {
        let result = ReviewsResult {
            average_rating: Some(4.5),
            user_rating_count: Some(120),
            ..ReviewsResult::default()
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "averageRating": 4.5, "userRatingCount": 120, "reviews": [] })
        );
    }
}
