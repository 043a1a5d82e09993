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

//! Shared content and API types for the marketing site.
//!
//! This crate defines the contract between the CMS content layer, the block
//! renderers, and the JSON API consumers. It is intentionally
//! framework-agnostic: no Axum, no HTTP client types.

pub mod blocks;
pub mod error;
pub mod requests;
pub mod responses;
pub mod reviews;

pub use blocks::{Block, BlockBody, BlockError, BlockTag};
pub use error::APIError;
pub use responses::APIResponse;
pub use reviews::{
    MinimumRating, Review, ReviewAuthor, ReviewQuery, ReviewsError, ReviewsResult, SortOrder,
};
