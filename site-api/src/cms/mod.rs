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

//! Page content from the headless CMS.

pub mod queries;
pub mod sanity;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use site_types::blocks::{Page, PostSummary};
use site_types::Block;
use thiserror::Error;

pub use sanity::SanityClient;

/// Tag carried by every cached CMS response.
pub const SANITY_TAG: &str = "sanity";
/// Tag for computed sync tags; invalidated together with [`SANITY_TAG`].
pub const SYNC_TAGS_TAG: &str = "sanity:fetch-sync-tags";

#[derive(Debug, Error)]
pub enum CmsError {
    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The content lake answered with a non-success status.
    #[error("CMS error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Source of pages and post listings.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The page published under `slug`, or `None` if there is none.
    async fn fetch_page(&self, slug: &str) -> Result<Option<Page>, CmsError>;

    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, CmsError>;

    /// Drop cached content carrying `tag`. Returns how many entries went.
    async fn invalidate(&self, _tag: &str) -> usize {
        0
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    meta_title: Option<String>,
    #[serde(default)]
    meta_description: Option<String>,
    #[serde(default)]
    noindex: Option<bool>,
    #[serde(default)]
    blocks: Option<Vec<Value>>,
}

/// Decode a page document. `null` means no page has the slug.
pub fn decode_page(value: Value) -> Result<Option<Page>, CmsError> {
    if value.is_null() {
        return Ok(None);
    }
    let raw: RawPage = serde_json::from_value(value)?;
    Ok(Some(Page {
        meta_title: raw.meta_title,
        meta_description: raw.meta_description,
        noindex: raw.noindex.unwrap_or(false),
        blocks: decode_blocks(raw.blocks.unwrap_or_default()),
    }))
}

/// Decode blocks one at a time. A block that fails to decode keeps its
/// position as an unknown block so the rest of the page still renders.
pub fn decode_blocks(values: Vec<Value>) -> Vec<Block> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let tag = value
                .get("_type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let key = value
                .get("_key")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("block-{index}"));

            Block::from_value(value).unwrap_or_else(|err| {
                tracing::warn!(block_type = %tag, key = %key, "Skipping undecodable block: {err}");
                Block::unknown(tag, key)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use site_types::BlockTag;

    #[test]
    fn null_document_is_missing_page() {
        assert_eq!(decode_page(Value::Null).unwrap(), None);
    }

    #[test]
    fn malformed_block_keeps_its_position() {
        let page = decode_page(json!({
            "meta_title": "Home",
            "noindex": null,
            "blocks": [
                { "_type": "hero-1", "_key": "a", "title": "Welcome" },
                { "_type": "faqs", "_key": "b", "faqs": "not a list" },
                { "_type": "testimonial-wall", "_key": "c" },
                { "_type": "cta-1" },
                "stray string"
            ]
        }))
        .unwrap()
        .unwrap();

        assert_eq!(page.meta_title.as_deref(), Some("Home"));
        assert!(!page.noindex);
        let summary: Vec<(&str, &str, Option<BlockTag>)> = page
            .blocks
            .iter()
            .map(|b| (b.key.as_str(), b.tag_name(), b.tag()))
            .collect();
        assert_eq!(
            summary,
            [
                ("a", "hero-1", Some(BlockTag::Hero1)),
                ("b", "faqs", None),
                ("c", "testimonial-wall", None),
                ("block-3", "cta-1", None),
                ("block-4", "unknown", None),
            ]
        );
    }

    #[test]
    fn wrong_document_shape_is_a_decode_error() {
        let err = decode_page(json!({ "blocks": 3 })).unwrap_err();
        assert!(matches!(err, CmsError::Decode(_)));
    }
}
