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

//! Server-side rendering of CMS blocks.
//!
//! [`registry::Dispatcher`] turns an ordered list of [`site_types::Block`]s
//! into one [`RenderOutput`] per block. [`page::PageComposer`] resolves the
//! external content some blocks need (reviews, post listings) before
//! dispatching, then wraps the result in an HTML document.

pub mod blocks;
pub mod html;
pub mod page;
pub mod registry;

use std::collections::HashMap;
use std::fmt;

use site_types::blocks::PostSummary;
use site_types::{BlockTag, ReviewsResult};

pub use html::Markup;
pub use registry::{BlockRenderer, Dispatcher, Registry};

/// Controls how diagnostics surface in rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Unknown blocks render a visible, labelled placeholder.
    Development,
    /// Unknown blocks render an empty, hidden placeholder.
    #[default]
    Production,
}

/// Per-render data resolved ahead of dispatch.
///
/// Renderers are synchronous; anything that needs I/O is fetched by the
/// page composer and looked up here by block key.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub mode: RenderMode,
    /// Browser key for Google Maps embeds; maps fall back to text without it.
    pub maps_embed_key: Option<String>,
    reviews: HashMap<String, ReviewsResult>,
    posts: Option<Result<Vec<PostSummary>, String>>,
}

impl RenderContext {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_maps_key(mut self, key: impl Into<String>) -> Self {
        self.maps_embed_key = Some(key.into());
        self
    }

    pub fn with_reviews(mut self, block_key: impl Into<String>, result: ReviewsResult) -> Self {
        self.reviews.insert(block_key.into(), result);
        self
    }

    pub fn with_posts(mut self, posts: Result<Vec<PostSummary>, String>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn reviews_for(&self, block_key: &str) -> Option<&ReviewsResult> {
        self.reviews.get(block_key)
    }

    pub fn posts(&self) -> Option<&Result<Vec<PostSummary>, String>> {
        self.posts.as_ref()
    }
}

/// Result of dispatching one block.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Rendered {
        key: String,
        tag: BlockTag,
        markup: Markup,
    },
    /// Stand-in for a block with no registered renderer.
    Placeholder { key: String, tag: String },
}

impl RenderOutput {
    pub fn key(&self) -> &str {
        match self {
            RenderOutput::Rendered { key, .. } | RenderOutput::Placeholder { key, .. } => key,
        }
    }

    pub fn tag_name(&self) -> &str {
        match self {
            RenderOutput::Rendered { tag, .. } => tag.as_str(),
            RenderOutput::Placeholder { tag, .. } => tag,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderOutput::Placeholder { .. })
    }

    pub fn to_html(&self, mode: RenderMode) -> Markup {
        match self {
            RenderOutput::Rendered { markup, .. } => markup.clone(),
            RenderOutput::Placeholder { key, tag } => {
                let el = html::Element::new("div")
                    .attr("data-type", tag)
                    .attr("data-key", key);
                match mode {
                    RenderMode::Production => el.flag("hidden").build(),
                    RenderMode::Development => el
                        .class("block-placeholder")
                        .text(&format!("No component implemented for block type: {tag}"))
                        .build(),
                }
            }
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Development => f.write_str("development"),
            RenderMode::Production => f.write_str("production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder() -> RenderOutput {
        RenderOutput::Placeholder {
            key: "b".to_string(),
            tag: "unknown-x".to_string(),
        }
    }

    #[test]
    fn production_placeholder_is_empty_and_hidden() {
        let html = placeholder().to_html(RenderMode::Production);
        assert_eq!(
            html.as_str(),
            r#"<div data-type="unknown-x" data-key="b" hidden></div>"#
        );
    }

    #[test]
    fn development_placeholder_names_the_tag() {
        let html = placeholder().to_html(RenderMode::Development);
        assert!(html.as_str().contains(r#"data-type="unknown-x""#));
        assert!(html
            .as_str()
            .contains("No component implemented for block type: unknown-x"));
    }

    #[test]
    fn context_looks_up_reviews_by_block_key() {
        let ctx = RenderContext::new(RenderMode::Production).with_reviews(
            "r1",
            ReviewsResult {
                average_rating: Some(4.0),
                ..ReviewsResult::default()
            },
        );
        assert_eq!(ctx.reviews_for("r1").and_then(|r| r.average_rating), Some(4.0));
        assert!(ctx.reviews_for("r2").is_none());
        assert!(ctx.posts().is_none());
    }
}
