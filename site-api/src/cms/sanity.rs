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

//! Sanity content lake client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use site_types::blocks::{Page, PostSummary};
use url::Url;

use super::queries::{page_query, POSTS_QUERY};
use super::{decode_page, CmsError, ContentSource, SANITY_TAG};
use crate::cache::TaggedCache;
use crate::config::CmsConfig;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Runs GROQ queries over HTTP and caches raw results for `cache_ttl`.
pub struct SanityClient {
    config: CmsConfig,
    http: reqwest::Client,
    cache: TaggedCache<Value>,
}

impl SanityClient {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            cache: TaggedCache::new(),
        }
    }

    /// Full request URL for `query` with JSON-encoded `params`.
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<String, CmsError> {
        let mut url = Url::parse(&self.config.query_url())
            .map_err(|e| CmsError::Config(format!("invalid content lake URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &Value::from(*value).to_string());
            }
            pairs.append_pair("perspective", "published");
        }
        Ok(url.to_string())
    }

    async fn run(&self, query: &str, params: &[(&str, &str)]) -> Result<Value, CmsError> {
        let url = self.query_url(query, params)?;
        if let Some(hit) = self.cache.get(&url).await {
            return Ok(hit);
        }

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body: QueryResponse = resp.json().await?;
        self.remember(url, &body.result).await;
        Ok(body.result)
    }

    /// Cache a query result. Misses (`null`) are not kept, so unknown slugs
    /// cannot fill the cache.
    async fn remember(&self, url: String, result: &Value) {
        if result.is_null() {
            return;
        }
        self.cache
            .insert(url, result.clone(), &[SANITY_TAG], self.config.cache_ttl)
            .await;
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch_page(&self, slug: &str) -> Result<Option<Page>, CmsError> {
        let value = self.run(&page_query(), &[("slug", slug)]).await?;
        decode_page(value)
    }

    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, CmsError> {
        let value = self.run(POSTS_QUERY, &[]).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn invalidate(&self, tag: &str) -> usize {
        self.cache.invalidate_tag(tag).await
    }
}
