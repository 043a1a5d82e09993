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

//! Shared test helpers for site-api integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use site_api::cms::{decode_page, CmsError, ContentSource};
use site_api::config::{CmsConfig, Config, ReviewsConfig};
use site_api::newsletter::{MailingList, MailingListError};
use site_api::render::RenderMode;
use site_api::reviews::transport::{
    PlacesRequest, PlacesTransport, TransportError, TransportResponse,
};
use site_api::reviews::ReviewsClient;
use site_api::{routes, state::AppState};
use site_types::blocks::{Page, PostSummary};

pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const TEST_SITE_URL: &str = "https://cafe.example.com";

/// In-memory pages keyed by slug, decoded from CMS-shaped JSON.
#[derive(Default)]
pub struct FakeContent {
    pages: HashMap<String, Value>,
    posts: Vec<PostSummary>,
    fail: bool,
    pub page_fetches: AtomicUsize,
    pub invalidated: Mutex<Vec<String>>,
}

impl FakeContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, slug: &str, document: Value) -> Self {
        self.pages.insert(slug.to_string(), document);
        self
    }

    pub fn with_posts(mut self, posts: Vec<PostSummary>) -> Self {
        self.posts = posts;
        self
    }

    /// Every fetch fails as if the content lake were down.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ContentSource for FakeContent {
    async fn fetch_page(&self, slug: &str) -> Result<Option<Page>, CmsError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CmsError::Status {
                status: 503,
                body: "content lake unavailable".to_string(),
            });
        }
        decode_page(self.pages.get(slug).cloned().unwrap_or(Value::Null))
    }

    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, CmsError> {
        if self.fail {
            return Err(CmsError::Config("offline".to_string()));
        }
        Ok(self.posts.clone())
    }

    async fn invalidate(&self, tag: &str) -> usize {
        self.invalidated.lock().unwrap().push(tag.to_string());
        if tag == "sanity" {
            self.pages.len()
        } else {
            0
        }
    }
}

/// Places transport returning one canned response and counting calls.
pub struct FakePlaces {
    status: u16,
    body: Option<String>,
    pub calls: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn json(body: Value) -> Self {
        Self::status(200, &body.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: Some(body.to_string()),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails before a response arrives.
    pub fn broken() -> Self {
        Self {
            status: 0,
            body: None,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesTransport for FakePlaces {
    async fn get(&self, request: PlacesRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(request.url);
        match &self.body {
            Some(body) => Ok(TransportResponse {
                status: self.status,
                body: body.clone(),
            }),
            None => Err(TransportError::Other("connection refused".to_string())),
        }
    }
}

/// Mailing list that records subscriptions, or rejects them all.
#[derive(Default)]
pub struct FakeMailingList {
    pub subscribed: Mutex<Vec<String>>,
    reject: bool,
}

impl FakeMailingList {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl MailingList for FakeMailingList {
    async fn subscribe(&self, email: &str) -> Result<(), MailingListError> {
        if self.reject {
            return Err(MailingListError::Rejected {
                status: 422,
                body: "audience not found".to_string(),
            });
        }
        self.subscribed.lock().unwrap().push(email.to_string());
        Ok(())
    }
}

/// Configuration with every outbound service pointed at nothing real.
pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        render_mode: RenderMode::Production,
        site_url: TEST_SITE_URL.to_string(),
        cms: CmsConfig {
            project_id: "test".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-10-01".to_string(),
            use_cdn: false,
            revalidate_secret: Some(TEST_WEBHOOK_SECRET.to_string()),
            cache_ttl: Duration::from_secs(60),
        },
        reviews: ReviewsConfig {
            api_key: Some("test-places-key".to_string()),
            default_place_id: Some("ChIJ-test-place".to_string()),
            ..ReviewsConfig::default()
        },
        maps_embed_key: None,
        newsletter: None,
    }
}

/// Services behind a test router.
pub struct TestApp {
    pub config: Config,
    pub content: Arc<FakeContent>,
    pub places: Arc<FakePlaces>,
    pub mailing_list: Option<Arc<FakeMailingList>>,
}

impl TestApp {
    pub fn new(content: FakeContent) -> Self {
        Self {
            config: test_config(),
            content: Arc::new(content),
            places: Arc::new(FakePlaces::json(serde_json::json!({}))),
            mailing_list: None,
        }
    }

    pub fn with_places(mut self, places: FakePlaces) -> Self {
        self.places = Arc::new(places);
        self
    }

    pub fn with_mailing_list(mut self, list: FakeMailingList) -> Self {
        self.mailing_list = Some(Arc::new(list));
        self
    }

    pub fn with_config(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    /// Build the Axum router, ready for `tower::ServiceExt::oneshot`.
    pub fn router(&self) -> Router {
        let reviews = Arc::new(ReviewsClient::new(
            self.config.reviews.clone(),
            self.places.clone(),
        ));
        let mailing_list = self
            .mailing_list
            .clone()
            .map(|list| list as Arc<dyn MailingList>);
        let state = AppState::from_parts(&self.config, self.content.clone(), reviews, mailing_list);
        routes::router().with_state(state)
    }
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}

/// Consume a response body as UTF-8 text.
pub async fn response_text(resp: Response) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
