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

//! Shared application state passed to every Axum handler via `State`.

use std::sync::Arc;

use crate::cms::{ContentSource, SanityClient};
use crate::config::Config;
use crate::newsletter::{MailingList, ResendClient};
use crate::render::page::PageComposer;
use crate::render::Dispatcher;
use crate::reviews::ReviewsClient;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Renders CMS pages to HTML.
    pub composer: Arc<PageComposer>,
    /// Page and post source.
    pub content: Arc<dyn ContentSource>,
    pub reviews: Arc<ReviewsClient>,
    /// Mailing list. `None` disables subscriptions (503).
    pub mailing_list: Option<Arc<dyn MailingList>>,
    /// Webhook signing secret. `None` accepts unsigned webhooks.
    pub revalidate_secret: Option<String>,
}

impl AppState {
    /// State backed by the live CMS, Places and Resend clients.
    pub fn new(config: &Config) -> Self {
        let content: Arc<dyn ContentSource> = Arc::new(SanityClient::new(config.cms.clone()));
        let reviews = Arc::new(ReviewsClient::http(config.reviews.clone()));
        let mailing_list = config
            .newsletter
            .clone()
            .map(|n| Arc::new(ResendClient::new(n)) as Arc<dyn MailingList>);
        Self::from_parts(config, content, reviews, mailing_list)
    }

    /// State over caller-supplied services.
    pub fn from_parts(
        config: &Config,
        content: Arc<dyn ContentSource>,
        reviews: Arc<ReviewsClient>,
        mailing_list: Option<Arc<dyn MailingList>>,
    ) -> Self {
        let composer = PageComposer::new(
            Dispatcher::default(),
            reviews.clone(),
            content.clone(),
            config.render_mode,
            config.site_url.clone(),
        )
        .with_maps_key(config.maps_embed_key.clone());

        Self {
            composer: Arc::new(composer),
            content,
            reviews,
            mailing_list,
            revalidate_secret: config.cms.revalidate_secret.clone(),
        }
    }
}
