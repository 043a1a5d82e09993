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

//! Page composition: prefetch, dispatch and document shell.

use std::sync::Arc;

use futures::future::join_all;
use site_types::blocks::Page;
use site_types::{Block, BlockBody, ReviewQuery};

use super::html::{text_element, Element, Markup};
use super::{Dispatcher, RenderContext, RenderMode, RenderOutput};
use crate::cms::ContentSource;
use crate::reviews::ReviewsClient;

/// Renders CMS pages into complete HTML documents.
pub struct PageComposer {
    dispatcher: Dispatcher,
    reviews: Arc<ReviewsClient>,
    content: Arc<dyn ContentSource>,
    mode: RenderMode,
    site_url: String,
    maps_embed_key: Option<String>,
}

impl PageComposer {
    pub fn new(
        dispatcher: Dispatcher,
        reviews: Arc<ReviewsClient>,
        content: Arc<dyn ContentSource>,
        mode: RenderMode,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            reviews,
            content,
            mode,
            site_url: site_url.into(),
            maps_embed_key: None,
        }
    }

    pub fn with_maps_key(mut self, key: Option<String>) -> Self {
        self.maps_embed_key = key;
        self
    }

    /// Resolve external content for `blocks`.
    ///
    /// Every reviews block gets its own lookup and the post list is fetched
    /// once if any block lists posts. All lookups run concurrently and their
    /// failures are stored as values.
    pub async fn context_for(&self, blocks: &[Block]) -> RenderContext {
        let review_lookups = blocks.iter().filter_map(|block| match &block.body {
            BlockBody::ReviewsCarousel(fields) => {
                let query = ReviewQuery::from(fields);
                let key = block.key.clone();
                let reviews = self.reviews.clone();
                Some(async move { (key, reviews.fetch_reviews(&query).await) })
            }
            _ => None,
        });

        let wants_posts = blocks
            .iter()
            .any(|block| matches!(block.body, BlockBody::AllPosts(_)));
        let posts = async {
            if !wants_posts {
                return None;
            }
            Some(self.content.fetch_posts().await.map_err(|err| {
                tracing::warn!("Post listing unavailable: {err}");
                err.to_string()
            }))
        };

        let (reviews, posts) = futures::join!(join_all(review_lookups), posts);

        let mut ctx = RenderContext::new(self.mode);
        if let Some(key) = &self.maps_embed_key {
            ctx = ctx.with_maps_key(key.clone());
        }
        for (key, result) in reviews {
            ctx = ctx.with_reviews(key, result);
        }
        if let Some(posts) = posts {
            ctx = ctx.with_posts(posts);
        }
        ctx
    }

    /// Prefetch, then dispatch. One output per block, in order.
    pub async fn render_blocks(&self, blocks: &[Block]) -> Vec<RenderOutput> {
        let ctx = self.context_for(blocks).await;
        self.dispatcher.render(blocks, &ctx)
    }

    /// Full HTML document for the page published under `slug`.
    pub async fn compose(&self, slug: &str, page: &Page) -> Markup {
        let outputs = self.render_blocks(&page.blocks).await;
        let main: Markup = outputs.iter().map(|o| o.to_html(self.mode)).collect();

        let title = page
            .meta_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(if slug == "index" { "Home" } else { slug });
        let canonical = if slug == "index" {
            format!("{}/", self.site_url)
        } else {
            format!("{}/{slug}", self.site_url)
        };

        let mut head = Element::new("head")
            .child(Element::void("meta").attr("charset", "utf-8").build())
            .child(
                Element::void("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1")
                    .build(),
            )
            .child(text_element("title", Some(title)));
        if let Some(description) = page.meta_description.as_deref() {
            head = head.child(
                Element::void("meta")
                    .attr("name", "description")
                    .attr("content", description)
                    .build(),
            );
        }
        if page.noindex {
            head = head.child(
                Element::void("meta")
                    .attr("name", "robots")
                    .attr("content", "noindex")
                    .build(),
            );
        }
        head = head.child(
            Element::void("link")
                .attr("rel", "canonical")
                .attr("href", &canonical)
                .build(),
        );

        document(head.build(), Element::new("main").child(main).build())
    }
}

fn document(head: Markup, body: Markup) -> Markup {
    let html = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(Element::new("body").child(body).build())
        .build();
    Markup::raw(format!("<!DOCTYPE html>{html}"))
}

/// Bare document for error responses.
pub fn error_document(status: u16, message: &str) -> Markup {
    let head = Element::new("head")
        .child(Element::void("meta").attr("charset", "utf-8").build())
        .child(
            Element::void("meta")
                .attr("name", "robots")
                .attr("content", "noindex")
                .build(),
        )
        .child(Element::new("title").text(message).build())
        .build();
    let body = Element::new("main")
        .child(Element::new("h1").text(&status.to_string()).build())
        .child(Element::new("p").text(message).build())
        .build();
    document(head, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use site_types::blocks::{AllPostsBlock, FaqsBlock, PostSummary, ReviewsCarouselBlock};

    use crate::cms::CmsError;
    use crate::config::ReviewsConfig;
    use crate::reviews::transport::{
        PlacesRequest, PlacesTransport, TransportError, TransportResponse,
    };

    struct CountingPlaces(AtomicUsize);

    #[async_trait]
    impl PlacesTransport for CountingPlaces {
        async fn get(&self, _request: PlacesRequest) -> Result<TransportResponse, TransportError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(TransportResponse {
                status: 200,
                body: r#"{"rating":4.5,"reviews":[{"name":"r1","rating":5}]}"#.to_string(),
            })
        }
    }

    struct Posts {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContentSource for Posts {
        async fn fetch_page(&self, _slug: &str) -> Result<Option<Page>, CmsError> {
            Ok(None)
        }

        async fn fetch_posts(&self) -> Result<Vec<PostSummary>, CmsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CmsError::Config("offline".to_string()));
            }
            Ok(vec![PostSummary {
                title: Some("Spring menu".to_string()),
                slug: Some("spring-menu".to_string()),
                excerpt: None,
                created_at: None,
            }])
        }
    }

    fn composer(
        api_key: Option<&str>,
        fail_posts: bool,
    ) -> (PageComposer, Arc<CountingPlaces>, Arc<Posts>) {
        let places = Arc::new(CountingPlaces(AtomicUsize::new(0)));
        let posts = Arc::new(Posts {
            calls: AtomicUsize::new(0),
            fail: fail_posts,
        });
        let reviews = ReviewsClient::new(
            ReviewsConfig {
                api_key: api_key.map(str::to_string),
                default_place_id: Some("ChIJ-default".to_string()),
                ..ReviewsConfig::default()
            },
            places.clone(),
        );
        let composer = PageComposer::new(
            Dispatcher::default(),
            Arc::new(reviews),
            posts.clone(),
            RenderMode::Production,
            "https://example.com",
        );
        (composer, places, posts)
    }

    fn reviews_block(key: &str) -> Block {
        Block::new(key, BlockBody::ReviewsCarousel(ReviewsCarouselBlock::default()))
    }

    #[tokio::test]
    async fn prefetches_each_reviews_block_and_posts_once() {
        let (composer, places, posts) = composer(Some("key"), false);
        let blocks = vec![
            reviews_block("r1"),
            Block::new("p1", BlockBody::AllPosts(AllPostsBlock::default())),
            reviews_block("r2"),
            Block::new("p2", BlockBody::AllPosts(AllPostsBlock::default())),
        ];

        let ctx = composer.context_for(&blocks).await;
        assert_eq!(places.0.load(Ordering::SeqCst), 2);
        assert_eq!(posts.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.reviews_for("r1").unwrap().reviews.len(), 1);
        assert_eq!(ctx.reviews_for("r2").unwrap().average_rating, Some(4.5));
        assert_eq!(ctx.posts().unwrap().as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_fetches_without_external_blocks() {
        let (composer, places, posts) = composer(Some("key"), false);
        let blocks = vec![Block::new("f", BlockBody::Faqs(FaqsBlock::default()))];
        let ctx = composer.context_for(&blocks).await;
        assert_eq!(places.0.load(Ordering::SeqCst), 0);
        assert_eq!(posts.calls.load(Ordering::SeqCst), 0);
        assert!(ctx.posts().is_none());
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_page() {
        let (composer, places, _) = composer(None, true);
        let page = Page {
            meta_title: Some("Visit us".to_string()),
            meta_description: Some("Coffee & cake".to_string()),
            noindex: true,
            blocks: vec![
                reviews_block("r1"),
                Block::unknown("mystery", "m1"),
                Block::new("p1", BlockBody::AllPosts(AllPostsBlock::default())),
            ],
        };

        let html = composer.compose("visit", &page).await;
        let html = html.as_str();
        assert_eq!(places.0.load(Ordering::SeqCst), 0);
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(html.contains("<title>Visit us</title>"));
        assert!(html.contains(r#"<meta name="description" content="Coffee &amp; cake">"#));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/visit">"#));
        assert!(html.contains("Missing GOOGLE_PLACES_API_KEY environment variable."));
        assert!(html.contains(r#"<div data-type="mystery" data-key="m1" hidden></div>"#));
        assert!(html.contains("Posts are unavailable right now."));

        let r1 = html.find(r#"data-key="r1""#).unwrap();
        let m1 = html.find(r#"data-key="m1""#).unwrap();
        let p1 = html.find(r#"data-key="p1""#).unwrap();
        assert!(r1 < m1 && m1 < p1);
    }

    #[tokio::test]
    async fn index_page_is_canonical_root() {
        let (composer, _, _) = composer(Some("key"), false);
        let html = composer.compose("index", &Page::default()).await;
        assert!(html.as_str().contains("<title>Home</title>"));
        assert!(html
            .as_str()
            .contains(r#"<link rel="canonical" href="https://example.com/">"#));
    }
}
