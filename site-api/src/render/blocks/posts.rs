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

use site_types::blocks::{AllPostsBlock, PostSummary};
use site_types::BlockTag;

use super::section;
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

fn post_card(post: &PostSummary) -> Markup {
    let date = post.created_at.map(|at| {
        Element::new("time")
            .attr("datetime", &at.to_rfc3339())
            .text(&at.format("%-d %B %Y").to_string())
            .build()
    });
    let card = Element::new("article")
        .class("post-card")
        .children(date)
        .child(text_element("h3", post.title.as_deref()))
        .child(text_element("p", post.excerpt.as_deref()))
        .build();

    match post.slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => Element::new("a")
            .attr("href", &format!("/blog/{slug}"))
            .child(card)
            .build(),
        None => card,
    }
}

/// Post listing. Posts are fetched by the page composer.
pub fn all_posts(block: &AllPostsBlock, key: &str, ctx: &RenderContext) -> Markup {
    let body = match ctx.posts() {
        Some(Ok(posts)) if !posts.is_empty() => Element::new("div")
            .class("post-grid")
            .children(posts.iter().map(post_card))
            .build(),
        Some(Err(_)) => Element::new("p")
            .class("posts-error")
            .text("Posts are unavailable right now.")
            .build(),
        _ => Element::new("p").text("No posts yet.").build(),
    };

    section(
        BlockTag::AllPosts,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(body)
    .build()
}
