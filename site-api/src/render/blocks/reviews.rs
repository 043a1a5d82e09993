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

use site_types::blocks::ReviewsCarouselBlock;
use site_types::{BlockTag, Review, ReviewsResult};

use super::{link_button, section};
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

const EMPTY_REVIEWS_MESSAGE: &str =
    "Google has not returned any public reviews yet. Check back soon.";

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if letters.is_empty() {
        "GG".to_string()
    } else {
        letters
    }
}

fn stars(rating: f64) -> Markup {
    Element::new("span")
        .class("stars")
        .attr("aria-label", &format!("{rating:.1} out of 5 stars"))
        .attr("style", &format!("--rating: {rating:.1}"))
        .build()
}

fn review_card(review: &Review) -> Markup {
    let name = review.author.name.as_str();
    let avatar = match review.author.avatar_url.as_deref() {
        Some(src) => Element::void("img")
            .attr("src", src)
            .attr("alt", &format!("{name} profile picture"))
            .attr("referrerpolicy", "no-referrer")
            .build(),
        None => Element::new("span")
            .class("avatar")
            .text(&initials(name))
            .build(),
    };

    Element::new("article")
        .class("review")
        .attr("data-review-id", &review.id)
        .child(
            Element::new("header")
                .child(avatar)
                .child(text_element("p", Some(name)))
                .child(text_element(
                    "p",
                    review.published_relative_description.as_deref(),
                ))
                .build(),
        )
        .child(stars(review.rating))
        .child(text_element("p", review.text.as_deref()))
        .build()
}

fn summary(result: &ReviewsResult) -> Markup {
    let Some(average) = result.average_rating.filter(|r| *r > 0.0) else {
        return Markup::empty();
    };
    let mut caption = match result.user_rating_count {
        Some(count) if count > 0 => format!("{count} Google reviews"),
        _ => "Google reviews".to_string(),
    };
    if let Some(place) = result.place_name.as_deref() {
        caption.push_str(" · ");
        caption.push_str(place);
    }
    Element::new("div")
        .class("rating-summary")
        .child(stars(average))
        .child(
            Element::new("strong")
                .text(&format!("{average:.1}"))
                .build(),
        )
        .child(Element::new("p").text(&caption).build())
        .build()
}

/// Reviews resolved for this block by the page composer.
///
/// A block that was never prefetched renders as if the lookup returned
/// nothing, which keeps the view total.
pub fn reviews_carousel(block: &ReviewsCarouselBlock, key: &str, ctx: &RenderContext) -> Markup {
    let fallback = ReviewsResult::default();
    let result = ctx.reviews_for(key).unwrap_or(&fallback);

    let body = if let Some(error) = result.error.as_deref() {
        Element::new("p")
            .class("reviews-error")
            .attr("role", "status")
            .text(error)
            .build()
    } else if result.reviews.is_empty() {
        Element::new("p")
            .class("reviews-empty")
            .text(EMPTY_REVIEWS_MESSAGE)
            .build()
    } else {
        Element::new("div")
            .class("carousel")
            .attr("data-loop", if result.reviews.len() > 1 { "true" } else { "false" })
            .children(result.reviews.iter().map(review_card))
            .build()
    };

    let cta = block
        .cta
        .as_ref()
        .map(|link| link_button(link, "Read more reviews"))
        .unwrap_or_default();

    section(
        BlockTag::ReviewsCarousel,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        block.section_id.as_deref(),
    )
    .child(text_element("p", block.eyebrow.as_deref()))
    .child(text_element("h2", block.heading.as_deref()))
    .child(summary(result))
    .child(text_element("p", block.intro.as_deref()))
    .child(body)
    .child(cta)
    .child(
        Element::new("small")
            .class("attribution")
            .text("Reviews provided by Google")
            .build(),
    )
    .build()
}
