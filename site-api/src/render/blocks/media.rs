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

//! Image and animation sections.

use site_types::blocks::{Carousel1Block, Carousel2Block, LogoCloud1Block, LottieAnimationBlock};
use site_types::BlockTag;

use super::{image, portable_text, section};
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

/// Lottie player mount point. The client script reads the JSON sources from
/// the data attributes; without a light-mode source there is nothing to mount.
pub fn lottie_animation(block: &LottieAnimationBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let light = block.animation.as_ref().and_then(|f| f.url());
    let dark = block.animation_dark.as_ref().and_then(|f| f.url());

    let player = match light {
        Some(src) => Element::new("div")
            .class("lottie")
            .attr("role", "img")
            .attr(
                "aria-label",
                block
                    .aria_label
                    .as_deref()
                    .or(block.title.as_deref())
                    .unwrap_or("Animation"),
            )
            .attr("data-src", src)
            .attr_opt("data-src-dark", dark)
            .attr_opt("data-size", block.animation_size.as_deref())
            .build(),
        None => Markup::empty(),
    };

    section(
        BlockTag::LottieAnimation,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr_opt("data-width", block.section_width.as_deref())
    .attr_opt("data-align", block.animation_align.as_deref())
    .child(text_element("h2", block.title.as_deref()))
    .child(player)
    .build()
}

pub fn carousel_1(block: &Carousel1Block, key: &str, _ctx: &RenderContext) -> Markup {
    let slides = block.images.iter().enumerate().map(|(i, img)| {
        Element::new("li")
            .attr("data-slide", &i.to_string())
            .child(image(img, &format!("Slide {}", i + 1)))
            .build()
    });

    section(
        BlockTag::Carousel1,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr_opt("data-size", block.size.as_deref())
    .attr_opt("data-indicators", block.indicators.as_deref())
    .child(Element::new("ul").class("carousel").children(slides).build())
    .build()
}

/// Curated testimonials stored in the CMS.
pub fn carousel_2(block: &Carousel2Block, key: &str, _ctx: &RenderContext) -> Markup {
    let slides = block.testimonial.iter().map(|t| {
        let name = t.name.as_deref().unwrap_or_default();
        Element::new("li")
            .child(
                Element::new("blockquote")
                    .attr_opt(
                        "data-rating",
                        t.rating.map(|r| format!("{:.1}", r.clamp(0.0, 5.0))).as_deref(),
                    )
                    .child(portable_text(&t.body))
                    .build(),
            )
            .child(
                Element::new("figcaption")
                    .child(t.image.as_ref().map(|img| image(img, name)).unwrap_or_default())
                    .child(text_element("strong", t.name.as_deref()))
                    .child(text_element("span", t.title.as_deref()))
                    .build(),
            )
            .build()
    });

    section(
        BlockTag::Carousel2,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(Element::new("ul").class("carousel").children(slides).build())
    .build()
}

pub fn logo_cloud_1(block: &LogoCloud1Block, key: &str, _ctx: &RenderContext) -> Markup {
    section(
        BlockTag::LogoCloud1,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(text_element("h2", block.title.as_deref()))
    .child(
        Element::new("div")
            .class("logos")
            .children(block.images.iter().map(|img| image(img, "Logo")))
            .build(),
    )
    .build()
}
