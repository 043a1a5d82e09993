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

//! Hero banners.

use site_types::blocks::{Hero1Block, Hero2Block, HeroFullBlock};
use site_types::BlockTag;

use super::{image, link_row, portable_text, section};
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

pub fn hero_1(block: &Hero1Block, key: &str, _ctx: &RenderContext) -> Markup {
    let copy = Element::new("div")
        .class("hero-copy")
        .child(text_element("p", block.tag_line.as_deref()))
        .child(text_element("h1", block.title.as_deref()))
        .child(portable_text(&block.body))
        .child(link_row(&block.links))
        .build();
    let media = block
        .image
        .as_ref()
        .map(|img| image(img, block.title.as_deref().unwrap_or_default()))
        .unwrap_or_default();

    section(BlockTag::Hero1, key, None, None, None)
        .child(copy)
        .child(media)
        .build()
}

pub fn hero_2(block: &Hero2Block, key: &str, _ctx: &RenderContext) -> Markup {
    section(BlockTag::Hero2, key, None, None, None)
        .child(text_element("p", block.tag_line.as_deref()))
        .child(text_element("h1", block.title.as_deref()))
        .child(portable_text(&block.body))
        .child(link_row(&block.links))
        .build()
}

/// Full-bleed hero. Uses the image list when present, else the single image.
pub fn hero_full(block: &HeroFullBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let alt = block.title.as_deref().unwrap_or_default();
    let backgrounds: Markup = if block.images.is_empty() {
        block.image.iter().map(|img| image(img, alt)).collect()
    } else {
        block.images.iter().map(|img| image(img, alt)).collect()
    };

    let mut el = section(BlockTag::HeroFull, key, None, None, None)
        .attr_opt("data-height", block.height.as_deref())
        .attr_opt("data-align", block.content_alignment.as_deref());
    if block.overlay.unwrap_or(false) {
        let strength = block.overlay_strength.unwrap_or(0.5).clamp(0.0, 1.0);
        el = el.attr("data-overlay", &format!("{strength:.2}"));
    }
    if block.frosted.unwrap_or(false) {
        el = el.flag("data-frosted");
    }

    el.child(Element::new("div").class("hero-media").child(backgrounds).build())
        .child(
            Element::new("div")
                .class("hero-copy")
                .child(text_element("p", block.tag_line.as_deref()))
                .child(text_element("h1", block.title.as_deref()))
                .child(portable_text(&block.body))
                .build(),
        )
        .build()
}
