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

use site_types::blocks::{MenuCategory, MenuItem, MenuSectionBlock};
use site_types::BlockTag;

use super::{image, section};
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

/// Which parts of a menu section are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DisplayMode {
    Structured,
    Image,
    Combined,
}

impl DisplayMode {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("image") => DisplayMode::Image,
            Some("combined") => DisplayMode::Combined,
            _ => DisplayMode::Structured,
        }
    }

    fn shows_items(self) -> bool {
        matches!(self, DisplayMode::Structured | DisplayMode::Combined)
    }

    fn shows_images(self) -> bool {
        matches!(self, DisplayMode::Image | DisplayMode::Combined)
    }
}

fn has_content(category: &MenuCategory) -> bool {
    category.title.as_deref().is_some_and(|t| !t.trim().is_empty())
        || category
            .items
            .iter()
            .any(|item| item.name.as_deref().is_some_and(|n| !n.trim().is_empty()))
}

fn menu_item(item: &MenuItem) -> Markup {
    let dietary = if item.dietary.is_empty() {
        Markup::empty()
    } else {
        Element::new("ul")
            .class("dietary")
            .children(item.dietary.iter().map(|d| Element::new("li").text(d).build()))
            .build()
    };
    Element::new("li")
        .class("menu-item")
        .children(item.item_image.as_ref().map(|img| image(img, "")))
        .child(text_element("h4", item.name.as_deref()))
        .child(text_element("span", item.price.as_deref()))
        .child(text_element("p", item.description.as_deref()))
        .child(dietary)
        .build()
}

fn menu_category(category: &MenuCategory) -> Markup {
    let items: Vec<Markup> = category
        .items
        .iter()
        .filter(|item| item.name.is_some())
        .map(menu_item)
        .collect();
    Element::new("div")
        .class("menu-category")
        .child(text_element("h3", category.title.as_deref()))
        .child(text_element("p", category.description.as_deref()))
        .child(if items.is_empty() {
            Markup::empty()
        } else {
            Element::new("ul").children(items).build()
        })
        .build()
}

pub fn menu_section(block: &MenuSectionBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let mode = DisplayMode::parse(block.display_mode.as_deref());

    let mut el = section(
        BlockTag::MenuSection,
        key,
        block.padding.as_ref(),
        None,
        block.section_id.as_deref(),
    )
    .child(text_element("p", block.eyebrow.as_deref()))
    .child(text_element("h2", block.title.as_deref()))
    .child(text_element("p", block.intro.as_deref()));

    if mode.shows_items() {
        el = el.children(
            block
                .categories
                .iter()
                .filter(|c| has_content(c))
                .map(menu_category),
        );
    }
    if mode.shows_images() {
        el = el.children(block.menu_images.iter().map(|img| {
            Element::new("figure")
                .child(image(img, "Menu selection"))
                .build()
        }));
    }
    el.build()
}
