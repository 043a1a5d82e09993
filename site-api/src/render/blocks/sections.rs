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

//! Text-led sections: headers, calls to action, rows, timelines and FAQs.

use site_types::blocks::{
    Cta1Block, FaqsBlock, GridRowBlock, SectionHeaderBlock, SplitColumn, SplitRowBlock,
    TimelineRowBlock,
};
use site_types::BlockTag;

use super::{image, link_button, link_row, portable_text, section};
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

pub fn section_header(block: &SectionHeaderBlock, key: &str, _ctx: &RenderContext) -> Markup {
    section(
        BlockTag::SectionHeader,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr("data-width", block.section_width.as_deref().unwrap_or("default"))
    .attr("data-align", block.stack_align.as_deref().unwrap_or("left"))
    .child(text_element("p", block.tag_line.as_deref()))
    .child(text_element("h2", block.title.as_deref()))
    .child(text_element("p", block.description.as_deref()))
    .build()
}

pub fn cta_1(block: &Cta1Block, key: &str, _ctx: &RenderContext) -> Markup {
    section(
        BlockTag::Cta1,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr("data-width", block.section_width.as_deref().unwrap_or("default"))
    .attr("data-align", block.stack_align.as_deref().unwrap_or("left"))
    .child(text_element("p", block.tag_line.as_deref()))
    .child(text_element("h2", block.title.as_deref()))
    .child(portable_text(&block.body))
    .child(link_row(&block.links))
    .build()
}

fn split_column(column: &SplitColumn) -> Markup {
    let list: Vec<Markup> = column
        .list
        .iter()
        .map(|item| {
            Element::new("li")
                .child(text_element("p", item.tag_line.as_deref()))
                .child(text_element("h3", item.title.as_deref()))
                .child(portable_text(&item.body))
                .build()
        })
        .collect();
    let list = if list.is_empty() {
        Markup::empty()
    } else {
        Element::new("ul").children(list).build()
    };

    Element::new("div")
        .class("split-column")
        .attr_opt("data-column", column.kind.as_deref())
        .child(text_element("p", column.tag_line.as_deref()))
        .child(text_element("h3", column.title.as_deref()))
        .child(portable_text(&column.body))
        .child(
            column
                .image
                .as_ref()
                .map(|img| image(img, column.title.as_deref().unwrap_or_default()))
                .unwrap_or_default(),
        )
        .child(list)
        .child(
            column
                .link
                .as_ref()
                .map(|link| link_button(link, "Learn more"))
                .unwrap_or_default(),
        )
        .build()
}

pub fn split_row(block: &SplitRowBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let mut el = section(
        BlockTag::SplitRow,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        block.section_id.as_deref(),
    );
    if block.no_gap.unwrap_or(false) {
        el = el.flag("data-no-gap");
    }
    el.children(block.split_columns.iter().map(split_column))
        .build()
}

pub fn grid_row(block: &GridRowBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let cards = block.columns.iter().map(|card| {
        Element::new("article")
            .attr_opt("data-key", card.key.as_deref())
            .child(
                card.image
                    .as_ref()
                    .map(|img| image(img, card.title.as_deref().unwrap_or_default()))
                    .unwrap_or_default(),
            )
            .child(text_element("h3", card.title.as_deref()))
            .child(text_element("p", card.excerpt.as_deref()))
            .child(
                card.link
                    .as_ref()
                    .map(|link| link_button(link, "Read more"))
                    .unwrap_or_default(),
            )
            .build()
    });

    section(
        BlockTag::GridRow,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr_opt("data-columns", block.grid_columns.as_deref())
    .children(cards)
    .build()
}

pub fn timeline_row(block: &TimelineRowBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let entries = block.timelines.iter().map(|entry| {
        Element::new("li")
            .child(text_element("time", entry.tag_line.as_deref()))
            .child(text_element("h3", entry.title.as_deref()))
            .child(portable_text(&entry.body))
            .build()
    });

    section(
        BlockTag::TimelineRow,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(Element::new("ol").children(entries).build())
    .build()
}

pub fn faqs(block: &FaqsBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let items = block.faqs.iter().map(|faq| {
        Element::new("details")
            .attr_opt("data-id", faq.id.as_deref())
            .child(
                Element::new("summary")
                    .text(faq.title.as_deref().unwrap_or_default())
                    .build(),
            )
            .child(portable_text(&faq.body))
            .build()
    });

    section(
        BlockTag::Faqs,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .children(items)
    .build()
}
