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

//! Forms and maps.

use site_types::blocks::{
    FormContactBlock, FormContactMapBlock, FormNewsletterBlock, LocationMapBlock,
};
use site_types::BlockTag;
use url::Url;

use super::section;
use crate::render::html::{text_element, Element, Markup};
use crate::render::RenderContext;

const GOOGLE_MAPS_EMBED_BASE: &str = "https://www.google.com/maps/embed/v1/place";
const FORMSPREE_BASE: &str = "https://formspree.io/f";

/// Embed URL for a coordinate pair, or `None` without a key or coordinates.
pub fn map_embed_url(
    api_key: Option<&str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    zoom: Option<f64>,
) -> Option<String> {
    let (key, lat, lng) = (api_key?, latitude?, longitude?);
    let mut url = Url::parse(GOOGLE_MAPS_EMBED_BASE).ok()?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("key", key);
        pairs.append_pair("q", &format!("{lat},{lng}"));
        if let Some(zoom) = zoom.filter(|z| *z > 0.0) {
            pairs.append_pair("zoom", &zoom.round().to_string());
        }
    }
    Some(url.to_string())
}

fn map_card(
    ctx: &RenderContext,
    label: Option<&str>,
    name: Option<&str>,
    address: Option<&str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    zoom: Option<f64>,
) -> Markup {
    let name = name.filter(|n| !n.is_empty()).unwrap_or("Location");
    let map = match map_embed_url(ctx.maps_embed_key.as_deref(), latitude, longitude, zoom) {
        Some(src) => Element::new("iframe")
            .attr("title", name)
            .attr("src", &src)
            .attr("width", "100%")
            .attr("height", "320")
            .attr("loading", "lazy")
            .flag("allowfullscreen")
            .build(),
        None => Element::new("div")
            .class("map-unavailable")
            .text("Map unavailable")
            .build(),
    };

    Element::new("div")
        .class("map-card")
        .child(map)
        .child(text_element("p", Some(label.filter(|l| !l.is_empty()).unwrap_or("Our location"))))
        .child(text_element("h3", Some(name)))
        .child(text_element("address", address))
        .build()
}

fn contact_form(
    form_id: Option<&str>,
    submit_label: Option<&str>,
    success_message: Option<&str>,
) -> Markup {
    let Some(form_id) = form_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Element::new("p")
            .class("form-unavailable")
            .text("Contact form is not configured.")
            .build();
    };

    let field = |name: &'static str, label: &str, input: Markup| {
        Element::new("label")
            .attr("for", name)
            .text(label)
            .build()
            .into_string()
            + input.as_str()
    };

    let fields = [
        field(
            "name",
            "Name",
            Element::void("input")
                .attr("id", "name")
                .attr("name", "name")
                .attr("type", "text")
                .flag("required")
                .build(),
        ),
        field(
            "email",
            "Email",
            Element::void("input")
                .attr("id", "email")
                .attr("name", "email")
                .attr("type", "email")
                .flag("required")
                .build(),
        ),
        field(
            "message",
            "Message",
            Element::new("textarea")
                .attr("id", "message")
                .attr("name", "message")
                .flag("required")
                .build(),
        ),
    ];

    Element::new("form")
        .attr("method", "post")
        .attr("action", &format!("{FORMSPREE_BASE}/{form_id}"))
        .attr_opt("data-success", success_message)
        .children(fields.into_iter().map(Markup::raw))
        .child(
            Element::new("button")
                .attr("type", "submit")
                .text(submit_label.filter(|l| !l.is_empty()).unwrap_or("Send message"))
                .build(),
        )
        .build()
}

/// Email signup posting to `/api/newsletter`.
pub fn form_newsletter(block: &FormNewsletterBlock, key: &str, _ctx: &RenderContext) -> Markup {
    let form = Element::new("form")
        .class("newsletter")
        .attr("method", "post")
        .attr("action", "/api/newsletter")
        .attr_opt("data-success", block.success_message.as_deref())
        .child(
            Element::void("input")
                .attr("name", "email")
                .attr("type", "email")
                .attr("placeholder", "Email")
                .attr("aria-label", "Email")
                .flag("required")
                .build(),
        )
        .child(
            Element::new("button")
                .attr("type", "submit")
                .text(block.button_text.as_deref().unwrap_or("Subscribe"))
                .build(),
        )
        .build();

    section(
        BlockTag::FormNewsletter,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .attr_opt("data-align", block.stack_align.as_deref())
    .child(form)
    .child(text_element("small", block.consent_text.as_deref()))
    .build()
}

pub fn form_contact(block: &FormContactBlock, key: &str, _ctx: &RenderContext) -> Markup {
    section(
        BlockTag::FormContact,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(text_element("h2", block.heading.as_deref()))
    .child(text_element("p", block.body.as_deref()))
    .child(contact_form(
        block.formspree_form_id.as_deref(),
        block.submit_button_label.as_deref(),
        block.success_message.as_deref(),
    ))
    .build()
}

pub fn form_contact_map(block: &FormContactMapBlock, key: &str, ctx: &RenderContext) -> Markup {
    section(
        BlockTag::FormContactMap,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(
        Element::new("div")
            .class("contact")
            .child(text_element("h2", block.heading.as_deref()))
            .child(text_element("p", block.body.as_deref()))
            .child(contact_form(
                block.formspree_form_id.as_deref(),
                block.submit_button_label.as_deref(),
                block.success_message.as_deref(),
            ))
            .build(),
    )
    .child(map_card(
        ctx,
        None,
        block.location_name.as_deref(),
        block.address.as_deref(),
        block.latitude,
        block.longitude,
        block.map_zoom,
    ))
    .build()
}

pub fn location_map(block: &LocationMapBlock, key: &str, ctx: &RenderContext) -> Markup {
    section(
        BlockTag::LocationMap,
        key,
        block.padding.as_ref(),
        block.color_variant.as_deref(),
        None,
    )
    .child(map_card(
        ctx,
        block.location_label.as_deref(),
        block.location_name.as_deref(),
        block.address.as_deref(),
        block.latitude,
        block.longitude,
        block.map_zoom,
    ))
    .build()
}
