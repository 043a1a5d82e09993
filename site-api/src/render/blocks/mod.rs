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

//! Built-in block views.
//!
//! Views emit plain semantic HTML. Every section carries `data-block` and
//! `data-key` attributes so the stylesheet and client scripts can find it.

pub mod forms;
pub mod hero;
pub mod media;
pub mod menu;
pub mod posts;
pub mod reviews;
pub mod sections;

use site_types::blocks::{Image, Link, PortableTextBlock, SectionPadding};
use site_types::BlockTag;
use url::Url;

use super::html::{Element, Markup};

/// Outer `<section>` for a block.
pub(crate) fn section(
    tag: BlockTag,
    key: &str,
    padding: Option<&SectionPadding>,
    color_variant: Option<&str>,
    id: Option<&str>,
) -> Element {
    Element::new("section")
        .attr("data-block", tag.as_str())
        .attr("data-key", key)
        .attr_opt("id", id.filter(|id| !id.is_empty()))
        .attr_opt("data-color", color_variant)
        .attr_opt("data-padding", padding.map(padding_name))
}

fn padding_name(padding: &SectionPadding) -> &'static str {
    match (padding.top, padding.bottom) {
        (true, true) => "both",
        (true, false) => "top",
        (false, true) => "bottom",
        (false, false) => "none",
    }
}

/// Rich text as paragraphs and headings. Empty nodes are skipped.
pub(crate) fn portable_text(body: &[PortableTextBlock]) -> Markup {
    body.iter()
        .filter_map(|node| {
            let text = node.text();
            if text.trim().is_empty() {
                return None;
            }
            let name = match node.style.as_deref() {
                Some("h2") => "h2",
                Some("h3") => "h3",
                Some("h4") => "h4",
                Some("blockquote") => "blockquote",
                _ => "p",
            };
            Some(Element::new(name).text(&text).build())
        })
        .collect()
}

const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// `href` if it is relative, a fragment, or uses an allowed scheme.
pub(crate) fn safe_href(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) if LINK_SCHEMES.contains(&url.scheme()) => Some(href),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(href),
        Err(_) => None,
    }
}

/// A link styled as a button; empty when the link has no usable target.
pub(crate) fn link_button(link: &Link, fallback_label: &str) -> Markup {
    let Some(href) = link.href.as_deref().and_then(safe_href) else {
        if link.href.as_deref().is_some_and(|h| !h.trim().is_empty()) {
            tracing::warn!(href = ?link.href, "Dropping link with disallowed scheme");
        }
        return Markup::empty();
    };
    let label = link
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback_label);
    let mut el = Element::new("a")
        .attr("href", href)
        .class("button")
        .attr("data-variant", link.button_variant.as_deref().unwrap_or("default"));
    if link.target {
        el = el.attr("target", "_blank").attr("rel", "noreferrer");
    }
    el.text(label).build()
}

/// Row of link buttons, or nothing when no link resolves.
pub(crate) fn link_row(links: &[Link]) -> Markup {
    let buttons: Vec<Markup> = links
        .iter()
        .map(|link| link_button(link, "Learn more"))
        .filter(|m| !m.is_empty())
        .collect();
    if buttons.is_empty() {
        return Markup::empty();
    }
    Element::new("div").class("links").children(buttons).build()
}

/// `<img>` for a resolved asset, or nothing.
pub(crate) fn image(image: &Image, fallback_alt: &str) -> Markup {
    let Some(url) = image.url() else {
        return Markup::empty();
    };
    let dimensions = image
        .asset
        .as_ref()
        .and_then(|a| a.metadata.as_ref())
        .and_then(|m| m.dimensions);
    let alt = image.alt.as_deref().unwrap_or(fallback_alt);
    let mut el = Element::void("img").attr("src", url).attr("alt", alt);
    if let Some(d) = dimensions {
        el = el
            .attr("width", &d.width.round().to_string())
            .attr("height", &d.height.round().to_string());
    }
    el.attr("loading", "lazy").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_types::blocks::{Dimensions, ImageAsset, ImageMetadata, PortableTextSpan};

    #[test]
    fn section_carries_block_metadata() {
        let html = section(
            BlockTag::Faqs,
            "k1",
            Some(&SectionPadding {
                top: true,
                bottom: false,
            }),
            Some("primary"),
            Some(""),
        )
        .build();
        assert_eq!(
            html.as_str(),
            r#"<section data-block="faqs" data-key="k1" data-color="primary" data-padding="top"></section>"#
        );
    }

    #[test]
    fn link_button_needs_href() {
        assert!(link_button(&Link::default(), "Go").is_empty());
        let external = Link {
            title: None,
            href: Some("https://maps.google.com".to_string()),
            target: true,
            button_variant: Some("outline".to_string()),
        };
        assert_eq!(
            link_button(&external, "Read more reviews").as_str(),
            r#"<a href="https://maps.google.com" class="button" data-variant="outline" target="_blank" rel="noreferrer">Read more reviews</a>"#
        );
    }

    #[test]
    fn link_button_rejects_script_urls() {
        for href in [
            "javascript:alert(1)",
            " JavaScript:alert(1)",
            "java\tscript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "vbscript:msgbox(1)",
        ] {
            let link = Link {
                href: Some(href.to_string()),
                ..Link::default()
            };
            assert!(link_button(&link, "Go").is_empty(), "{href}");
        }
    }

    #[test]
    fn safe_href_keeps_site_and_contact_links() {
        for href in [
            "/menu",
            "/#visit",
            "#visit",
            "menu?day=sat",
            "//cdn.example.com/menu.pdf",
            "https://maps.google.com",
            "http://example.com",
            "mailto:hello@example.com",
            "tel:+441234567890",
        ] {
            assert_eq!(safe_href(href), Some(href), "{href}");
        }
        assert_eq!(safe_href("   "), None);
        assert_eq!(safe_href("ftp://example.com/menu.pdf"), None);
    }

    #[test]
    fn portable_text_maps_styles() {
        let body = vec![
            PortableTextBlock {
                kind: Some("block".to_string()),
                style: Some("h3".to_string()),
                children: vec![PortableTextSpan {
                    text: Some("Opening hours".to_string()),
                }],
            },
            PortableTextBlock::default(),
            PortableTextBlock {
                kind: Some("block".to_string()),
                style: None,
                children: vec![PortableTextSpan {
                    text: Some("Daily 8-4".to_string()),
                }],
            },
        ];
        assert_eq!(
            portable_text(&body).as_str(),
            "<h3>Opening hours</h3><p>Daily 8-4</p>"
        );
    }

    #[test]
    fn image_includes_dimensions_when_known() {
        let img = Image {
            asset: Some(ImageAsset {
                url: Some("https://cdn.sanity.io/a.jpg".to_string()),
                metadata: Some(ImageMetadata {
                    lqip: None,
                    dimensions: Some(Dimensions {
                        width: 1600.0,
                        height: 900.4,
                    }),
                }),
                ..ImageAsset::default()
            }),
            alt: None,
        };
        assert_eq!(
            image(&img, "Cafe").as_str(),
            r#"<img src="https://cdn.sanity.io/a.jpg" alt="Cafe" width="1600" height="900" loading="lazy">"#
        );
        assert!(image(&Image::default(), "Cafe").is_empty());
    }
}
