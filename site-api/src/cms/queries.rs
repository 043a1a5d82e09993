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

//! GROQ queries issued against the content lake.

const IMAGE: &str = r#"..., asset->{ _id, url, mimeType, metadata { lqip, dimensions { width, height } } }"#;

const FILE: &str = r#"..., asset->{ _id, url, mimeType }"#;

const LINK: &str = r##"...,
  "href": select(
    isExternal => href,
    defined(anchor) && !defined(internalLink) => "#" + anchor,
    defined(href) && !defined(internalLink) => href,
    defined(anchor) && @.internalLink->slug.current == "index" => "/#" + anchor,
    defined(anchor) && @.internalLink->_type == "post" => "/blog/" + @.internalLink->slug.current + "#" + anchor,
    defined(anchor) && defined(@.internalLink->slug.current) => "/" + @.internalLink->slug.current + "#" + anchor,
    @.internalLink->slug.current == "index" => "/",
    @.internalLink->_type == "post" => "/blog/" + @.internalLink->slug.current,
    "/" + @.internalLink->slug.current
  )"##;

/// Page document by `$slug`, with assets and links resolved.
pub fn page_query() -> String {
    format!(
        r#"*[_type == "page" && slug.current == $slug][0]{{
  meta_title,
  meta_description,
  noindex,
  blocks[]{{
    ...,
    image{{ {IMAGE} }},
    images[]{{ {IMAGE} }},
    menuImages[]{{ {IMAGE} }},
    animation{{ {FILE} }},
    animationDark{{ {FILE} }},
    links[]{{ {LINK} }},
    cta{{ {LINK} }},
    columns[]{{ ..., image{{ {IMAGE} }}, link{{ {LINK} }} }},
    splitColumns[]{{ ..., image{{ {IMAGE} }}, link{{ {LINK} }} }},
    testimonial[]->{{ ..., image{{ {IMAGE} }} }},
    faqs[]->{{ _id, title, body }},
    categories[]{{ ..., items[]{{ ..., itemImage{{ {IMAGE} }} }} }}
  }}
}}"#
    )
}

/// Published posts, newest first.
pub const POSTS_QUERY: &str = r#"*[_type == "post" && defined(slug)] | order(_createdAt desc){
  title,
  "slug": slug.current,
  excerpt,
  _createdAt
}"#;
