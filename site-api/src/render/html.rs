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

//! Minimal HTML building with escaping.

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// A fragment of HTML that is safe to embed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap already-trusted HTML without escaping it.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape `text` for use as element content.
    pub fn text(text: &str) -> Self {
        Self(encode_text(text).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        Self(iter.into_iter().map(|m| m.0).collect())
    }
}

/// Builder for a single element.
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Markup>,
    void: bool,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// An element without content or closing tag (`img`, `meta`, `input`...).
    pub fn void(name: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(name)
        }
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, Some(value.to_string())));
        self
    }

    pub fn attr_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute such as `hidden` or `required`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, markup: Markup) -> Self {
        self.children.push(markup);
        self
    }

    pub fn children(mut self, markup: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(markup);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.child(Markup::text(text))
    }

    pub fn build(self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&encode_double_quoted_attribute(value));
                out.push('"');
            }
        }
        out.push('>');
        if self.void {
            return Markup(out);
        }
        for child in &self.children {
            out.push_str(child.as_str());
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
        Markup(out)
    }
}

/// `<name>text</name>`, or nothing when `text` is absent or blank.
pub fn text_element(name: &'static str, text: Option<&str>) -> Markup {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => Element::new(name).text(text).build(),
        None => Markup::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let html = Element::new("a")
            .attr("href", "/menu?a=1&b=\"2\"")
            .text("Fish & <chips>")
            .build();
        assert_eq!(
            html.as_str(),
            r#"<a href="/menu?a=1&amp;b=&quot;2&quot;">Fish &amp; &lt;chips&gt;</a>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = Element::void("img")
            .attr("src", "/a.png")
            .attr_opt("alt", None)
            .flag("loading")
            .build();
        assert_eq!(html.as_str(), r#"<img src="/a.png" loading>"#);
    }

    #[test]
    fn text_element_skips_blank_text() {
        assert!(text_element("h2", Some("   ")).is_empty());
        assert!(text_element("h2", None).is_empty());
        assert_eq!(text_element("h2", Some(" Menu ")).as_str(), "<h2>Menu</h2>");
    }

    #[test]
    fn markup_collects_in_order() {
        let joined: Markup = ["<p>1</p>", "<p>2</p>"].into_iter().map(Markup::raw).collect();
        assert_eq!(joined.as_str(), "<p>1</p><p>2</p>");
    }
}
