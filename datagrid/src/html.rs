//! Minimal HTML element templates used for captions and cell prototypes.

use std::fmt;

/// An HTML element template: optional tag, ordered attributes and text.
///
/// An element without a tag renders only its text, which makes
/// `HtmlElement::empty()` a neutral prototype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlElement {
    tag: Option<String>,
    attrs: Vec<(String, String)>,
    text: String,
}

impl HtmlElement {
    /// Creates an element with the given tag.
    pub fn el(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    /// Creates a tagless element.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping its position if already present.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Appends `class` to the `class` attribute.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        let merged = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", merged)
    }

    /// Sets the text content.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Builder form of [`HtmlElement::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`HtmlElement::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The `title` attribute, when present and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.attr("title").filter(|t| !t.is_empty())
    }

    /// Returns a copy with the `title` attribute replaced.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        self.clone().with_attr("title", title)
    }

    /// Renders the element with escaped attribute values and text.
    pub fn render(&self) -> String {
        let text = escape(&self.text);
        let Some(tag) = &self.tag else {
            return text;
        };
        let mut out = format!("<{}", tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        out.push('>');
        out.push_str(&text);
        out.push_str(&format!("</{}>", tag));
        out
    }
}

impl fmt::Display for HtmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// A column caption: plain text or a rich element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    Text(String),
    Html(HtmlElement),
}

impl Caption {
    /// Plain text of the caption (the element's text for rich captions).
    pub fn as_text(&self) -> &str {
        match self {
            Caption::Text(text) => text,
            Caption::Html(el) => el.text(),
        }
    }
}

impl From<&str> for Caption {
    fn from(text: &str) -> Self {
        Caption::Text(text.to_string())
    }
}

impl From<String> for Caption {
    fn from(text: String) -> Self {
        Caption::Text(text)
    }
}

impl From<HtmlElement> for Caption {
    fn from(el: HtmlElement) -> Self {
        Caption::Html(el)
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caption::Text(text) => f.write_str(text),
            Caption::Html(el) => write!(f, "{}", el),
        }
    }
}
