//! Element descriptors produced by the render controller.

use crate::attributes::AttributeMap;
use std::fmt;

/// Elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &["img", "source", "track", "br", "hr", "input", "meta", "link"];

/// A rendered element: tag, ordered attributes, children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag_name: String,
    pub attributes: AttributeMap,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: AttributeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(tag_name: &str, attributes: AttributeMap) -> Self {
        Self {
            attributes,
            ..Self::new(tag_name)
        }
    }

    pub fn img(attributes: AttributeMap) -> Self {
        Self::with_attributes("img", attributes)
    }

    pub fn video(attributes: AttributeMap) -> Self {
        Self::with_attributes("video", attributes)
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Value of the `src` attribute.
    pub fn src(&self) -> Option<&str> {
        self.get_attribute("src")
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag_name.as_str())
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        self.serialize(&mut output);
        output
    }

    fn serialize(&self, output: &mut String) {
        output.push('<');
        output.push_str(&self.tag_name);

        for (name, value) in self.attributes.iter() {
            output.push(' ');
            output.push_str(name);
            if !value.is_empty() {
                output.push_str("=\"");
                output.push_str(&escape_html_attribute(value));
                output.push('"');
            }
        }

        output.push('>');

        if self.is_void() {
            return;
        }

        for child in &self.children {
            child.serialize(output);
        }

        output.push_str("</");
        output.push_str(&self.tag_name);
        output.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Escape HTML attribute value.
pub fn escape_html_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
