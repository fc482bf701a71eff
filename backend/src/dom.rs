//! Minimal element tree handed to the browser host.
//!
//! Nodes only ever carry text, never markup: every string is escaped on
//! serialization, so record content cannot inject elements.

use candid::CandidType;
use serde::{Deserialize, Serialize};

const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds every whitespace separated class in `classes`.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Element children, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants, like `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&esc(t)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(&e.tag);
                if !e.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&esc(e.classes.join(" ")));
                    out.push('"');
                }
                for (name, value) in &e.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&esc(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&e.tag.as_str()) {
                    return;
                }
                e.children.iter().for_each(|c| c.write_html(out));
                out.push_str("</");
                out.push_str(&e.tag);
                out.push('>');
            }
        }
    }
}

fn esc<S: AsRef<str>>(s: S) -> String {
    let mut out = String::with_capacity(s.as_ref().len() + 8);
    for ch in s.as_ref().chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_html_should_escape_text_and_attributes() {
        let node: Node = Element::new("a")
            .class("btn primary-btn")
            .attr("href", "https://x.io/?a=1&b=\"2\"")
            .text("<b>bold</b>")
            .into();
        assert_eq!(
            node.to_html(),
            "<a class=\"btn primary-btn\" href=\"https://x.io/?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;bold&lt;/b&gt;</a>"
        );
    }

    #[test]
    fn void_element_should_not_close() {
        let node: Node = Element::new("br").into();
        assert_eq!(node.to_html(), "<br>");
    }

    #[test]
    fn text_content_should_concatenate_descendants() {
        let node: Node = Element::new("p")
            .child(Element::new("strong").text("Authors:"))
            .text(" Someone")
            .into();
        assert_eq!(node.text_content(), "Authors: Someone");
    }
}
