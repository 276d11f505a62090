//! # Virtual Nodes
//!
//! A small element tree that render functions return instead of touching a
//! live document. The page script (or a test) decides what to do with it:
//! diff it, serialize it with [`Node::to_html`], or walk it.
//!
//! Text and attribute values are escaped on serialization, so product names
//! coming from the server cannot inject markup.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Every element in this subtree (document order) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if el.has_class(class) {
                found.push(el);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let Node::Element(el) = self {
            visit(el);
            for child in &el.children {
                child.walk(visit);
            }
        }
    }

    /// Serializes the subtree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text { text } => escape_into(out, text, false),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with attributes, classes, inline style and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    /// Inline style declarations in insertion order.
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Sets a style property, replacing an earlier value for it.
    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value,
            None => self.style.push((property.to_string(), value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);

        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            escape_into(out, &self.classes.join(" "), true);
            out.push('"');
        }

        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"");
            escape_into(out, value, true);
            out.push('"');
        }

        if !self.style.is_empty() {
            let css = self
                .style
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(" style=\"");
            escape_into(out, &css, true);
            out.push('"');
        }

        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape_into(out: &mut String, raw: &str, attribute: bool) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_serialization() {
        let node: Node = Element::new("div")
            .class("cart-item")
            .attr("data-position", "0")
            .style("opacity", "1")
            .child(Element::new("img").attr("src", "a.png"))
            .text("Croissant")
            .into();

        assert_eq!(
            node.to_html(),
            r#"<div class="cart-item" data-position="0" style="opacity: 1"><img src="a.png">Croissant</div>"#
        );
    }

    #[test]
    fn test_escaping() {
        let node: Node = Element::new("p")
            .attr("alt", r#"x" onerror="y"#)
            .text("<script>&")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<p alt="x&quot; onerror=&quot;y">&lt;script&gt;&amp;</p>"#
        );
    }

    #[test]
    fn test_set_style_replaces() {
        let mut el = Element::new("div").style("opacity", "0");
        el.set_style("opacity", "1");
        assert_eq!(el.style.len(), 1);
        assert_eq!(el.get_style("opacity"), Some("1"));
    }

    #[test]
    fn test_find_and_text() {
        let node: Node = Element::new("div")
            .child(Element::new("span").class("a").text("one "))
            .child(Element::new("div").child(Element::new("span").class("a").text("two")))
            .into();

        assert_eq!(node.find_by_class("a").len(), 2);
        assert_eq!(node.text_content(), "one two");
    }
}
