#![forbid(unsafe_code)]

//! Host-independent element trees.
//!
//! An [`Element`] is an owned description of one DOM element: tag, class
//! list, inline style properties, attributes, and children. The builder
//! produces these; a [`GardenContainer`](crate::GardenContainer) decides how
//! to materialize them.

use std::fmt::Write as _;

/// One element in a built garden tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            style: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty `<div>`.
    #[must_use]
    pub const fn div() -> Self {
        Self::new("div")
    }

    /// Builder: add every whitespace-separated class in `classes`.
    #[must_use]
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Builder: set an inline style property (e.g. a CSS custom property).
    #[must_use]
    pub fn with_style(mut self, name: &str, value: &str) -> Self {
        self.set_style(name, value);
        self
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an inline style property, replacing any previous value.
    pub fn set_style(&mut self, name: &str, value: &str) {
        match self.style.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.style.push((name.to_string(), value.to_string())),
        }
    }

    /// Append a child.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space-joined class list, as assigned to `className`.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn style(&self) -> &[(String, String)] {
        &self.style
    }

    #[must_use]
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Number of elements in this subtree (self included) carrying `class`.
    #[must_use]
    pub fn count_class(&self, class: &str) -> usize {
        usize::from(self.has_class(class))
            + self
                .children
                .iter()
                .map(|child| child.count_class(class))
                .sum::<usize>()
    }

    /// First element in this subtree (pre-order, self included) carrying `class`.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_class(class))
    }

    /// Remove every descendant carrying `class`, at any depth, returning how
    /// many were removed. Removed elements take their subtrees with them.
    pub fn remove_descendants_with_class(&mut self, class: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !child.has_class(class));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_descendants_with_class(class);
        }
        removed
    }

    /// Serialize the subtree as compact HTML.
    ///
    /// Output is deterministic: classes, style properties, and attributes are
    /// emitted in insertion order.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&self.class_name()));
        }
        if !self.style.is_empty() {
            let mut css = String::new();
            for (name, value) in &self.style {
                let _ = write!(css, "{name}: {value};");
            }
            let _ = write!(out, " style=\"{}\"", escape_attr(&css));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
