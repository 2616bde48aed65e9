//! XML data model
//!
//! Trees are built once (by the parser or the fluent constructors) and
//! read-only afterwards; transforms produce new trees instead of editing
//! in place.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// XML document with a document-scoped namespace table
///
/// The table maps prefix to URI; the default namespace is stored under
/// the empty-string key. First binding per prefix wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub root: Element,
    pub namespaces: IndexMap<String, String>,
}

impl Document {
    /// Create a document around a root element, with no namespace bindings
    pub fn new(root: Element) -> Self {
        Self {
            root,
            namespaces: IndexMap::new(),
        }
    }

    /// Look up the namespace URI bound to a prefix
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    /// Resolve an element or attribute name against the namespace table
    ///
    /// Returns the (URI, local name) pair; the URI is empty when the name
    /// carries no prefix and no default namespace is declared.
    pub fn resolve<'a>(&'a self, name: &'a str) -> (&'a str, &'a str) {
        let (prefix, local) = split_name(name);
        let uri = self.namespace_uri(prefix).unwrap_or_default();
        (uri, local)
    }
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Content {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, builder style
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a child element, builder style
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Add a text child, builder style
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Prefix part of the name, empty if none
    pub fn prefix(&self) -> &str {
        split_name(&self.name).0
    }

    /// Local part of the name
    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }

    /// Direct element children
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Direct element children with the given name
    pub fn children_named<'a, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a Element> + 'b
    where
        'a: 'b,
    {
        self.elements().filter(move |e| e.name == name)
    }

    /// First direct element child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct comment children
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|c| match c {
            Content::Comment(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Flattened text value: all descendant text, document order, no
    /// separators. Comments contribute nothing.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Content::Element(e) => e.collect_text(out),
                Content::Text(t) => out.push_str(t),
                Content::Comment(_) => {}
            }
        }
    }
}

/// Split a qualified name into (prefix, local), prefix empty if absent
pub fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    }
}
