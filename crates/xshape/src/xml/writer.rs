//! Compact XML serialization
//!
//! Output shape: attributes in stored order, `<name/>` for childless
//! elements, five-entity escaping in text and attribute values, comments
//! emitted verbatim. `element_to_string` is also the comparison key for
//! the serialized-form customer sort, so its output must stay stable.

use crate::xml::model::{Content, Document, Element};

/// Serialize a document's root element
pub fn document_to_string(doc: &Document) -> String {
    element_to_string(&doc.root)
}

/// Serialize a single element subtree
pub fn element_to_string(element: &Element) -> String {
    let mut output = String::new();
    write_element(element, &mut output);
    output
}

fn write_element(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.name);

    for (key, value) in &element.attributes {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(&escape_xml(value));
        output.push('"');
    }

    if element.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    for child in &element.children {
        match child {
            Content::Element(child) => write_element(child, output),
            Content::Text(text) => output.push_str(&escape_xml(text)),
            Content::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
        }
    }
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
