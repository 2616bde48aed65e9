//! Text flattening and concatenation

use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::Element;
use crate::xml::Parser;

/// Concatenate the flattened text of each direct child of the root
///
/// Children contribute in document order with no separator. A root with
/// no element children is an `EmptyDocument` error: there is nothing to
/// aggregate.
pub fn concatenation_string(xml: &str) -> Result<String> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut parts = doc.root.elements().map(Element::text);
    let Some(first) = parts.next() else {
        return Err(Error::unspanned(ErrorKind::EmptyDocument));
    };

    Ok(parts.fold(first, |mut acc, part| {
        acc.push_str(&part);
        acc
    }))
}

/// Flattened text of an already-parsed node
///
/// All descendant text in document order, no separators, comments
/// excluded.
pub fn flatten_string(element: &Element) -> String {
    element.text()
}
