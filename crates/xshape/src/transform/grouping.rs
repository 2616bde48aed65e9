//! Category grouping

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::Element;
use crate::xml::{writer, Parser};

/// Group the root's `Data` children by the text of their `Category` child
///
/// Groups appear in first-occurrence order of each category, members in
/// their original relative order. Each output `Data` keeps the original
/// `Quantity` and `Price` subtrees and drops `Category`.
pub fn create_hierarchy(xml: &str) -> Result<String> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut groups: IndexMap<String, Vec<Element>> = IndexMap::new();
    for data in doc.root.children_named("Data") {
        let category = data
            .child("Category")
            .ok_or_else(|| {
                Error::unspanned(ErrorKind::MissingElement {
                    name: "Category".to_string(),
                })
            })?
            .text();

        let mut member = Element::new("Data");
        if let Some(quantity) = data.child("Quantity") {
            member = member.with_child(quantity.clone());
        }
        if let Some(price) = data.child("Price") {
            member = member.with_child(price.clone());
        }
        groups.entry(category).or_default().push(member);
    }

    let mut root = Element::new("Root");
    for (category, members) in groups {
        let mut group = Element::new("Group").with_attr("ID", category);
        for member in members {
            group = group.with_child(member);
        }
        root = root.with_child(group);
    }

    Ok(writer::element_to_string(&root))
}
