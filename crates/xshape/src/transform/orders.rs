//! Purchase-order filtering and order aggregation

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::{split_name, Document, Element};
use crate::xml::Parser;

/// Numbers of purchase orders shipping to NY, comma-joined
///
/// Elements and attributes are matched through the namespace bound to the
/// `aw` prefix; the state comparison is case-sensitive and exact. Zero
/// matches yield an empty string.
pub fn purchase_orders(xml: &str) -> Result<String> {
    let doc = Parser::new(xml.as_bytes()).parse()?;
    let uri = doc.namespace_uri("aw").ok_or_else(|| {
        Error::unspanned(ErrorKind::UnboundPrefix {
            prefix: "aw".to_string(),
        })
    })?;

    let mut numbers = Vec::new();
    for order in doc.root.elements() {
        if doc.resolve(&order.name) != (uri, "PurchaseOrder") {
            continue;
        }
        let address = qualified_child(&doc, order, uri, "Address")?;
        let state = qualified_child(&doc, address, uri, "State")?;
        if state.text() != "NY" {
            continue;
        }
        numbers.push(qualified_attr(&doc, order, uri, "PurchaseOrderNumber")?.to_string());
    }

    Ok(numbers.join(","))
}

fn qualified_child<'a>(
    doc: &Document,
    parent: &'a Element,
    uri: &str,
    local: &str,
) -> Result<&'a Element> {
    parent
        .elements()
        .find(|e| doc.resolve(&e.name) == (uri, local))
        .ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingElement {
                name: local.to_string(),
            })
        })
}

/// Namespace-qualified attribute lookup
///
/// Unlike elements, an unprefixed attribute is in no namespace, so only
/// prefixed attributes can match a non-empty URI.
fn qualified_attr<'a>(
    doc: &Document,
    element: &'a Element,
    uri: &str,
    local: &str,
) -> Result<&'a str> {
    element
        .attributes
        .iter()
        .find(|(name, _)| {
            let (prefix, attr_local) = split_name(name);
            attr_local == local
                && if prefix.is_empty() {
                    uri.is_empty()
                } else {
                    doc.namespace_uri(prefix) == Some(uri)
                }
        })
        .map(|(_, value)| value.as_str())
        .ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingAttribute {
                name: local.to_string(),
            })
        })
}

/// Total order value: sum of occurrence count times unit value per product
///
/// Product occurrences are counted under root -> `Orders` -> `Order` ->
/// `product`; unit values come from the `products` children's `Id`/`Value`
/// attributes.
pub fn orders_value(xml: &str) -> Result<i32> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut counts: IndexMap<String, i32> = IndexMap::new();
    for orders in doc.root.children_named("Orders") {
        for order in orders.children_named("Order") {
            for product in order.children_named("product") {
                *counts.entry(product.text()).or_insert(0) += 1;
            }
        }
    }

    let mut total = 0i32;
    for (id, count) in &counts {
        let entry = doc
            .root
            .children_named("products")
            .flat_map(Element::elements)
            .find(|e| e.attr("Id") == Some(id.as_str()))
            .ok_or_else(|| {
                Error::unspanned(ErrorKind::MissingElement {
                    name: format!("products entry with Id {id}"),
                })
            })?;
        let value = entry.attr("Value").ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingAttribute {
                name: "Value".to_string(),
            })
        })?;
        let value: i32 = value.parse().map_err(|_| {
            Error::unspanned(ErrorKind::InvalidNumber {
                value: value.to_string(),
            })
        })?;
        total += value * count;
    }

    Ok(total)
}
