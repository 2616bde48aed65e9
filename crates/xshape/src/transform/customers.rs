//! Customer document transforms: CSV import, contact renaming, sorting

use crate::csv;
use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::Element;
use crate::xml::{writer, Parser};

const CUSTOMER_FIELDS: usize = 10;

/// Build a customer document from a flat CSV token stream
///
/// Fields are split on `,` and `\n` and chunked into records of ten; a
/// short final record is an error. Field positions: CustomerID,
/// CompanyName, ContactName, ContactTitle, Phone, then the five
/// FullAddress parts (Address, City, Region, PostalCode, Country).
pub fn customers_from_csv(input: &str) -> Result<String> {
    let fields = csv::fields(input);
    let records = csv::records(&fields, CUSTOMER_FIELDS)?;

    let mut root = Element::new("Root");
    for record in records {
        root = root.with_child(customer_node(record));
    }

    Ok(writer::element_to_string(&root))
}

fn customer_node(record: &[String]) -> Element {
    // records() guarantees exactly ten fields
    let field = |i: usize| record.get(i).cloned().unwrap_or_default();

    Element::new("Customer")
        .with_attr("CustomerID", field(0))
        .with_child(Element::new("CompanyName").with_text(field(1)))
        .with_child(Element::new("ContactName").with_text(field(2)))
        .with_child(Element::new("ContactTitle").with_text(field(3)))
        .with_child(Element::new("Phone").with_text(field(4)))
        .with_child(
            Element::new("FullAddress")
                .with_child(Element::new("Address").with_text(field(5)))
                .with_child(Element::new("City").with_text(field(6)))
                .with_child(Element::new("Region").with_text(field(7)))
                .with_child(Element::new("PostalCode").with_text(field(8)))
                .with_child(Element::new("Country").with_text(field(9))),
        )
}

/// Replace every direct element child of the root with a `contact`
///
/// Each replacement keeps structural copies of the original's element
/// children; the original tag name, its attributes and its non-element
/// children are discarded. Applying the transform twice gives the same
/// result as applying it once.
pub fn replace_customers_with_contacts(xml: &str) -> Result<String> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut root = Element::new(doc.root.name.clone());
    root.attributes = doc.root.attributes.clone();
    for original in doc.root.elements() {
        let mut contact = Element::new("contact");
        for child in original.elements() {
            contact = contact.with_child(child.clone());
        }
        root = root.with_child(contact);
    }

    Ok(writer::element_to_string(&root))
}

/// Stable sort of the root's children by Country, then City
///
/// The comparison keys are the *serialized* `FullAddress/Country` and
/// `FullAddress/City` elements, markup included, not their text values:
/// two countries with equal text but different attributes compare
/// unequal. Callers depend on that key shape; do not switch to
/// text-value comparison.
pub fn sort_customers(xml: &str) -> Result<String> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut keyed: Vec<((String, String), Element)> = Vec::new();
    for customer in doc.root.elements() {
        let address = customer.child("FullAddress").ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingElement {
                name: "FullAddress".to_string(),
            })
        })?;
        let country = address.child("Country").ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingElement {
                name: "Country".to_string(),
            })
        })?;
        let city = address.child("City").ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingElement {
                name: "City".to_string(),
            })
        })?;
        let key = (
            writer::element_to_string(country),
            writer::element_to_string(city),
        );
        keyed.push((key, customer.clone()));
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut root = Element::new(doc.root.name.clone());
    root.attributes = doc.root.attributes.clone();
    for (_, customer) in keyed {
        root = root.with_child(customer);
    }

    Ok(writer::element_to_string(&root))
}
