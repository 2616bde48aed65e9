//! xshape - XML document query and transform library
//!
//! Eight independent, stateless operations over small in-memory XML
//! trees: category grouping, namespace-aware purchase-order filtering,
//! CSV-to-XML customer import, text concatenation and flattening,
//! contact renaming, channel selection, stable customer sorting and
//! order-value aggregation. Each call parses its own input and returns a
//! fresh result; nothing is shared between calls.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), xshape::Error> {
//! let doc = "<Root>\
//!     <Orders><Order><product>A</product><product>A</product></Order>\
//!     <Order><product>B</product></Order></Orders>\
//!     <products><product Id=\"A\" Value=\"3\"/><product Id=\"B\" Value=\"5\"/></products>\
//!     </Root>";
//! assert_eq!(xshape::orders_value(doc)?, 11);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::Cursor;

pub mod xml;
pub use xml::{Content, Document, Element, Parser};

pub mod csv;

pub mod transform;
pub use transform::{
    channel_ids, concatenation_string, create_hierarchy, customers_from_csv, flatten_string,
    orders_value, purchase_orders, replace_customers_with_contacts, sort_customers, ChannelIds,
};

/// Parse an XML document from a string
pub fn parse_document(s: &str) -> Result<Document> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse()
}

/// Parse an XML document from bytes
pub fn parse_document_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}
