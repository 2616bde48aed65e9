//! XML document model, parser and serializer

pub mod model;
pub mod parser;
pub mod writer;

pub use model::{Content, Document, Element};
pub use parser::Parser;
pub use writer::{document_to_string, element_to_string};
