//! Input navigation for the XML parser

pub mod cursor;

pub use cursor::Cursor;
