//! XML parser implementation

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::Cursor;
use crate::xml::model::{Content, Document, Element};

/// XML parser
///
/// Namespace declarations (`xmlns`, `xmlns:prefix`) are collected into a
/// document-scoped side table while parsing; the declarations stay in the
/// attribute map as well so serialization round-trips them.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    namespaces: IndexMap<String, String>,
}

impl<'a> Parser<'a> {
    /// Create a new XML parser
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            namespaces: IndexMap::new(),
        }
    }

    /// Parse an XML document
    pub fn parse(&mut self) -> Result<Document> {
        self.skip_prolog()?;
        let root = self.parse_element()?;
        self.skip_epilog()?;

        Ok(Document {
            root,
            namespaces: std::mem::take(&mut self.namespaces),
        })
    }

    fn skip_prolog(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() != Some(b'<') {
                return Ok(());
            }
            match self.cursor.peek(1) {
                Some(b'?') => {
                    self.cursor.advance_by(2);
                    self.skip_until(b"?>")?;
                }
                Some(b'!') if self.cursor.peek_bytes(4) == Some(b"<!--") => {
                    self.cursor.advance_by(4);
                    self.skip_until(b"-->")?;
                }
                Some(b'!') => {
                    self.cursor.advance_by(2);
                    self.skip_until(b">")?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_epilog(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Ok(());
            }
            if self.cursor.peek_bytes(4) == Some(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
                continue;
            }
            if self.cursor.peek_bytes(2) == Some(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
                continue;
            }
            return Err(self.error_here(ErrorKind::InvalidToken));
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'/') {
            return Err(self.error_here(ErrorKind::InvalidToken));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;
        self.record_namespaces(&attributes);

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'/') {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here(ErrorKind::MismatchedTag {
                        open: name,
                        close: close_name,
                    }));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.peek_bytes(4) == Some(b"<!--") {
                let comment = self.parse_comment()?;
                children.push(Content::Comment(comment));
                continue;
            }

            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'!') {
                // CDATA section or doctype-like markup, skipped
                self.cursor.advance_by(2);
                self.skip_declaration()?;
                continue;
            }

            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'?') {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                let child = self.parse_element()?;
                children.push(Content::Element(child));
                continue;
            }

            if self.cursor.is_eof() {
                return Err(self.error_here(ErrorKind::UnterminatedMarkup));
            }

            if let Some(text) = self.parse_text()? {
                children.push(Content::Text(text));
            }
        }

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_comment(&mut self) -> Result<String> {
        // cursor at "<!--"
        self.cursor.advance_by(4);
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(3) == Some(b"-->") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn record_namespaces(&mut self, attributes: &IndexMap<String, String>) {
        for (name, value) in attributes {
            let prefix = if name == "xmlns" {
                ""
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                prefix
            } else {
                continue;
            };
            // first binding per prefix wins
            if !self.namespaces.contains_key(prefix) {
                self.namespaces.insert(prefix.to_string(), value.clone());
            }
        }
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnterminatedMarkup)),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here(ErrorKind::DuplicateAttribute { name }));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => {
                return Err(self.error_here(ErrorKind::Expected {
                    expected: "quoted attribute value".to_string(),
                    found: describe_current(&self.cursor),
                }))
            }
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw)?;
                return decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = bytes_to_string(raw)?;
        let text = decode_entities(&text)?;

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(self.error_here(ErrorKind::Expected {
                expected: "name".to_string(),
                found: "end of input".to_string(),
            }));
        };
        if !is_name_start(first) {
            return Err(self.error_here(ErrorKind::InvalidToken));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        bytes_to_string(self.cursor.slice_from(start))
    }

    fn skip_declaration(&mut self) -> Result<()> {
        // cursor just past "<!"
        if self.cursor.peek_bytes(7) == Some(b"[CDATA[") {
            self.cursor.advance_by(7);
            return self.skip_until(b"]]>");
        }
        self.skip_until(b">")
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(pattern.len()) == Some(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.error_here(ErrorKind::Expected {
                expected: char::from(expected).to_string(),
                found: describe_current(&self.cursor),
            }))
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        let pos = self.cursor.position();
        Error::at(kind, pos.offset, pos.line, pos.col)
    }
}

fn describe_current(cursor: &Cursor<'_>) -> String {
    match cursor.current() {
        Some(b) if b.is_ascii_graphic() => char::from(b).to_string(),
        Some(b) => format!("byte 0x{b:02x}"),
        None => "end of input".to_string(),
    }
}

fn bytes_to_string(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(|s| s.to_string())
        .map_err(|_| Error::unspanned(ErrorKind::InvalidUtf8))
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        let mut entity = String::new();
        let mut terminated = false;
        for next in chars.by_ref() {
            if next == ';' {
                terminated = true;
                break;
            }
            entity.push(next);
        }
        if !terminated {
            return Err(Error::unspanned(ErrorKind::InvalidEntity));
        }

        let decoded = match entity.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(&entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(Error::unspanned(ErrorKind::InvalidEntity)),
        }
    }

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Result<Document> {
        Parser::new(input).parse()
    }

    fn ensure_eq<T: PartialEq + std::fmt::Debug>(left: T, right: T) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::with_message(
                ErrorKind::InvalidToken,
                crate::error::Span::empty(),
                format!("assertion failed: left={left:?} right={right:?}"),
            ))
        }
    }

    #[test]
    fn test_parse_simple_element() -> Result<()> {
        let doc = parse(b"<root></root>")?;
        ensure_eq(doc.root.name, "root".to_string())?;
        ensure_eq(doc.root.children.len(), 0)?;
        Ok(())
    }

    #[test]
    fn test_parse_with_attributes() -> Result<()> {
        let doc = parse(b"<root id=\"1\" name='test'></root>")?;
        ensure_eq(doc.root.attr("id"), Some("1"))?;
        ensure_eq(doc.root.attr("name"), Some("test"))?;
        Ok(())
    }

    #[test]
    fn test_parse_nested_text() -> Result<()> {
        let doc = parse(b"<root><child>text</child></root>")?;
        let child = doc.root.child("child");
        ensure_eq(child.map(|e| e.text()), Some("text".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_parse_self_closing() -> Result<()> {
        let doc = parse(b"<root><child /></root>")?;
        ensure_eq(doc.root.elements().count(), 1)?;
        ensure_eq(doc.root.child("child").map(|e| e.children.len()), Some(0))?;
        Ok(())
    }

    #[test]
    fn test_parse_comment_captured() -> Result<()> {
        let doc = parse(b"<root><channel><!--DELETE--></channel></root>")?;
        let channel = doc.root.child("channel");
        ensure_eq(
            channel.map(|e| e.comments().collect::<Vec<_>>()),
            Some(vec!["DELETE"]),
        )?;
        Ok(())
    }

    #[test]
    fn test_parse_namespace_table() -> Result<()> {
        let doc = parse(
            b"<aw:Root xmlns:aw=\"http://www.adventure-works.com\"><aw:Item/></aw:Root>",
        )?;
        ensure_eq(
            doc.namespace_uri("aw"),
            Some("http://www.adventure-works.com"),
        )?;
        // the declaration stays visible as an attribute
        ensure_eq(
            doc.root.attr("xmlns:aw"),
            Some("http://www.adventure-works.com"),
        )?;
        Ok(())
    }

    #[test]
    fn test_parse_prolog_and_doctype() -> Result<()> {
        let doc = parse(b"<?xml version=\"1.0\"?><!DOCTYPE root><!-- pre --><root/>")?;
        ensure_eq(doc.root.name, "root".to_string())?;
        Ok(())
    }

    #[test]
    fn test_parse_entities() -> Result<()> {
        let doc = parse(b"<root attr=\"a &amp; b\">1 &lt; 2 &#x41;</root>")?;
        ensure_eq(doc.root.attr("attr"), Some("a & b"))?;
        ensure_eq(doc.root.text(), "1 < 2 A".to_string())?;
        Ok(())
    }

    #[test]
    fn test_mismatched_tag_fails() {
        let result = parse(b"<root><a></b></root>");
        assert!(matches!(
            result.map_err(|e| e.kind().clone()),
            Err(ErrorKind::MismatchedTag { .. })
        ));
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(parse(b"<root/>junk").is_err());
    }

    #[test]
    fn test_duplicate_attribute_fails() {
        let result = parse(b"<root a=\"1\" a=\"2\"/>");
        assert!(matches!(
            result.map_err(|e| e.kind().clone()),
            Err(ErrorKind::DuplicateAttribute { .. })
        ));
    }
}
