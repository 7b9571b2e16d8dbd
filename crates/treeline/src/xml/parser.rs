//! XML well-formedness parser
//!
//! Parses one document into the [`model`](crate::xml::model) tree. The XML
//! declaration, DOCTYPE, comments, and processing instructions are consumed
//! and discarded; CDATA sections become text children with no entity
//! decoding. Whitespace-only character data between tags is dropped here so
//! downstream shaping never sees indentation runs.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::Cursor;
use crate::xml::model::{Content, Document, Element};

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new XML parser
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse an XML document
    pub fn parse(&mut self) -> Result<Document> {
        self.skip_misc()?;
        let root = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error_here("unexpected content after document root"));
        }

        Ok(Document { root })
    }

    /// Skip whitespace, the XML declaration, DOCTYPE, comments, and
    /// processing instructions (everything allowed around the root element)
    fn skip_misc(&mut self) -> Result<()> {
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
                Some(b'!') if self.peek_starts_with(b"<!--") => {
                    self.cursor.advance_by(4);
                    self.skip_until(b"-->")?;
                }
                Some(b'!') => {
                    // DOCTYPE and other declarations
                    self.cursor.advance_by(2);
                    self.skip_until(b">")?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'/') {
            return Err(self.error_here("unexpected closing tag"));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

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
        let children = self.parse_children(&name)?;

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    /// Parse element content up to and including the matching closing tag
    fn parse_children(&mut self, name: &str) -> Result<Vec<Content>> {
        let mut children = Vec::new();

        loop {
            match self.cursor.current() {
                None => return Err(self.error_here("unterminated element")),
                Some(b'<') => match self.cursor.peek(1) {
                    Some(b'/') => {
                        self.cursor.advance_by(2);
                        let close_name = self.parse_name()?;
                        if close_name != name {
                            return Err(self.error_here(&format!(
                                "mismatched closing tag: expected </{name}>, found </{close_name}>"
                            )));
                        }
                        self.cursor.skip_whitespace();
                        self.expect_byte(b'>')?;
                        return Ok(children);
                    }
                    Some(b'!') if self.peek_starts_with(b"<!--") => {
                        self.cursor.advance_by(4);
                        self.skip_until(b"-->")?;
                    }
                    Some(b'!') if self.peek_starts_with(b"<![CDATA[") => {
                        self.cursor.advance_by(9);
                        let text = self.take_until(b"]]>")?;
                        children.push(Content::Text(text));
                    }
                    Some(b'!') => {
                        return Err(self.error_here("unexpected markup declaration"));
                    }
                    Some(b'?') => {
                        self.cursor.advance_by(2);
                        self.skip_until(b"?>")?;
                    }
                    _ => {
                        let child = self.parse_element()?;
                        children.push(Content::Element(child));
                    }
                },
                Some(_) => {
                    if let Some(text) = self.parse_text()? {
                        children.push(Content::Text(text));
                    }
                }
            }
        }
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unterminated start tag")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                let pos = self.cursor.position();
                return Err(Error::at(
                    ErrorKind::DuplicateAttribute { name },
                    pos.offset,
                    pos.line,
                    pos.col,
                ));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b @ (b'"' | b'\'')) => b,
            _ => return Err(self.error_here("expected quoted attribute value")),
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

        Err(self.error_here("unterminated attribute value"))
    }

    /// Parse a character data run, dropping it when whitespace-only
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
            return Err(self.error_here("expected name"));
        };
        if !is_name_start(first) {
            return Err(self.error_here("expected name"));
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

    fn peek_starts_with(&self, pattern: &[u8]) -> bool {
        self.cursor.peek_bytes(pattern.len()) == Some(pattern)
    }

    /// Consume input up to and including `pattern`
    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.peek_starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    /// Consume input up to and including `pattern`, returning what came before
    fn take_until(&mut self, pattern: &[u8]) -> Result<String> {
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.peek_starts_with(pattern) {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(pattern.len());
                return bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.error_here(&format!("expected '{}'", char::from(expected))))
        }
    }

    fn error_here(&self, message: &str) -> Error {
        let pos = self.cursor.position();
        Error::with_message(
            ErrorKind::InvalidToken,
            Span::new(pos, pos),
            message.to_string(),
        )
    }
}

fn bytes_to_string(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(|s| s.to_string())
        .map_err(|_| {
            Error::with_message(
                ErrorKind::InvalidToken,
                Span::empty(),
                "invalid utf-8".to_string(),
            )
        })
}

// ASCII name rules, with bytes above 0x7F passed through so multi-byte
// UTF-8 tag and attribute names survive intact.
fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = input.chars().peekable();
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

        let decoded = if terminated {
            match entity.as_str() {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric_entity(&entity),
            }
        } else {
            None
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                return Err(Error::with_message(
                    ErrorKind::InvalidToken,
                    Span::empty(),
                    format!("invalid entity: &{entity}"),
                ));
            }
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
