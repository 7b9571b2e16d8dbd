//! treeline - XML to JSON tree conversion and JSONL line validation
//!
//! # Quick Start
//!
//! Convert an XML document into its JSON shape:
//!
//! ```
//! use treeline::xml_to_json;
//! # fn main() -> Result<(), treeline::Error> {
//! let json = xml_to_json("<root><name>test</name></root>")?;
//! assert_eq!(json, r#"{"root":{"name":"test"}}"#);
//! # Ok(())
//! # }
//! ```
//!
//! Validate newline-delimited JSON line by line:
//!
//! ```
//! use treeline::validate_jsonl;
//! let report = validate_jsonl("{\"a\":1}\n{\"b\":2}");
//! assert!(report.is_valid());
//! assert_eq!(report.valid_lines, 2);
//! ```

#![forbid(unsafe_code)]

use tracing::debug;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::{Token, TokenKind};

pub mod value;
pub use value::{Array, Object, Value};

pub mod json;
pub use json::{Config, Event, Parser};

pub mod xml;
pub use xml::{
    Content as XmlContent, Document as XmlDocument, Element as XmlElement, Parser as XmlParser,
};

pub mod convert;
pub use convert::{to_json, to_json_pretty, xml_to_value};

pub mod jsonl;
pub use jsonl::{LineError, Record, Report};

/// Parse one JSON document from a string
pub fn from_str(s: &str) -> Result<Value> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse_document()
}

/// Parse one JSON document with custom configuration
pub fn from_str_with_config(s: &str, config: Config) -> Result<Value> {
    let mut parser = Parser::with_config(s.as_bytes(), config);
    parser.parse_document()
}

/// Parse XML from a string into the raw document model
pub fn from_xml_str(s: &str) -> Result<XmlDocument> {
    convert::parse_xml(s)
}

/// Convert XML text to compact JSON text
pub fn xml_to_json(s: &str) -> Result<String> {
    debug!("converting {} bytes of xml", s.len());
    let value = convert::xml_to_value(s)?;
    Ok(convert::to_json(&value))
}

/// Convert XML text to JSON text indented with two spaces
pub fn xml_to_json_pretty(s: &str) -> Result<String> {
    debug!("converting {} bytes of xml", s.len());
    let value = convert::xml_to_value(s)?;
    Ok(convert::to_json_pretty(&value))
}

/// Validate JSONL input line by line
///
/// Never fails; every problem is reported in the returned [`Report`].
pub fn validate_jsonl(s: &str) -> Report {
    let report = jsonl::validate(s);
    debug!(
        "validated jsonl input: {} lines, {} valid, {} invalid",
        report.total_lines, report.valid_lines, report.invalid_lines
    );
    report
}

/// Convenience re-exports
pub use json::{Config as JsonConfig, Parser as JsonParser};
pub use lexer::json::JsonLexer;
