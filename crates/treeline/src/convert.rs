//! XML to JSON tree conversion
//!
//! Shapes a parsed XML document into a [`Value`] tree: attributes collect
//! under `@attributes`, character data under `#text`, and repeated sibling
//! tags collapse into arrays. An element whose only content is a single
//! text run (and which carries no attributes) becomes a bare string, and an
//! element with no content at all becomes `null`.

use crate::error::{Error, ErrorKind, Result};
use crate::value::{Object, Value};
use crate::xml::model::{Content, Document, Element};
use crate::xml::parser::Parser as XmlParser;

/// Parse XML text into the raw document model
///
/// Every well-formedness problem surfaces as a single fatal error of kind
/// [`ErrorKind::InvalidXml`] whose message starts with `"Invalid XML"`.
pub fn parse_xml(input: &str) -> Result<Document> {
    let mut parser = XmlParser::new(input.as_bytes());
    parser.parse().map_err(|err| {
        Error::with_message(
            ErrorKind::InvalidXml,
            err.span(),
            format!("Invalid XML: {}", err.message()),
        )
    })
}

/// Convert XML text into its JSON value shape
///
/// The result is always an object with one key, the root tag name.
pub fn xml_to_value(input: &str) -> Result<Value> {
    let doc = parse_xml(input)?;
    let mut root = Object::new();
    root.insert(doc.root.name.clone(), element_to_value(&doc.root));
    Ok(Value::Object(root))
}

fn element_to_value(element: &Element) -> Value {
    let mut obj = Object::new();

    if !element.attributes.is_empty() {
        let mut attrs = Object::new();
        for (key, value) in element.attributes.iter() {
            attrs.insert(key.clone(), value.clone());
        }
        obj.insert("@attributes", Value::Object(attrs));
    }

    let mut text = String::new();
    let mut text_runs = 0usize;
    for child in &element.children {
        if let Content::Text(run) = child {
            let trimmed = run.trim();
            if !trimmed.is_empty() {
                text.push_str(trimmed);
                text_runs += 1;
            }
        }
    }

    let has_element_children = element
        .children
        .iter()
        .any(|child| matches!(child, Content::Element(_)));

    if text_runs == 1 && !has_element_children && element.attributes.is_empty() {
        return Value::String(text);
    }

    if !text.is_empty() {
        obj.insert("#text", Value::String(text));
    }

    for child in &element.children {
        if let Content::Element(child) = child {
            let value = element_to_value(child);
            match obj.get_mut(&child.name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = std::mem::take(existing);
                    *existing = Value::Array(vec![first, value].into());
                }
                None => {
                    obj.insert(child.name.clone(), value);
                }
            }
        }
    }

    if obj.is_empty() {
        Value::Null
    } else {
        Value::Object(obj)
    }
}

/// Serialize a value as compact JSON text
pub fn to_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_finite() {
                n.to_string()
            } else {
                "null".to_string()
            }
        }
        Value::String(s) => format!("\"{}\"", escape_json(s)),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(obj) => {
            let pairs: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_json(k), to_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Serialize a value as JSON text indented with two spaces
pub fn to_json_pretty(value: &Value) -> String {
    format_pretty(value, 0)
}

fn format_pretty(value: &Value, indent: usize) -> String {
    match value {
        Value::Array(arr) => {
            if arr.is_empty() {
                return "[]".to_string();
            }
            let pad = "  ".repeat(indent);
            let inner = "  ".repeat(indent + 1);
            let items: Vec<String> = arr
                .iter()
                .map(|v| format!("{inner}{}", format_pretty(v, indent + 1)))
                .collect();
            format!("[\n{}\n{pad}]", items.join(",\n"))
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                return "{}".to_string();
            }
            let pad = "  ".repeat(indent);
            let inner = "  ".repeat(indent + 1);
            let pairs: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{inner}\"{}\": {}",
                        escape_json(k),
                        format_pretty(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{pad}}}", pairs.join(",\n"))
        }
        _ => to_json(value),
    }
}

fn escape_json(input: &str) -> String {
    input
        .chars()
        .flat_map(|ch| match ch {
            '\\' => "\\\\".chars().collect::<Vec<_>>(),
            '"' => "\\\"".chars().collect::<Vec<_>>(),
            '\n' => "\\n".chars().collect::<Vec<_>>(),
            '\r' => "\\r".chars().collect::<Vec<_>>(),
            '\t' => "\\t".chars().collect::<Vec<_>>(),
            ch if (ch as u32) < 0x20 => format!("\\u{:04x}", ch as u32).chars().collect(),
            _ => vec![ch],
        })
        .collect()
}
