//! JSONL line validation
//!
//! Validates newline-delimited JSON one line at a time. Each line is parsed
//! as a single self-contained document; a malformed line becomes a
//! [`LineError`] row and never affects the lines around it. The whole run is
//! summarized in a [`Report`] whose counters always satisfy
//! `total_lines == valid_lines + invalid_lines + empty_lines`.

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::convert;
use crate::error::Error;
use crate::json::{Config, Parser};
use crate::value::Value;

/// A successfully parsed line
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Record {
    /// 1-based line number
    pub line: usize,
    /// Parsed document
    pub value: Value,
    /// Top-level keys when the document is an object, empty otherwise
    pub keys: Vec<String>,
}

/// A line that failed to parse
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    /// 1-based column when the parser localized the problem
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub column: Option<u32>,
    /// Human-readable description
    pub message: String,
    /// The raw line as it appeared in the input
    pub content: String,
}

/// Summary of one validation run
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    pub total_lines: usize,
    pub valid_lines: usize,
    pub invalid_lines: usize,
    pub empty_lines: usize,
    /// One entry per invalid line, in line order
    pub errors: Vec<LineError>,
    /// One entry per valid line, in line order
    pub records: Vec<Record>,
    /// How many lines carried each top-level key, in first-seen order
    pub key_frequency: IndexMap<String, usize>,
}

impl Report {
    /// True when no line failed to parse
    pub fn is_valid(&self) -> bool {
        self.invalid_lines == 0
    }

    /// Serialize the recorded values as one compact JSON array in line order
    pub fn records_to_json(&self) -> String {
        let items: Vec<String> = self
            .records
            .iter()
            .map(|record| convert::to_json(&record.value))
            .collect();
        format!("[{}]", items.join(","))
    }
}

/// Validate JSONL input with the default parser limits
pub fn validate(input: &str) -> Report {
    validate_with_config(input, Config::default())
}

/// Validate JSONL input
///
/// Splits on `'\n'`, trimming one trailing `'\r'` per line. Line numbers are
/// 1-based over the split, so a trailing newline contributes a final empty
/// line and the empty input counts as one empty line. Never fails; every
/// problem is reported per line.
pub fn validate_with_config(input: &str, config: Config) -> Report {
    let mut report = Report::default();

    for (index, raw) in input.split('\n').enumerate() {
        let line_number = index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        report.total_lines += 1;

        if line.trim().is_empty() {
            report.empty_lines += 1;
            continue;
        }

        let mut parser = Parser::with_config(line.as_bytes(), config);
        match parser.parse_document() {
            Ok(value) => {
                let keys = top_level_keys(&value);
                for key in &keys {
                    *report.key_frequency.entry(key.clone()).or_insert(0) += 1;
                }
                report.records.push(Record {
                    line: line_number,
                    value,
                    keys,
                });
                report.valid_lines += 1;
            }
            Err(err) => {
                report.errors.push(LineError {
                    line: line_number,
                    column: error_column(&err),
                    message: err.message().to_string(),
                    content: raw.to_string(),
                });
                report.invalid_lines += 1;
            }
        }
    }

    report
}

fn top_level_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(obj) => obj.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

// Errors raised before any token was read carry the zero position; those
// map to no column rather than a misleading column 0.
fn error_column(err: &Error) -> Option<u32> {
    let pos = err.span().start;
    if pos.line == 0 && pos.col == 0 {
        None
    } else {
        Some(pos.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_one_empty_line() {
        let report = validate("");
        assert_eq!(report.total_lines, 1);
        assert_eq!(report.empty_lines, 1);
        assert_eq!(report.valid_lines, 0);
        assert_eq!(report.invalid_lines, 0);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let report = validate("{\"a\":1}\n");
        assert_eq!(report.total_lines, 2);
        assert_eq!(report.valid_lines, 1);
        assert_eq!(report.empty_lines, 1);
    }

    #[test]
    fn test_crlf_lines_parse() {
        let report = validate("{\"a\":1}\r\n{\"b\":2}");
        assert_eq!(report.valid_lines, 2);
        assert_eq!(report.invalid_lines, 0);
    }

    #[test]
    fn test_whitespace_only_line_is_empty() {
        let report = validate("  \t  ");
        assert_eq!(report.total_lines, 1);
        assert_eq!(report.empty_lines, 1);
    }

    #[test]
    fn test_error_carries_raw_line_and_column() {
        let report = validate("{bad}");
        assert_eq!(report.invalid_lines, 1);
        let error = report.errors.first();
        assert_eq!(error.map(|e| e.line), Some(1));
        assert_eq!(error.map(|e| e.content.as_str()), Some("{bad}"));
        assert_eq!(error.and_then(|e| e.column), Some(2));
    }

    #[test]
    fn test_non_object_lines_add_no_keys() {
        let report = validate("[1,2]\n\"text\"\n42");
        assert_eq!(report.valid_lines, 3);
        assert!(report.key_frequency.is_empty());
    }

    #[test]
    fn test_duplicate_keys_counted_once_per_line() {
        let report = validate("{\"a\":1,\"a\":2}");
        assert_eq!(report.valid_lines, 1);
        assert_eq!(report.key_frequency.get("a"), Some(&1));
    }

    #[test]
    fn test_counters_always_conserve() {
        let report = validate("{\"a\":1}\nnot json\n\n[true]\n");
        assert_eq!(
            report.total_lines,
            report.valid_lines + report.invalid_lines + report.empty_lines
        );
        assert_eq!(report.errors.len(), report.invalid_lines);
        assert_eq!(report.records.len(), report.valid_lines);
    }
}
