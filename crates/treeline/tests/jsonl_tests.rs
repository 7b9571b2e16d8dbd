use treeline::jsonl::{self, Report};
use treeline::{validate_jsonl, Config, Value};

#[test]
fn test_mixed_input_report() {
    let input = "{\"a\":1}\n{bad json}\n\n{\"b\":2}";
    let report = validate_jsonl(input);

    assert_eq!(report.total_lines, 4);
    assert_eq!(report.valid_lines, 2);
    assert_eq!(report.invalid_lines, 1);
    assert_eq!(report.empty_lines, 1);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors.first().map(|e| e.line), Some(2));
    assert_eq!(
        report.errors.first().map(|e| e.content.as_str()),
        Some("{bad json}")
    );

    let frequencies: Vec<(&str, usize)> = report
        .key_frequency
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(frequencies, vec![("a", 1), ("b", 1)]);

    assert_eq!(report.records_to_json(), r#"[{"a":1},{"b":2}]"#);
    assert!(!report.is_valid());
}

#[test]
fn test_all_valid_input() {
    let report = validate_jsonl("{\"x\":true}\n[1,2,3]\n\"text\"\n42\nnull");
    assert_eq!(report.total_lines, 5);
    assert_eq!(report.valid_lines, 5);
    assert_eq!(report.invalid_lines, 0);
    assert!(report.is_valid());
}

#[test]
fn test_records_carry_line_numbers_and_keys() {
    let report = validate_jsonl("{\"a\":1,\"b\":2}\n\n{\"c\":3}");
    let lines: Vec<usize> = report.records.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 3]);

    let first_keys: Vec<&str> = report
        .records
        .iter()
        .flat_map(|r| r.keys.iter())
        .map(String::as_str)
        .collect();
    assert_eq!(first_keys, vec!["a", "b", "c"]);
}

#[test]
fn test_key_frequency_counts_across_lines() {
    let report = validate_jsonl("{\"a\":1}\n{\"a\":2,\"b\":3}\n{\"b\":4}");
    assert_eq!(report.key_frequency.get("a"), Some(&2));
    assert_eq!(report.key_frequency.get("b"), Some(&2));

    let order: Vec<&str> = report.key_frequency.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["a", "b"]);
}

#[test]
fn test_invalid_line_does_not_stop_processing() {
    let report = validate_jsonl("{broken\n{\"ok\":true}");
    assert_eq!(report.invalid_lines, 1);
    assert_eq!(report.valid_lines, 1);
    assert_eq!(report.records.first().map(|r| r.line), Some(2));
}

#[test]
fn test_trailing_content_invalidates_line() {
    let report = validate_jsonl("{\"a\":1} 2");
    assert_eq!(report.invalid_lines, 1);
    let message = report
        .errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_default();
    assert!(message.contains("trailing"));
}

#[test]
fn test_surrounding_whitespace_is_tolerated() {
    let report = validate_jsonl("   {\"a\":1}   ");
    assert_eq!(report.valid_lines, 1);
}

#[test]
fn test_error_columns_are_one_based() {
    let report = validate_jsonl("{\"a\": }");
    let column = report.errors.first().and_then(|e| e.column);
    assert_eq!(column, Some(7));
}

#[test]
fn test_depth_limit_applies_per_line() {
    let config = Config {
        max_depth: 2,
        max_size: 0,
    };
    let report = jsonl::validate_with_config("[[1]]\n[[[1]]]", config);
    assert_eq!(report.valid_lines, 1);
    assert_eq!(report.invalid_lines, 1);
    assert_eq!(report.errors.first().map(|e| e.line), Some(2));
}

#[test]
fn test_records_hold_parsed_values() {
    let report = validate_jsonl("{\"n\":-2.5e3}");
    let value = report.records.first().map(|r| r.value.clone());
    let n = value
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|obj| obj.get("n"))
        .and_then(Value::as_number);
    assert_eq!(n, Some(-2500.0));
}

#[test]
fn test_empty_report_serializes_to_empty_array() {
    let report = Report::default();
    assert_eq!(report.records_to_json(), "[]");
    assert!(report.is_valid());
}

#[test]
fn test_unicode_lines_round_trip() {
    let report = validate_jsonl("{\"name\":\"caf\\u00e9\"}\n{\"emoji\":\"\\ud83d\\ude00\"}");
    assert_eq!(report.valid_lines, 2);
    assert_eq!(report.records_to_json(), "[{\"name\":\"café\"},{\"emoji\":\"😀\"}]");
}
