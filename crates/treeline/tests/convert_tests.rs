use treeline::{from_xml_str, xml_to_json, xml_to_json_pretty, ErrorKind};

#[test]
fn test_nested_element_becomes_nested_object() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<root><name>test</name></root>")?;
    assert_eq!(output, r#"{"root":{"name":"test"}}"#);
    Ok(())
}

#[test]
fn test_attributes_collect_under_attributes_key() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json(r#"<root id="123"></root>"#)?;
    assert_eq!(output, r#"{"root":{"@attributes":{"id":"123"}}}"#);
    Ok(())
}

#[test]
fn test_repeated_tags_collapse_to_array() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<root><item>1</item><item>2</item></root>")?;
    assert_eq!(output, r#"{"root":{"item":["1","2"]}}"#);
    Ok(())
}

#[test]
fn test_three_repeats_stay_in_document_order() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<r><i>1</i><i>2</i><i>3</i></r>")?;
    assert_eq!(output, r#"{"r":{"i":["1","2","3"]}}"#);
    Ok(())
}

#[test]
fn test_empty_element_is_null() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<root><a/></root>")?;
    assert_eq!(output, r#"{"root":{"a":null}}"#);
    Ok(())
}

#[test]
fn test_lone_empty_root() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<a/>")?;
    assert_eq!(output, r#"{"a":null}"#);
    Ok(())
}

#[test]
fn test_attributes_and_text_share_an_object() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json(r#"<root id="1">body</root>"#)?;
    assert_eq!(output, r##"{"root":{"@attributes":{"id":"1"},"#text":"body"}}"##);
    Ok(())
}

#[test]
fn test_attributes_with_element_children() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json(r#"<root id="1"><a>x</a></root>"#)?;
    assert_eq!(output, r#"{"root":{"@attributes":{"id":"1"},"a":"x"}}"#);
    Ok(())
}

#[test]
fn test_mixed_content_concatenates_trimmed_text() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<root> first <child/> second </root>")?;
    assert_eq!(output, r##"{"root":{"#text":"firstsecond","child":null}}"##);
    Ok(())
}

#[test]
fn test_whitespace_between_tags_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<root>\n  <a>x</a>\n</root>")?;
    assert_eq!(output, r#"{"root":{"a":"x"}}"#);
    Ok(())
}

#[test]
fn test_array_mixes_scalars_and_objects() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json(r#"<r><item>1</item><item id="2"/></r>"#)?;
    assert_eq!(output, r#"{"r":{"item":["1",{"@attributes":{"id":"2"}}]}}"#);
    Ok(())
}

#[test]
fn test_sibling_keys_keep_document_order() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<r><b/><a/></r>")?;
    assert_eq!(output, r#"{"r":{"b":null,"a":null}}"#);
    Ok(())
}

#[test]
fn test_attribute_values_stay_strings() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json(r#"<root id="123" flag="true"/>"#)?;
    assert_eq!(
        output,
        r#"{"root":{"@attributes":{"id":"123","flag":"true"}}}"#
    );
    Ok(())
}

#[test]
fn test_cdata_singleton_becomes_bare_string() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<r><![CDATA[a < b && c]]></r>")?;
    assert_eq!(output, r#"{"r":"a < b && c"}"#);
    Ok(())
}

#[test]
fn test_entities_decode_before_shaping() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json("<r>&lt;x&gt; &amp; y</r>")?;
    assert_eq!(output, r#"{"r":"<x> & y"}"#);
    Ok(())
}

#[test]
fn test_declaration_and_comments_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<?xml version=\"1.0\"?>\n<!-- header -->\n<root><a>x</a></root>\n";
    let output = xml_to_json(input)?;
    assert_eq!(output, r#"{"root":{"a":"x"}}"#);
    Ok(())
}

#[test]
fn test_pretty_output_uses_two_space_indent() -> Result<(), Box<dyn std::error::Error>> {
    let output = xml_to_json_pretty("<root><item>1</item><item>2</item></root>")?;
    let expected = "{\n  \"root\": {\n    \"item\": [\n      \"1\",\n      \"2\"\n    ]\n  }\n}";
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn test_from_xml_str_exposes_raw_document() -> Result<(), Box<dyn std::error::Error>> {
    let doc = from_xml_str(r#"<root id="1"><a/></root>"#)?;
    assert_eq!(doc.root.name, "root");
    assert_eq!(doc.root.attributes.get("id"), Some(&"1".to_string()));
    assert_eq!(doc.root.children.len(), 1);
    Ok(())
}

#[test]
fn test_unclosed_tag_reports_invalid_xml() {
    let err = xml_to_json("<root><unclosed>").unwrap_err();
    assert!(err.message().contains("Invalid"));
    assert!(matches!(err.kind(), ErrorKind::InvalidXml));
}

#[test]
fn test_mismatched_tags_report_invalid_xml() {
    let err = xml_to_json("<a><b></a></b>").unwrap_err();
    assert!(err.message().starts_with("Invalid XML"));
}

#[test]
fn test_duplicate_attribute_reports_invalid_xml() {
    let err = xml_to_json(r#"<a id="1" id="2"/>"#).unwrap_err();
    assert!(err.message().contains("Invalid XML"));
    assert!(err.message().contains("duplicate attribute"));
}

#[test]
fn test_error_display_carries_invalid_marker() {
    let err = xml_to_json("not xml at all").unwrap_err();
    assert!(err.to_string().contains("Invalid"));
}

#[test]
fn test_no_partial_result_on_error() {
    assert!(xml_to_json("<root><a>x</a>").is_err());
    assert!(xml_to_json("<root></root><root></root>").is_err());
}
