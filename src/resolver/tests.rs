use crate::{cow_json::parse_json_str, path::PathParser};

use super::*;

fn lookup(path: &str, source: &str) -> Option<String> {
    let path = PathParser::new().parse(path).unwrap();
    let source = parse_json_str(source).unwrap();
    match resolve(&path, &source) {
        Resolution::Found(json) => Some(json.to_json_string().unwrap()),
        Resolution::Missing { .. } => None,
    }
}

fn missing_segment(path: &str, source: &str) -> String {
    let path = PathParser::new().parse(path).unwrap();
    let source = parse_json_str(source).unwrap();
    match resolve(&path, &source) {
        Resolution::Missing { segment } => segment,
        Resolution::Found(json) => panic!("unexpectedly found {:?}", json),
    }
}

#[test]
fn direct_children() {
    assert_eq!(lookup("a.b", r#"{"a":{"b":42}}"#), Some("42".to_string()));
    assert_eq!(lookup("a", r#"{"a":{"b":42}}"#), Some(r#"{"b":42}"#.to_string()));
}

#[test]
fn deep_find_skips_intermediate_nodes() {
    let source = r#"{"envelope":{"payload":{"customer":{"id":7}}}}"#;
    assert_eq!(lookup("customer.id", source), Some("7".to_string()));
    assert_eq!(lookup("envelope.id", source), Some("7".to_string()));
}

#[test]
fn deep_find_prefers_current_object() {
    let source = r#"{"x":{"id":"deep"},"id":"shallow"}"#;
    assert_eq!(lookup("id", source), Some(r#""shallow""#.to_string()));
}

#[test]
fn deep_find_is_pre_order() {
    let source = r#"{"first":{"inner":{"id":1}},"second":{"id":2}}"#;
    assert_eq!(lookup("id", source), Some("1".to_string()));
}

#[test]
fn deep_find_searches_arrays() {
    let source = r#"{"rows":[{"other":true},{"name":"b"},{"name":"c"}]}"#;
    assert_eq!(lookup("rows.name", source), Some(r#""b""#.to_string()));
}

#[test]
fn index_segments() {
    let source = r#"{"xs":["p","q","r"]}"#;
    assert_eq!(lookup("xs.0", source), Some(r#""p""#.to_string()));
    assert_eq!(lookup("xs.2", source), Some(r#""r""#.to_string()));
    assert_eq!(lookup("xs.3", source), None);
    assert_eq!(lookup("xs.-1", source), None);
    assert_eq!(lookup("xs.99999999999999999999999", source), None);
}

#[test]
fn index_into_non_array_is_missing() {
    assert_eq!(lookup("a.0", r#"{"a":{"0":"zero"}}"#), None);
    assert_eq!(missing_segment("a.0", r#"{"a":{"0":"zero"}}"#), "0");
}

#[test]
fn missing_reports_failing_segment() {
    assert_eq!(missing_segment("a.b.c", r#"{"a":{"x":1}}"#), "b");
    assert_eq!(missing_segment("xs.5.n", r#"{"xs":[]}"#), "5");
}

#[test]
fn fields_of_scalars_are_missing() {
    assert_eq!(lookup("a.b", r#"{"a":"text"}"#), None);
    assert_eq!(lookup("a", "3"), None);
}

#[test]
fn null_is_a_value() {
    assert_eq!(lookup("a", r#"{"a":null}"#), Some("null".to_string()));
}

#[test]
fn root_array_index() {
    assert_eq!(lookup("1.n", r#"[{"n":"a"},{"n":"b"}]"#), Some(r#""b""#.to_string()));
}
