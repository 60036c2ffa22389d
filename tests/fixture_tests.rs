use live_feed::fixture::{
    another_function, decode_parameters, example_function_many_parameters, run,
};
use serde_json::{json, Value};

#[test]
fn test_decoded_mapping_matches_literal() {
    let data = decode_parameters(r#"{"name":"John", "age": 30, "city": "New York"}"#).unwrap();
    let as_value: Value = serde_json::to_value(data).unwrap();
    assert_eq!(as_value, json!({ "name": "John", "age": 30, "city": "New York" }));
}

#[test]
fn test_functions_run_once_without_error() {
    example_function_many_parameters(1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
    another_function();
    assert!(run().is_ok());
}

#[test]
fn test_fixture_keeps_an_unused_import_for_the_linter() {
    let source = include_str!("../src/fixture.rs");
    assert!(source.contains("use std::env;"));
    assert!(!source.contains("env::"));
}
