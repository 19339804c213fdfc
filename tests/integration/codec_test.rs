use crate::utils::{clause, encoded, expr};
use filter_tree::filter::{
    get_filter_options, has_filter_options, is_compound_filter, is_field_filter,
    is_segment_filter, set_filter_options,
};
use filter_tree::{Clause, FilterError, FilterOptions, consolidate, decode_filter_str};
use serde_json::{Value, json};

fn options(value: Value) -> FilterOptions {
    match value {
        Value::Object(map) => map,
        other => panic!("expected options object, got {other}"),
    }
}

/// A realistic editor payload survives decoding and encoding unchanged
#[test]
fn test_round_trip_editor_payload() -> filter_tree::Result<()> {
    let payload = json!([
        "and",
        ["time-interval", ["field-id", 12], -30, "day", {"include-current": true}],
        ["or", ["segment", 4], ["contains", ["field-id", 7], "acme", {"case-sensitive": false}]],
        ["between", ["field-id", 3], 10, 20],
        ["inside", ["field-id", 5], ["field-id", 6], 60.0, -120.0, 30.0, -110.0]
    ]);
    let decoded = expr(&payload)?;
    assert_eq!(encoded(decoded.as_ref()), payload);
    Ok(())
}

/// Raw classification agrees with the typed clause
#[test]
fn test_classification_matches_typed_clause() -> filter_tree::Result<()> {
    let samples = [
        json!(["and", ["segment", 1], ["segment", 2]]),
        json!(["or", ["segment", 1], ["segment", 2]]),
        json!(["segment", 1]),
        json!(["=", ["field-id", 1], 2]),
        json!(["starts-with", ["field-id", 1], "x", {"case-sensitive": true}]),
    ];
    for sample in samples {
        let typed = clause(&sample)?;
        assert_eq!(is_compound_filter(&sample), typed.is_compound());
        assert_eq!(is_segment_filter(&sample), typed.is_segment());
        assert_eq!(is_field_filter(&sample), typed.is_field_filter());
        assert_eq!(has_filter_options(&sample), typed.has_filter_options());
    }
    Ok(())
}

/// Options set through the accessors land as the trailing element
#[test]
fn test_options_accessors_on_encoded_clauses() -> filter_tree::Result<()> {
    let bare = clause(&json!(["contains", ["field-id", 7], "acme"]))?;
    assert!(get_filter_options(&bare).is_empty());

    let with = set_filter_options(bare.clone(), options(json!({"case-sensitive": false})));
    assert_eq!(
        with.to_value(),
        json!(["contains", ["field-id", 7], "acme", {"case-sensitive": false}])
    );

    let replaced = set_filter_options(with.clone(), options(json!({"case-sensitive": true})));
    assert_eq!(
        replaced.to_value(),
        json!(["contains", ["field-id", 7], "acme", {"case-sensitive": true}])
    );

    assert_eq!(set_filter_options(with.clone(), get_filter_options(&with)), with);
    assert_eq!(set_filter_options(with, FilterOptions::new()), bare);
    Ok(())
}

/// An explicit empty options object decodes but is stripped on the next set
#[test]
fn test_empty_options_object_is_stripped() -> filter_tree::Result<()> {
    let with_empty = clause(&json!(["contains", ["field-id", 7], "acme", {}]))?;
    assert!(with_empty.has_filter_options());

    let stripped = set_filter_options(with_empty.clone(), get_filter_options(&with_empty));
    assert_eq!(stripped.to_value(), json!(["contains", ["field-id", 7], "acme"]));
    Ok(())
}

/// Consolidating a decoded payload is stable
#[test]
fn test_consolidate_decoded_payload_is_idempotent() -> filter_tree::Result<()> {
    let decoded = clause(&json!([
        "or",
        ["and", ["segment", 1]],
        ["and", ["or", ["segment", 2], ["segment", 3]]],
        ["or"]
    ]))?;
    let once = consolidate(decoded);
    assert_eq!(
        encoded(once.as_ref()),
        json!(["or", ["segment", 1], ["or", ["segment", 2], ["segment", 3]]])
    );
    assert_eq!(once.clone().and_then(consolidate), once);
    Ok(())
}

/// Decoded expressions come back in canonical form
#[test]
fn test_decoded_expressions_are_consolidated() -> filter_tree::Result<()> {
    assert_eq!(expr(&json!(["and"]))?, None);
    assert_eq!(expr(&json!(["or", ["and"], ["or"]]))?, None);
    assert_eq!(
        encoded(expr(&json!(["and", ["or", ["segment", 1]], ["segment", 2]]))?.as_ref()),
        json!(["and", ["segment", 1], ["segment", 2]])
    );
    assert_eq!(decode_filter_str(r#"["or", ["segment", 8]]"#)?, Some(Clause::segment(8)));
    Ok(())
}

/// Malformed payloads are reported as such
#[test]
fn test_malformed_payloads() {
    let payloads = [json!(3), json!(["and", "x"]), json!([1, 2]), json!(["segment", 1, 2])];
    for payload in payloads {
        assert!(
            matches!(Clause::from_value(&payload), Err(FilterError::Malformed(_))),
            "{payload} should be malformed"
        );
    }
    assert!(matches!(decode_filter_str("{"), Err(FilterError::Json(_))));
    assert_eq!(decode_filter_str("null").ok().flatten(), None);
}
