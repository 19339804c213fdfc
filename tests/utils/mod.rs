use filter_tree::{Clause, Result, decode_filter, encode_filter, filter_paths};
use serde_json::{Value, json};

/// Install the test logger once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Decode a filter expression written in the array encoding
pub fn expr(value: &Value) -> Result<Option<Clause>> {
    decode_filter(value)
}

/// Decode a single clause written in the array encoding
pub fn clause(value: &Value) -> Result<Clause> {
    Clause::from_value(value)
}

/// Encode an expression back to its array form for comparison
#[must_use]
pub fn encoded(expr: Option<&Clause>) -> Value {
    encode_filter(expr)
}

/// `["=", ["field-id", field], value]`
#[must_use]
pub fn field_eq(field: i64, value: Value) -> Clause {
    Clause::predicate("=", [json!(["field-id", field]), value])
}

/// Assert no compound clause anywhere in `expr` has fewer than two operands
pub fn assert_consolidated(expr: Option<&Clause>) {
    for (path, clause) in filter_paths(expr) {
        if let Some(compound) = clause.as_compound() {
            assert!(
                compound.operands.len() >= 2,
                "compound at {path:?} has {} operands in {}",
                compound.operands.len(),
                encoded(expr)
            );
        }
    }
}

/// Assert no compound clause has an operand repeating its connective
pub fn assert_flat(expr: Option<&Clause>) {
    for (path, clause) in filter_paths(expr) {
        if let Some(compound) = clause.as_compound() {
            for operand in &compound.operands {
                assert_ne!(
                    operand.connective(),
                    Some(compound.connective),
                    "same-connective nesting under {path:?} in {}",
                    encoded(expr)
                );
            }
        }
    }
}
