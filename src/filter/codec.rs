//! Array encoding of filter clauses
//!
//! Editors exchange filters as nested JSON arrays whose first element is a
//! tag: `["and", ["=", ["field-id", 1], 5], ["segment", 3]]`. A predicate's
//! trailing JSON object, if any, is its options bag. This module classifies
//! raw values and converts between that encoding and [`Clause`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{FilterError, Result};
use crate::filter::clause::{Clause, Compound, Connective, Predicate, SegmentRef};
use crate::filter::consolidate::consolidate;

const SEGMENT_TAG: &str = "segment";

fn tag(value: &Value) -> Option<&str> {
    value.as_array()?.first()?.as_str()
}

/// True if `value` is an array tagged `"and"` or `"or"`
#[must_use]
pub fn is_compound_filter(value: &Value) -> bool {
    tag(value).and_then(Connective::from_tag).is_some()
}

/// True if `value` is an array tagged `"segment"`
#[must_use]
pub fn is_segment_filter(value: &Value) -> bool {
    tag(value) == Some(SEGMENT_TAG)
}

/// True if `value` is neither compound nor a segment reference
#[must_use]
pub fn is_field_filter(value: &Value) -> bool {
    !is_compound_filter(value) && !is_segment_filter(value)
}

/// True if the last element of an encoded clause is a JSON object
#[must_use]
pub fn has_filter_options(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.last())
        .is_some_and(Value::is_object)
}

/// Decode a filter expression.
///
/// `null` and `[]` both mean "no filter" and decode to `None`. The decoded
/// tree is consolidated, so a payload such as `["and"]` is also absent and
/// singleton compounds arrive collapsed. Use [`Clause::from_value`] to keep
/// the payload's exact shape.
pub fn decode_filter(value: &Value) -> Result<Option<Clause>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        other => Clause::from_value(other).map(consolidate),
    }
}

/// Parse a filter expression from JSON text
pub fn decode_filter_str(text: &str) -> Result<Option<Clause>> {
    let value: Value = serde_json::from_str(text)?;
    decode_filter(&value)
}

/// Encode a filter expression; absence encodes as `null`
#[must_use]
pub fn encode_filter(expr: Option<&Clause>) -> Value {
    expr.map_or(Value::Null, Value::from)
}

impl Clause {
    /// Decode a single clause from its array encoding
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| FilterError::malformed(format!("expected an array, found {value}")))?;
        let (head, rest) = items
            .split_first()
            .ok_or_else(|| FilterError::malformed("empty clause"))?;
        let tag = head
            .as_str()
            .ok_or_else(|| FilterError::malformed(format!("clause tag must be a string, found {head}")))?;

        if let Some(connective) = Connective::from_tag(tag) {
            let operands = rest
                .iter()
                .map(|operand| Self::from_value(operand).map(Arc::new))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::Compound(Compound::from_shared(connective, operands)));
        }

        if tag == SEGMENT_TAG {
            return match rest {
                [id] => Ok(Self::Segment(SegmentRef { id: id.clone() })),
                _ => Err(FilterError::malformed(format!(
                    "segment reference takes one identifier, found {}",
                    rest.len()
                ))),
            };
        }

        let (arguments, options) = match rest.split_last() {
            Some((Value::Object(options), arguments)) => (arguments.to_vec(), Some(options.clone())),
            _ => (rest.to_vec(), None),
        };
        Ok(Self::Predicate(Predicate {
            kind: tag.to_string(),
            arguments,
            options,
        }))
    }

    /// Encode the clause as a JSON array
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl From<&Clause> for Value {
    fn from(clause: &Clause) -> Self {
        let items = match clause {
            Clause::Compound(compound) => std::iter::once(Self::from(compound.connective.as_str()))
                .chain(compound.operands.iter().map(|operand| Self::from(&**operand)))
                .collect(),
            Clause::Predicate(predicate) => std::iter::once(Self::from(predicate.kind.as_str()))
                .chain(predicate.arguments.iter().cloned())
                .chain(predicate.options.clone().map(Self::Object))
                .collect(),
            Clause::Segment(segment) => vec![Self::from(SEGMENT_TAG), segment.id.clone()],
        };
        Self::Array(items)
    }
}

impl From<Clause> for Value {
    fn from(clause: Clause) -> Self {
        Self::from(&clause)
    }
}

impl TryFrom<&Value> for Clause {
    type Error = FilterError;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl TryFrom<Value> for Clause {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
