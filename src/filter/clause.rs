//! Typed filter clauses
//!
//! A filter expression is a tree of clauses. Compound clauses combine their
//! operands under a connective, predicates carry their arguments plus an
//! optional options bag, and segment references point at a named, reusable
//! filter. Operands are shared through `Arc`, so an edit only allocates the
//! nodes along the edited path.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unordered key/value annotations trailing a predicate's arguments
pub type FilterOptions = Map<String, Value>;

/// Boolean connective of a compound clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// All operands must match
    And,
    /// Any operand may match
    Or,
}

impl Connective {
    /// The tag used for this connective in the array encoding
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Parse a connective tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    /// The opposite connective
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the filter tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Clause {
    /// Boolean combination of sub-clauses
    Compound(Compound),
    /// A single predicate such as `["=", ["field-id", 1], 5]`
    Predicate(Predicate),
    /// Reference to a named, reusable filter
    Segment(SegmentRef),
}

/// Sub-clauses combined under one connective
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// The connective joining the operands
    pub connective: Connective,
    /// The combined sub-clauses, in order
    pub operands: Vec<Arc<Clause>>,
}

impl Compound {
    /// Build a compound clause from owned operands
    pub fn new(connective: Connective, operands: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            connective,
            operands: operands.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a compound clause from shared operands
    #[must_use]
    pub const fn from_shared(connective: Connective, operands: Vec<Arc<Clause>>) -> Self {
        Self {
            connective,
            operands,
        }
    }

    /// The operand at an encoded position.
    ///
    /// Positions count from 1 because position 0 of the encoding holds the
    /// connective.
    #[must_use]
    pub fn operand(&self, position: usize) -> Option<&Arc<Clause>> {
        position
            .checked_sub(1)
            .and_then(|index| self.operands.get(index))
    }
}

/// A predicate over the surrounding query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// The predicate tag, e.g. `"="`, `"between"`, `"contains"`
    pub kind: String,
    /// Predicate-specific arguments; a `null` marks an incomplete predicate
    pub arguments: Vec<Value>,
    /// Trailing options bag, never stored empty by `with_filter_options`
    pub options: Option<FilterOptions>,
}

impl Predicate {
    /// Build a predicate without options
    pub fn new(kind: impl Into<String>, arguments: impl IntoIterator<Item = Value>) -> Self {
        Self {
            kind: kind.into(),
            arguments: arguments.into_iter().collect(),
            options: None,
        }
    }
}

/// Reference to a segment by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRef {
    /// The segment identifier
    pub id: Value,
}

impl Clause {
    /// Build a compound clause
    pub fn compound(connective: Connective, operands: impl IntoIterator<Item = Self>) -> Self {
        Self::Compound(Compound::new(connective, operands))
    }

    /// Build an `and` clause
    pub fn and(operands: impl IntoIterator<Item = Self>) -> Self {
        Self::compound(Connective::And, operands)
    }

    /// Build an `or` clause
    pub fn or(operands: impl IntoIterator<Item = Self>) -> Self {
        Self::compound(Connective::Or, operands)
    }

    /// Build a predicate clause without options
    pub fn predicate(kind: impl Into<String>, arguments: impl IntoIterator<Item = Value>) -> Self {
        Self::Predicate(Predicate::new(kind, arguments))
    }

    /// Build a segment reference
    pub fn segment(id: impl Into<Value>) -> Self {
        Self::Segment(SegmentRef { id: id.into() })
    }

    /// True for `and`/`or` clauses
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(_))
    }

    /// True for segment references
    #[must_use]
    pub const fn is_segment(&self) -> bool {
        matches!(self, Self::Segment(_))
    }

    /// True for clauses that are neither compound nor segment references
    #[must_use]
    pub const fn is_field_filter(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// The connective of a compound clause
    #[must_use]
    pub const fn connective(&self) -> Option<Connective> {
        match self {
            Self::Compound(compound) => Some(compound.connective),
            _ => None,
        }
    }

    /// The compound clause, if this is one
    #[must_use]
    pub const fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// True when the clause carries a trailing options bag
    #[must_use]
    pub const fn has_filter_options(&self) -> bool {
        matches!(
            self,
            Self::Predicate(Predicate {
                options: Some(_),
                ..
            })
        )
    }

    /// The clause's options, or an empty bag when it has none
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        match self {
            Self::Predicate(Predicate {
                options: Some(options),
                ..
            }) => options.clone(),
            _ => FilterOptions::new(),
        }
    }

    /// Replace the clause's options.
    ///
    /// An empty bag removes the options element entirely. Compound clauses
    /// and segment references have no options bag and are returned as is.
    #[must_use]
    pub fn with_filter_options(self, options: FilterOptions) -> Self {
        match self {
            Self::Predicate(mut predicate) => {
                predicate.options = (!options.is_empty()).then_some(options);
                Self::Predicate(predicate)
            }
            other => {
                log::trace!("Ignoring options for non-predicate clause {other}");
                other
            }
        }
    }

    /// True when any top-level argument is still `null`.
    ///
    /// Compound operands are clauses and never null, so compound clauses are
    /// always complete at this level.
    #[must_use]
    pub fn has_null_arguments(&self) -> bool {
        match self {
            Self::Predicate(predicate) => predicate.arguments.iter().any(Value::is_null),
            Self::Segment(segment) => segment.id.is_null(),
            Self::Compound(_) => false,
        }
    }
}

impl From<Predicate> for Clause {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<Compound> for Clause {
    fn from(compound: Compound) -> Self {
        Self::Compound(compound)
    }
}

impl From<SegmentRef> for Clause {
    fn from(segment: SegmentRef) -> Self {
        Self::Segment(segment)
    }
}

/// Free-function form of [`Clause::filter_options`]
#[must_use]
pub fn get_filter_options(clause: &Clause) -> FilterOptions {
    clause.filter_options()
}

/// Free-function form of [`Clause::with_filter_options`]
#[must_use]
pub fn set_filter_options(clause: Clause, options: FilterOptions) -> Clause {
    clause.with_filter_options(options)
}
