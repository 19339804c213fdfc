//! Error handling for the filter-tree engine.

use itertools::Itertools;

/// Errors raised when an edit or a decode falls outside the engine's domain
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A value that does not encode a clause
    #[error("Malformed filter clause: {0}")]
    Malformed(String),

    /// A path step that does not address an operand
    #[error("Path [{}] does not resolve: no operand at position {position}", display_path(.path))]
    PathOutOfRange {
        /// The full path being resolved
        path: Vec<usize>,
        /// The offending step
        position: usize,
    },

    /// A path that descends through, or targets, a non-compound clause
    #[error("Clause at path [{}] is not a compound filter", display_path(.path))]
    NotCompound {
        /// Path of the clause that was expected to be compound
        path: Vec<usize>,
    },

    /// An operand pair that lies outside the target compound clause
    #[error("Operand pair {operand_index}..={} is out of range for {operands} operands", .operand_index + 1)]
    OperandOutOfRange {
        /// Index of the left operand of the pair
        operand_index: usize,
        /// Number of operands in the target clause
        operands: usize,
    },

    /// JSON text that could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    /// Create a malformed-clause error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

fn display_path(path: &[usize]) -> String {
    path.iter().join(".")
}

/// Result type for filter-tree operations
pub type Result<T> = std::result::Result<T, FilterError>;
