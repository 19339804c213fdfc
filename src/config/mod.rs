//! Configuration for `FilterEditor`.

/// Configuration for the `FilterEditor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEditorConfig {
    /// Flatten same-connective nesting after every add, update and remove.
    ///
    /// When disabled, only the operator toggle flattens nested clauses and
    /// other edits may leave `["and", ["and", ...], ...]` in place.
    pub flatten_nested_connectives: bool,
    /// Log the resulting expression after each edit
    pub log_edits: bool,
}

impl Default for FilterEditorConfig {
    fn default() -> Self {
        Self {
            flatten_nested_connectives: false,
            log_edits: true,
        }
    }
}

impl FilterEditorConfig {
    /// Enable or disable global flattening of same-connective nesting
    #[must_use]
    pub const fn with_flatten_nested_connectives(mut self, flatten: bool) -> Self {
        self.flatten_nested_connectives = flatten;
        self
    }

    /// Enable or disable edit logging
    #[must_use]
    pub const fn with_log_edits(mut self, log_edits: bool) -> Self {
        self.log_edits = log_edits;
        self
    }
}
