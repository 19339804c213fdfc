//! Editing operations over filter expressions
//!
//! A filter expression is `Option<Clause>`: `None` means no filtering. Every
//! operation returns a new expression that shares unchanged sub-clauses with
//! the current one. Adding takes the current expression by value, because the
//! old root becomes an operand of the new one; the other edits only borrow it.
//! Paths must come from the current tree ([`get_filters`],
//! [`crate::filter::filter_paths`]); positions are not stable across edits.

use std::sync::Arc;

use log::{debug, trace};

use crate::config::FilterEditorConfig;
use crate::error::Result;
use crate::filter::clause::{Clause, Compound, Connective};
use crate::filter::consolidate::{consolidate_shared, flatten, flatten_shared};
use crate::filter::path::{remove_at, replace_at};

/// Applies edits to filter expressions under a [`FilterEditorConfig`]
#[derive(Debug, Clone, Default)]
pub struct FilterEditor {
    config: FilterEditorConfig,
}

impl FilterEditor {
    /// Create an editor with the given configuration
    #[must_use]
    pub const fn new(config: FilterEditorConfig) -> Self {
        Self { config }
    }

    /// The editor's configuration
    #[must_use]
    pub const fn config(&self) -> &FilterEditorConfig {
        &self.config
    }

    /// Add `new_filter` to the expression.
    ///
    /// # Arguments
    /// * `expr` - The current expression
    /// * `new_filter` - The clause to add
    ///
    /// # Returns
    /// `new_filter` alone when there was no filter, the compound with
    /// `new_filter` appended under its connective, or
    /// `["and", expr, new_filter]` for a single clause
    #[must_use]
    pub fn add_filter(&self, expr: Option<Clause>, new_filter: Clause) -> Clause {
        let added = match expr {
            None => new_filter,
            Some(Clause::Compound(mut compound)) => {
                compound.operands.push(Arc::new(new_filter));
                Clause::Compound(compound)
            }
            Some(clause) => Clause::Compound(Compound::new(Connective::And, [clause, new_filter])),
        };

        let added = self.normalize(added);
        self.log_edit("add", Some(&added));
        added
    }

    /// Replace the clause at `path` with `new_filter`.
    ///
    /// # Arguments
    /// * `expr` - The current expression
    /// * `path` - Location of the clause to replace; ignored for single clauses
    /// * `new_filter` - The replacement clause
    ///
    /// # Returns
    /// The consolidated expression. An absent expression stays absent.
    ///
    /// # Errors
    /// Returns an error if `path` does not resolve inside a compound expression
    pub fn update_filter(&self, expr: Option<&Clause>, path: &[usize], new_filter: Clause) -> Result<Option<Clause>> {
        let updated = match expr {
            None => None,
            Some(root @ Clause::Compound(_)) => self.install(root, path, new_filter)?,
            Some(_) => Some(self.normalize(new_filter)),
        };
        self.log_edit("update", updated.as_ref());
        Ok(updated)
    }

    /// Remove the clause at `path`.
    ///
    /// Removing the only clause of a single-clause expression, or the root
    /// of a compound one (empty path), clears the expression.
    ///
    /// # Errors
    /// Returns an error if `path` does not resolve inside a compound expression
    pub fn remove_filter(&self, expr: Option<&Clause>, path: &[usize]) -> Result<Option<Clause>> {
        let removed = match expr {
            Some(root @ Clause::Compound(_)) if !path.is_empty() => {
                let remaining = remove_at(root, path)?;
                self.canonicalize(remaining)
            }
            _ => None,
        };
        self.log_edit("remove", removed.as_ref());
        Ok(removed)
    }

    /// Replace the clause at `path` and bring the tree back to canonical form
    pub(crate) fn install(&self, root: &Clause, path: &[usize], clause: Clause) -> Result<Option<Clause>> {
        trace!("Installing {clause} at path {path:?}");
        let replaced = replace_at(root, path, clause)?;
        Ok(self.canonicalize(replaced))
    }

    fn canonicalize(&self, clause: Clause) -> Option<Clause> {
        let root = Arc::new(clause);
        let consolidated = consolidate_shared(&root);
        drop(root);
        consolidated.map(|consolidated| {
            if self.config.flatten_nested_connectives {
                let flattened = flatten_shared(&consolidated);
                drop(consolidated);
                Arc::unwrap_or_clone(flattened)
            } else {
                Arc::unwrap_or_clone(consolidated)
            }
        })
    }

    fn normalize(&self, clause: Clause) -> Clause {
        if self.config.flatten_nested_connectives {
            flatten(clause)
        } else {
            clause
        }
    }

    pub(crate) fn log_edit(&self, operation: &str, result: Option<&Clause>) {
        if !self.config.log_edits {
            return;
        }
        match result {
            Some(clause) => debug!("Filter {operation}: {clause}"),
            None => debug!("Filter {operation}: no filter"),
        }
    }
}

/// The canonical list of filters being combined.
///
/// Absent expressions yield nothing, compound expressions yield their
/// operands in order, and a single clause yields itself.
#[must_use]
pub fn get_filters(expr: Option<&Clause>) -> Vec<&Clause> {
    match expr {
        None => Vec::new(),
        Some(Clause::Compound(compound)) => compound.operands.iter().map(Arc::as_ref).collect(),
        Some(clause) => vec![clause],
    }
}

/// True when another filter may be added.
///
/// Adding is blocked while the last filter is incomplete, i.e. still has a
/// `null` argument.
#[must_use]
pub fn can_add_filter(expr: Option<&Clause>) -> bool {
    get_filters(expr)
        .last()
        .is_none_or(|last| !last.has_null_arguments())
}

/// Add `new_filter` with the default editor
#[must_use]
pub fn add_filter(expr: Option<Clause>, new_filter: Clause) -> Clause {
    FilterEditor::default().add_filter(expr, new_filter)
}

/// Replace the clause at `path` with the default editor
pub fn update_filter(expr: Option<&Clause>, path: &[usize], new_filter: Clause) -> Result<Option<Clause>> {
    FilterEditor::default().update_filter(expr, path, new_filter)
}

/// Remove the clause at `path` with the default editor
pub fn remove_filter(expr: Option<&Clause>, path: &[usize]) -> Result<Option<Clause>> {
    FilterEditor::default().remove_filter(expr, path)
}

/// Drop every filter
#[must_use]
pub const fn clear_filters(_expr: Option<&Clause>) -> Option<Clause> {
    None
}
