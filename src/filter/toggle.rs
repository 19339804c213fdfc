//! Connective toggling
//!
//! Flipping the connective between two neighbouring operands regroups only
//! that pair, so the rest of the clause keeps its meaning:
//!
//! ```text
//! ["and", A, B, C]  --toggle 0-->  ["and", ["or", A, B], C]
//! ["and", A, B]     --toggle 0-->  ["or", A, B]
//! ```
//!
//! When a two-operand clause flips to its parent's connective it is merged
//! into the parent instead of staying nested one level down. That keeps the
//! editor's rendering shallow; it is not needed for correctness.

use std::sync::Arc;

use log::trace;

use crate::error::{FilterError, Result};
use crate::filter::clause::{Clause, Compound, Connective};
use crate::filter::edit::FilterEditor;
use crate::filter::path::splice_operands;

/// The clauses an operand contributes to a group joined by `connective`
fn absorb(operand: &Arc<Clause>, connective: Connective) -> Vec<Arc<Clause>> {
    match operand.as_ref() {
        Clause::Compound(nested) if nested.connective == connective => nested.operands.clone(),
        _ => vec![Arc::clone(operand)],
    }
}

impl FilterEditor {
    /// Flip the connective between operands `operand_index` and
    /// `operand_index + 1` of the compound clause at `path`.
    ///
    /// # Arguments
    /// * `expr` - The current expression
    /// * `operand_index` - Zero-based index of the left operand of the pair
    /// * `path` - Location of the compound clause holding the pair
    ///
    /// # Returns
    /// The regrouped, consolidated expression. An absent expression stays
    /// absent.
    ///
    /// # Errors
    /// Returns an error if `path` does not address a compound clause or the
    /// pair lies outside it
    pub fn toggle_compound_filter_operator(
        &self,
        expr: Option<&Clause>,
        operand_index: usize,
        path: &[usize],
    ) -> Result<Option<Clause>> {
        let Some(root) = expr else {
            return Ok(None);
        };
        let target = root.get_compound(path)?;
        let new_operator = target.connective.flip();

        let pair = target
            .operands
            .get(operand_index..operand_index.saturating_add(2))
            .filter(|pair| pair.len() == 2)
            .ok_or_else(|| FilterError::OperandOutOfRange {
                operand_index,
                operands: target.operands.len(),
            })?;
        let operands = absorb(&pair[0], new_operator)
            .into_iter()
            .chain(absorb(&pair[1], new_operator))
            .collect();
        let merged = Compound::from_shared(new_operator, operands);

        let toggled = if target.operands.len() > 2 {
            trace!("Grouping operands {operand_index} and {} under {new_operator}", operand_index + 1);
            let regrouped = splice_operands(
                target,
                operand_index..operand_index + 2,
                [Arc::new(Clause::Compound(merged))],
            );
            self.install(root, path, Clause::Compound(regrouped))?
        } else {
            self.replace_target(root, path, merged)?
        };

        self.log_edit("toggle", toggled.as_ref());
        Ok(toggled)
    }

    /// Install a fully flipped target, merging it into a parent that already
    /// uses the new connective
    fn replace_target(&self, root: &Clause, path: &[usize], merged: Compound) -> Result<Option<Clause>> {
        if let Some((&position, parent_path)) = path.split_last() {
            let parent = root.get_compound(parent_path)?;
            if parent.connective == merged.connective {
                trace!("Merging flipped clause at {path:?} into its {} parent", parent.connective);
                let expanded = splice_operands(parent, position - 1..position, merged.operands);
                return self.install(root, parent_path, Clause::Compound(expanded));
            }
        }
        self.install(root, path, Clause::Compound(merged))
    }
}

/// Toggle a connective with the default editor
pub fn toggle_compound_filter_operator(
    expr: Option<&Clause>,
    operand_index: usize,
    path: &[usize],
) -> Result<Option<Clause>> {
    FilterEditor::default().toggle_compound_filter_operator(expr, operand_index, path)
}
