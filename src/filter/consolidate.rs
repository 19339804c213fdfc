//! Canonical form of filter trees
//!
//! Consolidation runs after every structural edit:
//! - A compound clause left with a single operand collapses to that operand.
//! - A compound clause left with no operands disappears.
//! - Collapses propagate outward through enclosing compound clauses.
//!
//! Flattening additionally absorbs operands that repeat their parent's
//! connective, e.g. `["and", A, ["and", B, C]]` becomes `["and", A, B, C]`.
//!
//! Both passes share every subtree they leave untouched.

use std::sync::Arc;

use crate::filter::clause::{Clause, Compound};

/// Consolidate a clause.
///
/// Returns `None` when nothing remains, which callers treat as "no filter".
/// The clause is taken by value so a result that reuses the root, or one of
/// its operands, is moved out rather than copied.
#[must_use]
pub fn consolidate(clause: Clause) -> Option<Clause> {
    let root = Arc::new(clause);
    let consolidated = consolidate_shared(&root);
    drop(root);
    consolidated.map(Arc::unwrap_or_clone)
}

pub(crate) fn consolidate_shared(clause: &Arc<Clause>) -> Option<Arc<Clause>> {
    let Clause::Compound(compound) = clause.as_ref() else {
        return Some(Arc::clone(clause));
    };

    match compound.operands.as_slice() {
        [] => None,
        [only] => consolidate_shared(only),
        operands => {
            let mut consolidated: Vec<Arc<Clause>> = operands.iter().filter_map(consolidate_shared).collect();
            let unchanged = consolidated.len() == operands.len()
                && consolidated
                    .iter()
                    .zip(operands)
                    .all(|(after, before)| Arc::ptr_eq(after, before));
            if unchanged {
                return Some(Arc::clone(clause));
            }

            // Operands that consolidated to nothing can leave a singleton behind
            match consolidated.len() {
                0 => None,
                1 => consolidated.pop(),
                _ => Some(Arc::new(Clause::Compound(Compound::from_shared(
                    compound.connective,
                    consolidated,
                )))),
            }
        }
    }
}

/// Flatten same-connective nesting throughout a clause
#[must_use]
pub fn flatten(clause: Clause) -> Clause {
    let root = Arc::new(clause);
    let flattened = flatten_shared(&root);
    drop(root);
    Arc::unwrap_or_clone(flattened)
}

pub(crate) fn flatten_shared(clause: &Arc<Clause>) -> Arc<Clause> {
    let Clause::Compound(compound) = clause.as_ref() else {
        return Arc::clone(clause);
    };

    let mut changed = false;
    let mut operands = Vec::with_capacity(compound.operands.len());
    for operand in &compound.operands {
        let flattened = flatten_shared(operand);
        changed |= !Arc::ptr_eq(&flattened, operand);
        match flattened.as_ref() {
            Clause::Compound(nested) if nested.connective == compound.connective => {
                operands.extend(nested.operands.iter().cloned());
                changed = true;
            }
            _ => operands.push(flattened),
        }
    }

    if changed {
        Arc::new(Clause::Compound(Compound::from_shared(compound.connective, operands)))
    } else {
        Arc::clone(clause)
    }
}
