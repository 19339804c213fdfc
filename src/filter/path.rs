//! Path addressing inside a filter tree
//!
//! A path is a sequence of encoded operand positions. Position 0 of an
//! encoded compound clause is its connective, so the first operand sits at
//! position 1. The empty path addresses the root.

use std::ops::Range;
use std::sync::Arc;

use crate::error::{FilterError, Result};
use crate::filter::clause::{Clause, Compound};

fn expect_compound<'a>(clause: &'a Clause, path: &[usize], depth: usize) -> Result<&'a Compound> {
    clause.as_compound().ok_or_else(|| FilterError::NotCompound {
        path: path[..depth].to_vec(),
    })
}

fn resolve_operand<'a>(compound: &'a Compound, path: &[usize], position: usize) -> Result<&'a Arc<Clause>> {
    compound
        .operand(position)
        .ok_or_else(|| FilterError::PathOutOfRange {
            path: path.to_vec(),
            position,
        })
}

impl Clause {
    /// Resolve `path` to the sub-clause it addresses
    pub fn get(&self, path: &[usize]) -> Result<&Self> {
        let mut current = self;
        for (depth, &position) in path.iter().enumerate() {
            let compound = expect_compound(current, path, depth)?;
            current = resolve_operand(compound, path, position)?.as_ref();
        }
        Ok(current)
    }

    /// The compound clause addressed by `path`
    pub fn get_compound(&self, path: &[usize]) -> Result<&Compound> {
        expect_compound(self.get(path)?, path, path.len())
    }
}

/// Rebuild `compound` with the operands in `range` replaced by `replacement`.
///
/// `range` indexes the operand list directly (not encoded positions).
/// Untouched operands are shared with the original.
pub(crate) fn splice_operands(
    compound: &Compound,
    range: Range<usize>,
    replacement: impl IntoIterator<Item = Arc<Clause>>,
) -> Compound {
    let mut operands = compound.operands.clone();
    operands.splice(range, replacement);
    Compound::from_shared(compound.connective, operands)
}

/// Return a copy of `root` with the clause at `path` replaced
pub(crate) fn replace_at(root: &Clause, path: &[usize], replacement: Clause) -> Result<Clause> {
    replace_from(root, path, 0, replacement)
}

fn replace_from(clause: &Clause, path: &[usize], depth: usize, replacement: Clause) -> Result<Clause> {
    let Some(&position) = path.get(depth) else {
        return Ok(replacement);
    };
    let compound = expect_compound(clause, path, depth)?;
    let operand = resolve_operand(compound, path, position)?;
    let updated = replace_from(operand, path, depth + 1, replacement)?;
    Ok(Clause::Compound(splice_operands(compound, position - 1..position, [Arc::new(updated)])))
}

/// Return a copy of `root` without the clause at `path`.
///
/// The path must be non-empty; the parent is left as is even when it ends up
/// with fewer than two operands, consolidation takes care of that.
pub(crate) fn remove_at(root: &Clause, path: &[usize]) -> Result<Clause> {
    remove_from(root, path, 0)
}

fn remove_from(clause: &Clause, path: &[usize], depth: usize) -> Result<Clause> {
    let compound = expect_compound(clause, path, depth)?;
    let position = path[depth];
    let operand = resolve_operand(compound, path, position)?;

    let spliced = if depth + 1 == path.len() {
        splice_operands(compound, position - 1..position, std::iter::empty())
    } else {
        let updated = remove_from(operand, path, depth + 1)?;
        splice_operands(compound, position - 1..position, [Arc::new(updated)])
    };
    Ok(Clause::Compound(spliced))
}

/// Every clause of `expr` in pre-order, paired with the path addressing it
#[must_use]
pub fn filter_paths(expr: Option<&Clause>) -> Vec<(Vec<usize>, &Clause)> {
    let mut paths = Vec::new();
    if let Some(root) = expr {
        collect_paths(root, &mut Vec::new(), &mut paths);
    }
    paths
}

fn collect_paths<'a>(clause: &'a Clause, current: &mut Vec<usize>, paths: &mut Vec<(Vec<usize>, &'a Clause)>) {
    paths.push((current.clone(), clause));
    if let Clause::Compound(compound) = clause {
        for (index, operand) in compound.operands.iter().enumerate() {
            current.push(index + 1);
            collect_paths(operand, current, paths);
            current.pop();
        }
    }
}
