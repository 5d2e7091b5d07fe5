use std::{collections::BTreeSet, fmt::Display};

use serde::Serialize;
use tracing::debug;

use crate::{
    compiler::CompiledFormula,
    error::{Error, IncomparableError},
    truth_table::{default_variables, TableGenerator, TruthRow, TruthTable},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Equivalence {
    Equal,
    /// The first row, in canonical order, where the outputs differ.
    NotEqual {
        index: usize,
        left: TruthRow,
        right: TruthRow,
    },
}

impl Equivalence {
    pub fn is_equal(&self) -> bool {
        matches!(self, Equivalence::Equal)
    }

    /// Inputs on which the two functions disagree.
    pub fn counterexample(&self) -> Option<&[bool]> {
        match self {
            Equivalence::Equal => None,
            Equivalence::NotEqual { left, .. } => Some(left.inputs()),
        }
    }
}

impl Display for Equivalence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Equivalence::Equal => write!(f, "equal"),
            Equivalence::NotEqual { index, left, right } => write!(
                f,
                "not equal at row {index}: left {left}, right {right}"
            ),
        }
    }
}

/// Compares two tables row by row. Columns are matched by position only, so
/// the caller is responsible for a consistent variable order.
pub fn compare_tables(
    left: &TruthTable,
    right: &TruthTable,
) -> Result<Equivalence, IncomparableError> {
    if left.variable_count() != right.variable_count() {
        return Err(IncomparableError {
            left: left.variable_count(),
            right: right.variable_count(),
        });
    }

    let result = left
        .rows()
        .iter()
        .zip(right.rows())
        .position(|(l, r)| l.output() != r.output())
        .map_or(Equivalence::Equal, |index| Equivalence::NotEqual {
            index,
            left: left.rows()[index].clone(),
            right: right.rows()[index].clone(),
        });

    debug!(
        variables = left.variable_count(),
        equal = result.is_equal(),
        "compared truth tables"
    );

    Ok(result)
}

/// The sorted union of both formulas' variables.
pub fn shared_columns(left: &CompiledFormula, right: &CompiledFormula) -> Vec<String> {
    left.variables()
        .iter()
        .chain(right.variables())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Compares two formulas, both tabulated over [`shared_columns`], so `a` and
/// `a & (b | !b)` are equal.
pub fn compare_formulas(
    generator: &TableGenerator,
    left: &str,
    right: &str,
) -> Result<Equivalence, Error> {
    let left = CompiledFormula::compile(left)?;
    let right = CompiledFormula::compile(right)?;
    let columns = shared_columns(&left, &right);

    let left = generator.from_compiled_over(&left, &columns)?;
    let right = generator.from_compiled_over(&right, &columns)?;

    Ok(compare_tables(&left, &right)?)
}

/// Compares a function index with a formula over `x1..xn`.
pub fn compare_number_to_formula(
    generator: &TableGenerator,
    n: usize,
    num: u64,
    formula: &str,
) -> Result<Equivalence, Error> {
    let left = generator.from_number(n, num)?;
    let right = generator.from_formula_over(formula, &default_variables(n))?;

    Ok(compare_tables(&left, &right)?)
}
