use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::{
    compiler::CompiledFormula,
    error::{Error, RangeError},
    evaluate::{row_inputs, Assignment, Evaluate},
};

/// Largest variable count whose row indices fit a 64-bit shift.
pub const MAX_VARIABLES: usize = 62;

/// Bound used by [`TableGenerator::default`]: about a million rows.
pub const DEFAULT_MAX_VARIABLES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TruthRow {
    inputs: Vec<bool>,
    output: bool,
}

impl TruthRow {
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    pub fn output(&self) -> bool {
        self.output
    }
}

impl Display for TruthRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .inputs
            .iter()
            .map(|&input| u8::from(input).to_string())
            .chain(["|".to_owned(), u8::from(self.output).to_string()])
            .join(" ");

        write!(f, "{cells}")
    }
}

/// The value of a Boolean function at every input combination.
///
/// Row `k` holds the binary form of `k` with the first variable as the most
/// significant bit, so there are always `2^n` rows (one row when there are no
/// variables).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<TruthRow>,
}

impl TruthTable {
    pub fn from_formula(text: &str) -> Result<Self, Error> {
        TableGenerator::default().from_formula(text)
    }

    pub fn from_number(n: usize, num: u64) -> Result<Self, RangeError> {
        TableGenerator::default().from_number(n, num)
    }

    pub fn from_fn(n: usize, function: impl Fn(&[bool]) -> bool) -> Result<Self, RangeError> {
        TableGenerator::default().from_fn(n, function)
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn outputs(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(TruthRow::output)
    }

    /// The output column as `0`/`1` characters in row order.
    pub fn bits(&self) -> String {
        self.outputs().map(|output| if output { '1' } else { '0' }).collect()
    }

    /// Packs the output column back into a function index, row `k` becoming
    /// bit `k`. `None` when the table has more than 64 rows.
    pub fn function_index(&self) -> Option<u64> {
        (self.rows.len() <= 64).then(|| {
            self.outputs()
                .enumerate()
                .fold(0, |num, (k, output)| num | (u64::from(output) << k))
        })
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self
            .variables
            .iter()
            .map(String::as_str)
            .chain(["|", "f"])
            .join(" ");

        write!(f, "{header}")?;

        for row in &self.rows {
            write!(f, "\n{row}")?;
        }

        Ok(())
    }
}

/// Builds truth tables, refusing variable counts above a configurable bound
/// before any row is allocated. Rows are reserved fallibly, so a bound raised
/// past what memory can hold still ends in a [`RangeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableGenerator {
    max_variables: usize,
}

impl Default for TableGenerator {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl TableGenerator {
    /// The bound is clamped to [`MAX_VARIABLES`].
    pub fn new(max_variables: usize) -> Self {
        Self {
            max_variables: max_variables.min(MAX_VARIABLES),
        }
    }

    pub fn max_variables(&self) -> usize {
        self.max_variables
    }

    pub fn from_formula(&self, text: &str) -> Result<TruthTable, Error> {
        let formula = CompiledFormula::compile(text)?;
        self.from_compiled(&formula)
    }

    /// Columns are the formula's own variables in sorted order.
    pub fn from_compiled(&self, formula: &CompiledFormula) -> Result<TruthTable, Error> {
        self.from_compiled_over(formula, formula.variables())
    }

    pub fn from_formula_over<S: AsRef<str>>(
        &self,
        text: &str,
        variables: &[S],
    ) -> Result<TruthTable, Error> {
        let formula = CompiledFormula::compile(text)?;
        self.from_compiled_over(&formula, variables)
    }

    /// Evaluates `formula` with the caller's column order. A formula variable
    /// missing from `variables` fails with an unbound-variable error.
    pub fn from_compiled_over<S: AsRef<str>>(
        &self,
        formula: &CompiledFormula,
        variables: &[S],
    ) -> Result<TruthTable, Error> {
        let variables = variables
            .iter()
            .map(|variable| variable.as_ref().to_lowercase())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let n = variables.len();
        self.check_variable_count(n, 0)?;

        debug!(
            formula = formula.text(),
            variables = n,
            rows = 1u64 << n,
            "building truth table from formula"
        );

        let mut assignment = Assignment::for_row(&variables, 0);
        let mut rows = allocate_rows(n)?;

        for index in 0..1u64 << n {
            let inputs = row_inputs(n, index);
            assignment.rebind(&inputs);

            let output = formula.evaluate(&assignment)?;
            rows.push(TruthRow { inputs, output });
        }

        Ok(TruthTable { variables, rows })
    }

    /// Unpacks a function index: row `k` takes bit `k` of `num`. Variables are
    /// named `x1..xn`.
    pub fn from_number(&self, n: usize, num: u64) -> Result<TruthTable, RangeError> {
        self.from_number_with_prefix(n, num, "x")
    }

    /// [`from_number`](Self::from_number) with variables named
    /// `{prefix}1..{prefix}n`.
    pub fn from_number_with_prefix(
        &self,
        n: usize,
        num: u64,
        prefix: &str,
    ) -> Result<TruthTable, RangeError> {
        self.check_variable_count(n, 1)?;

        let row_count = 1u64 << n;
        if row_count < 64 && num >> row_count != 0 {
            return Err(RangeError::FunctionIndex { n, num });
        }

        debug!(variables = n, num, rows = row_count, "building truth table from number");

        let mut rows = allocate_rows(n)?;
        rows.extend((0..row_count).map(|index| TruthRow {
            inputs: row_inputs(n, index),
            output: index < 64 && (num >> index) & 1 == 1,
        }));

        Ok(TruthTable {
            variables: prefixed_variables(prefix, n),
            rows,
        })
    }

    /// Tabulates a Rust predicate over `x1..xn`.
    pub fn from_fn(
        &self,
        n: usize,
        function: impl Fn(&[bool]) -> bool,
    ) -> Result<TruthTable, RangeError> {
        self.check_variable_count(n, 0)?;

        debug!(variables = n, rows = 1u64 << n, "building truth table from function");

        let mut rows = allocate_rows(n)?;
        rows.extend((0..1u64 << n).map(|index| {
            let inputs = row_inputs(n, index);
            let output = function(&inputs);

            TruthRow { inputs, output }
        }));

        Ok(TruthTable {
            variables: default_variables(n),
            rows,
        })
    }

    fn check_variable_count(&self, n: usize, min: usize) -> Result<(), RangeError> {
        if n < min || n > self.max_variables {
            return Err(RangeError::VariableCount {
                n,
                min,
                max: self.max_variables,
            });
        }

        Ok(())
    }
}

fn allocate_rows(n: usize) -> Result<Vec<TruthRow>, RangeError> {
    let mut rows = Vec::new();

    usize::try_from(1u64 << n)
        .ok()
        .and_then(|count| rows.try_reserve_exact(count).ok())
        .ok_or(RangeError::RowAllocation { n })?;

    Ok(rows)
}

/// `x1, x2, ..., xn`.
pub fn default_variables(n: usize) -> Vec<String> {
    prefixed_variables("x", n)
}

pub fn prefixed_variables(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}
