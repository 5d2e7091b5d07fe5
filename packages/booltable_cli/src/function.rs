use std::str::FromStr;

use booltable::{
    equivalence::shared_columns, truth_table::prefixed_variables, CompiledFormula, Error,
    TableGenerator, TruthTable,
};

/// A Boolean function named on the command line: `n:num` for a function
/// index, anything else is a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSource {
    Number { n: usize, num: u64 },
    Formula(String),
}

impl FromStr for FunctionSource {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        // `:` never appears in a formula.
        let Some((n, num)) = input.split_once(':') else {
            return Ok(FunctionSource::Formula(input.to_owned()));
        };

        let n = n
            .trim()
            .parse()
            .map_err(|_| format!("invalid variable count: \"{n}\""))?;
        let num = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid function index: \"{num}\""))?;

        Ok(FunctionSource::Number { n, num })
    }
}

impl FunctionSource {
    /// `prefix` names the columns of a function index.
    pub fn table(&self, generator: &TableGenerator, prefix: &str) -> Result<TruthTable, Error> {
        match self {
            FunctionSource::Number { n, num } => {
                Ok(generator.from_number_with_prefix(*n, *num, prefix)?)
            }
            FunctionSource::Formula(text) => generator.from_formula(text),
        }
    }

    fn table_over(
        &self,
        generator: &TableGenerator,
        prefix: &str,
        columns: &[String],
    ) -> Result<TruthTable, Error> {
        match self {
            FunctionSource::Number { n, num } => {
                Ok(generator.from_number_with_prefix(*n, *num, prefix)?)
            }
            FunctionSource::Formula(text) => generator.from_formula_over(text, columns),
        }
    }
}

/// Builds both tables over a shared column list so they can be compared row by
/// row: `{prefix}1..{prefix}n` when either side is a function index, otherwise
/// the union of both formulas' variables.
pub fn comparable_tables(
    generator: &TableGenerator,
    prefix: &str,
    left: &FunctionSource,
    right: &FunctionSource,
) -> Result<(TruthTable, TruthTable), Error> {
    let columns = match (left, right) {
        (FunctionSource::Number { n, .. }, _) | (_, FunctionSource::Number { n, .. }) => {
            prefixed_variables(prefix, *n)
        }
        (FunctionSource::Formula(left), FunctionSource::Formula(right)) => shared_columns(
            &CompiledFormula::compile(left)?,
            &CompiledFormula::compile(right)?,
        ),
    };

    Ok((
        left.table_over(generator, prefix, &columns)?,
        right.table_over(generator, prefix, &columns)?,
    ))
}
