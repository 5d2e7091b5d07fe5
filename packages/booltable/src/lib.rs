//! Truth tables, canonical normal forms and equivalence checking for Boolean
//! functions given as infix formulas or as packed function indices.

pub mod compiler;
pub mod equivalence;
pub mod error;
pub mod evaluate;
pub mod lexer;
pub mod normal_forms;
pub mod report;
pub mod truth_table;

pub use compiler::CompiledFormula;
pub use equivalence::{compare_formulas, compare_number_to_formula, compare_tables, Equivalence};
pub use error::{EvaluationError, Error, IncomparableError, RangeError, SyntaxError};
pub use evaluate::{Assignment, Evaluate};
pub use normal_forms::{ConjunctiveNormalForm, DisjunctiveNormalForm, NormalFormCost};
pub use report::{Preset, PresetOutcome, TableReport};
pub use truth_table::{TableGenerator, TruthRow, TruthTable};

/// Tokenizes `text` and puts it into postfix order.
pub fn compile_formula(text: &str) -> Result<CompiledFormula, SyntaxError> {
    CompiledFormula::compile(text)
}

/// Runs the formula's postfix form under `assignment`.
pub fn evaluate(
    formula: &CompiledFormula,
    assignment: &Assignment,
) -> Result<bool, EvaluationError> {
    formula.evaluate(assignment)
}

/// Table over the formula's sorted variables, bounded by the default generator.
pub fn table_from_formula(text: &str) -> Result<TruthTable, Error> {
    TruthTable::from_formula(text)
}

/// Table over `x1..xn` whose row `k` holds bit `k` of `num`.
pub fn table_from_number(n: usize, num: u64) -> Result<TruthTable, RangeError> {
    TruthTable::from_number(n, num)
}

/// Canonical DNF, `"0"` when no row is true.
pub fn dnf(table: &TruthTable) -> String {
    DisjunctiveNormalForm::from_truth_table(table).to_string()
}

/// Canonical KNF, `"1"` when no row is false.
pub fn knf(table: &TruthTable) -> String {
    ConjunctiveNormalForm::from_truth_table(table).to_string()
}

/// Literal and connective counts of [`dnf`].
pub fn dnf_cost(table: &TruthTable) -> NormalFormCost {
    DisjunctiveNormalForm::from_truth_table(table).cost()
}

/// Literal and connective counts of [`knf`].
pub fn knf_cost(table: &TruthTable) -> NormalFormCost {
    ConjunctiveNormalForm::from_truth_table(table).cost()
}

/// Table, both normal forms and their costs for a function index.
pub fn report_from_number(n: usize, num: u64) -> Result<TableReport, RangeError> {
    Ok(table_from_number(n, num)?.into())
}

/// Table, both normal forms and their costs for a formula.
pub fn report_from_formula(text: &str) -> Result<TableReport, Error> {
    Ok(table_from_formula(text)?.into())
}
