use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::truth_table::TruthTable;

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Literal(pub String, pub bool);

impl Literal {
    pub fn variable(&self) -> &str {
        &self.0
    }

    pub fn is_positive(&self) -> bool {
        self.1
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "!{}", self.0)
        }
    }
}

/// Size of a raw normal form: every literal, and the connectives counted per
/// clause (one inner connective per clause, one top-level connective).
/// Everything is zero when there are no clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NormalFormCost {
    pub literals: usize,
    pub conjunctions: usize,
    pub disjunctions: usize,
}

impl Display for NormalFormCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "literals: {}, conjunctions: {}, disjunctions: {}",
            self.literals, self.conjunctions, self.disjunctions
        )
    }
}

/// Canonical DNF: one minterm per true row, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DisjunctiveNormalForm(pub Vec<Vec<Literal>>);

impl DisjunctiveNormalForm {
    pub fn from_truth_table(table: &TruthTable) -> Self {
        DisjunctiveNormalForm(clauses(table, true))
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.0
    }

    pub fn cost(&self) -> NormalFormCost {
        let clauses = self.0.len();

        NormalFormCost {
            literals: literal_count(&self.0),
            conjunctions: clauses,
            disjunctions: usize::from(clauses > 0),
        }
    }
}

impl From<&TruthTable> for DisjunctiveNormalForm {
    fn from(table: &TruthTable) -> Self {
        DisjunctiveNormalForm::from_truth_table(table)
    }
}

impl Display for DisjunctiveNormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(&self.0, " & ", " | ", "1", "0"))
    }
}

/// Canonical KNF: one maxterm per false row, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConjunctiveNormalForm(pub Vec<Vec<Literal>>);

impl ConjunctiveNormalForm {
    pub fn from_truth_table(table: &TruthTable) -> Self {
        ConjunctiveNormalForm(clauses(table, false))
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.0
    }

    pub fn cost(&self) -> NormalFormCost {
        let clauses = self.0.len();

        NormalFormCost {
            literals: literal_count(&self.0),
            conjunctions: usize::from(clauses > 0),
            disjunctions: clauses,
        }
    }
}

impl From<&TruthTable> for ConjunctiveNormalForm {
    fn from(table: &TruthTable) -> Self {
        ConjunctiveNormalForm::from_truth_table(table)
    }
}

impl Display for ConjunctiveNormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(&self.0, " | ", " & ", "0", "1"))
    }
}

// Rows whose output equals `polarity` each give one clause. A literal is
// positive when its input agrees with `polarity`: true inputs in a minterm,
// false inputs in a maxterm.
fn clauses(table: &TruthTable, polarity: bool) -> Vec<Vec<Literal>> {
    table
        .rows()
        .iter()
        .filter(|row| row.output() == polarity)
        .map(|row| {
            table
                .variables()
                .iter()
                .zip(row.inputs())
                .map(|(variable, &input)| Literal(variable.clone(), input == polarity))
                .collect()
        })
        .collect()
}

fn literal_count(clauses: &[Vec<Literal>]) -> usize {
    clauses.iter().map(Vec::len).sum()
}

fn render(
    clauses: &[Vec<Literal>],
    inner: &str,
    outer: &str,
    empty_clause: &str,
    no_clauses: &str,
) -> String {
    if clauses.is_empty() {
        return no_clauses.to_owned();
    }

    clauses
        .iter()
        .map(|clause| {
            if clause.is_empty() {
                empty_clause.to_owned()
            } else {
                format!("({})", clause.iter().join(inner))
            }
        })
        .join(outer)
}
