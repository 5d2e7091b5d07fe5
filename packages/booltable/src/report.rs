use std::fmt::Display;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::{
    equivalence::{compare_formulas, Equivalence},
    error::Error,
    normal_forms::{ConjunctiveNormalForm, DisjunctiveNormalForm, NormalFormCost},
    truth_table::{TableGenerator, TruthTable},
};

/// A truth table bundled with both canonical forms and their costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: TruthTable,
    pub dnf: String,
    pub knf: String,
    pub dnf_cost: NormalFormCost,
    pub knf_cost: NormalFormCost,
}

impl From<TruthTable> for TableReport {
    fn from(table: TruthTable) -> Self {
        let dnf = DisjunctiveNormalForm::from_truth_table(&table);
        let knf = ConjunctiveNormalForm::from_truth_table(&table);

        TableReport {
            dnf: dnf.to_string(),
            knf: knf.to_string(),
            dnf_cost: dnf.cost(),
            knf_cost: knf.cost(),
            table,
        }
    }
}

impl Display for TableReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.table)?;
        writeln!(f)?;
        writeln!(f, "DNF: {}", self.dnf)?;
        writeln!(f, "DNF cost: {}", self.dnf_cost)?;
        writeln!(f, "KNF: {}", self.knf)?;
        write!(f, "KNF cost: {}", self.knf_cost)
    }
}

/// Ready-made walkthroughs of the three ways into a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[strum(serialize = "number")]
    Number,
    #[strum(serialize = "implication")]
    Implication,
    #[strum(serialize = "equivalence")]
    Equivalence,
}

impl Preset {
    pub const IMPLICATION: &'static str = "(x1 | x2) -> x3";
    pub const EQUIVALENCE: &'static str = "(x1 & !x2) | x3";

    pub fn description(self) -> &'static str {
        match self {
            Preset::Number => {
                "n = 3, num = 11: row k (x1 as its high bit) takes bit k of 11, \
                 so rows 000..111 give 1 1 0 1 0 0 0 0"
            }
            Preset::Implication => "(x1 | x2) -> x3, false exactly at 010, 100 and 110",
            Preset::Equivalence => "(x1 & !x2) | x3 compared with its own canonical DNF",
        }
    }

    pub fn run(self, generator: &TableGenerator) -> Result<PresetOutcome, Error> {
        match self {
            Preset::Number => Ok(PresetOutcome::Table(generator.from_number(3, 11)?.into())),
            Preset::Implication => Ok(PresetOutcome::Table(
                generator.from_formula(Preset::IMPLICATION)?.into(),
            )),
            Preset::Equivalence => {
                let report = TableReport::from(generator.from_formula(Preset::EQUIVALENCE)?);
                let result = compare_formulas(generator, Preset::EQUIVALENCE, &report.dnf)?;

                Ok(PresetOutcome::Comparison {
                    formula: Preset::EQUIVALENCE.to_owned(),
                    report,
                    result,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetOutcome {
    Table(TableReport),
    /// `formula` checked against the DNF held in `report`.
    Comparison {
        formula: String,
        report: TableReport,
        result: Equivalence,
    },
}

impl PresetOutcome {
    pub fn report(&self) -> &TableReport {
        match self {
            PresetOutcome::Table(report) | PresetOutcome::Comparison { report, .. } => report,
        }
    }
}
