use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    compiler::CompiledFormula,
    error::{EvaluationError, MalformedReason},
    lexer::{Operator, Token},
};

/// Truth values bound to variable names.
///
/// Names are lower-cased on the way in, matching how the lexer normalizes
/// variable tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment(IndexMap<String, bool>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variables` to the row-`index` input tuple of a truth table.
    pub fn for_row(variables: &[String], index: u64) -> Self {
        Assignment(
            variables
                .iter()
                .cloned()
                .zip(row_inputs(variables.len(), index))
                .collect(),
        )
    }

    // Overwrites values in binding order, keeping the names.
    pub(crate) fn rebind(&mut self, inputs: &[bool]) {
        for (value, &input) in self.0.values_mut().zip(inputs) {
            *value = input;
        }
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: bool) -> Option<bool> {
        self.0.insert(name.as_ref().to_lowercase(), value)
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    // Variable tokens are already lower-case.
    fn lookup(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }
}

impl<S: AsRef<str>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        let mut assignment = Assignment::new();

        for (name, value) in iter {
            assignment.insert(name, value);
        }

        assignment
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literals = self
            .0
            .iter()
            .map(|(name, &value)| if value { name.clone() } else { format!("!{name}") })
            .join(", ");

        write!(f, "{{{literals}}}")
    }
}

/// Input tuple of row `index` in a table over `n` variables.
///
/// The first variable is the most significant bit of the index. Every table
/// construction path goes through this function so that rows line up.
pub fn row_inputs(n: usize, index: u64) -> Vec<bool> {
    (0..n).map(|i| (index >> (n - 1 - i)) & 1 == 1).collect()
}

pub trait Evaluate {
    fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvaluationError>;
}

impl Evaluate for [Token] {
    fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvaluationError> {
        let mut stack = Vec::with_capacity(self.len());

        for token in self {
            let value = match token {
                Token::Variable(name) => {
                    assignment
                        .lookup(name)
                        .ok_or_else(|| EvaluationError::UnboundVariable { name: name.clone() })?
                }

                Token::Constant(value) => *value,

                Token::Operator(operator) => {
                    let right = pop_operand(&mut stack, *operator)?;

                    match operator {
                        Operator::Not => !right,
                        Operator::And => pop_operand(&mut stack, *operator)? && right,
                        Operator::Or => pop_operand(&mut stack, *operator)? || right,
                        Operator::Xor => pop_operand(&mut stack, *operator)? ^ right,
                        Operator::Implies => !pop_operand(&mut stack, *operator)? || right,
                        Operator::Equivalent => pop_operand(&mut stack, *operator)? == right,
                    }
                }

                Token::LeftParen | Token::RightParen => {
                    return Err(EvaluationError::MalformedExpression {
                        reason: MalformedReason::Parenthesis,
                    })
                }
            };

            stack.push(value);
        }

        match stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(EvaluationError::MalformedExpression {
                reason: MalformedReason::LeftoverStack { depth: stack.len() },
            }),
        }
    }
}

impl Evaluate for CompiledFormula {
    fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvaluationError> {
        self.postfix().evaluate(assignment)
    }
}

fn pop_operand(stack: &mut Vec<bool>, operator: Operator) -> Result<bool, EvaluationError> {
    stack.pop().ok_or(EvaluationError::MalformedExpression {
        reason: MalformedReason::MissingOperand {
            operator: operator.name(),
        },
    })
}
