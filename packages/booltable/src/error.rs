use thiserror::Error;

/// Rejected formula text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedCharacter { offset: usize, found: char },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },

    #[error("unbalanced parentheses at offset {offset}")]
    UnbalancedParentheses { offset: usize },
}

/// Failure while running a postfix sequence against an assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("variable {name} is not bound by the assignment")]
    UnboundVariable { name: String },

    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: MalformedReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// An operator found fewer operands on the stack than its arity.
    MissingOperand { operator: &'static str },
    /// The evaluation stack did not end with exactly one value.
    LeftoverStack { depth: usize },
    /// Parentheses never survive compilation into postfix form.
    Parenthesis,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::MissingOperand { operator } => {
                write!(f, "not enough operands for {operator}")
            }
            MalformedReason::LeftoverStack { depth } => {
                write!(f, "expected one value on the stack, found {depth}")
            }
            MalformedReason::Parenthesis => write!(f, "parenthesis in postfix sequence"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("variable count {n} is outside {min}..={max}")]
    VariableCount { n: usize, min: usize, max: usize },

    #[error("function index {num} does not fit in a table of {n} variables")]
    FunctionIndex { n: usize, num: u64 },

    #[error("cannot allocate the 2^{n} rows of a table of {n} variables")]
    RowAllocation { n: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot compare a table of {left} variables with a table of {right} variables")]
pub struct IncomparableError {
    pub left: usize,
    pub right: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Incomparable(#[from] IncomparableError),
}
