use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use itertools::Itertools;
use tracing::trace;

use crate::{
    error::SyntaxError,
    lexer::{tokenize, Associativity, Lexeme, Operator, Token},
};

/// Reorders infix lexemes into postfix order (shunting-yard).
///
/// Operands and binary operators must alternate; a token out of place is a
/// syntax error at its offset. A formula that simply ends early, such as
/// `x1 &`, is left for the evaluator to reject.
pub fn to_postfix(lexemes: &[Lexeme]) -> Result<Vec<Token>, SyntaxError> {
    let mut output = Vec::with_capacity(lexemes.len());
    let mut stack: Vec<&Lexeme> = Vec::new();
    let mut expect_operand = true;

    for lexeme in lexemes {
        match &lexeme.token {
            Token::Variable(_) | Token::Constant(_) => {
                expect_position(lexeme, expect_operand, true)?;
                expect_operand = false;

                output.push(lexeme.token.clone());
            }

            Token::Operator(incoming) => {
                // NOT is prefix and sits where an operand is expected.
                let unary = *incoming == Operator::Not;
                expect_position(lexeme, expect_operand, unary)?;
                expect_operand = true;

                while let Some(&top) = stack.last().and_then(|entry| entry.token.as_operator()) {
                    if !yields_to(top, *incoming) {
                        break;
                    }

                    output.push(top.into());
                    stack.pop();
                }

                stack.push(lexeme);
            }

            Token::LeftParen => {
                expect_position(lexeme, expect_operand, true)?;
                stack.push(lexeme);
            }

            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Lexeme {
                            token: Token::LeftParen,
                            ..
                        }) => break,
                        Some(entry) => output.push(entry.token.clone()),
                        None => {
                            return Err(SyntaxError::UnbalancedParentheses {
                                offset: lexeme.span.start,
                            })
                        }
                    }
                }

                expect_position(lexeme, expect_operand, false)?;
            }
        }
    }

    while let Some(entry) = stack.pop() {
        if entry.token.is_left_paren() {
            return Err(SyntaxError::UnbalancedParentheses {
                offset: entry.span.start,
            });
        }

        output.push(entry.token.clone());
    }

    Ok(output)
}

fn expect_position(
    lexeme: &Lexeme,
    expect_operand: bool,
    is_operand: bool,
) -> Result<(), SyntaxError> {
    if expect_operand != is_operand {
        return Err(SyntaxError::UnexpectedToken {
            offset: lexeme.span.start,
            found: lexeme.token.to_string(),
        });
    }

    Ok(())
}

// Whether `top` must be emitted before `incoming` is pushed.
fn yields_to(top: Operator, incoming: Operator) -> bool {
    top.precedence() > incoming.precedence()
        || (top.precedence() == incoming.precedence()
            && incoming.associativity() == Associativity::Left)
}

/// A formula that has been tokenized and put into postfix order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFormula {
    text: String,
    tokens: Vec<Token>,
    postfix: Vec<Token>,
    variables: Vec<String>,
}

impl CompiledFormula {
    pub fn compile(text: &str) -> Result<Self, SyntaxError> {
        let lexemes = tokenize(text)?;
        let postfix = to_postfix(&lexemes)?;

        let tokens = lexemes
            .into_iter()
            .map(|lexeme| lexeme.token)
            .collect::<Vec<_>>();

        let variables = tokens
            .iter()
            .filter_map(|token| token.as_variable())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let formula = CompiledFormula {
            text: text.to_owned(),
            tokens,
            postfix,
            variables,
        };

        trace!(
            formula = text,
            postfix = %formula.postfix_string(),
            "compiled formula"
        );

        Ok(formula)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Distinct variable names, lower-cased and sorted by byte order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn postfix_string(&self) -> String {
        self.postfix.iter().join(" ")
    }
}

impl FromStr for CompiledFormula {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        CompiledFormula::compile(text)
    }
}

impl Display for CompiledFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
