use std::{fmt::Display, ops::Range};

use derive_more::derive::Display;
use enum_as_inner::EnumAsInner;
use serde::Serialize;
use strum::EnumIter;
use tracing::trace;
use winnow::{
    combinator::{alt, not, terminated},
    token::{one_of, take_while},
    PResult, Parser,
};

use crate::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// The closed set of logical connectives.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum Operator {
    #[display("!")]
    Not,
    #[display("&")]
    And,
    #[display("|")]
    Or,
    #[display("^")]
    Xor,
    #[display("->")]
    Implies,
    #[display("=")]
    Equivalent,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Not => 5,
            Operator::And => 4,
            Operator::Xor => 3,
            Operator::Or => 2,
            Operator::Implies => 1,
            Operator::Equivalent => 0,
        }
    }

    pub const fn associativity(self) -> Associativity {
        match self {
            Operator::Not | Operator::Implies | Operator::Equivalent => Associativity::Right,
            Operator::And | Operator::Or | Operator::Xor => Associativity::Left,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operator::Not => "NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Implies => "IMPLIES",
            Operator::Equivalent => "EQUIVALENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, Serialize)]
pub enum Token {
    Variable(String),
    Constant(bool),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl From<Operator> for Token {
    fn from(operator: Operator) -> Self {
        Token::Operator(operator)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Variable(name) => write!(f, "{name}"),
            Token::Constant(value) => write!(f, "{}", u8::from(*value)),
            Token::Operator(operator) => write!(f, "{operator}"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Range<usize>,
}

pub fn tokenize(text: &str) -> Result<Vec<Lexeme>, SyntaxError> {
    let mut input = text;
    let mut lexemes = Vec::new();

    loop {
        input = input.trim_start();

        let Some(found) = input.chars().next() else {
            break;
        };

        let start = text.len() - input.len();
        let token = token(&mut input)
            .map_err(|_| SyntaxError::UnexpectedCharacter { offset: start, found })?;
        let end = text.len() - input.len();

        lexemes.push(Lexeme {
            token,
            span: start..end,
        });
    }

    trace!(formula = text, count = lexemes.len(), "tokenized formula");

    Ok(lexemes)
}

fn token(input: &mut &str) -> PResult<Token> {
    alt((word, constant, symbol)).parse_next(input)
}

fn word(input: &mut &str) -> PResult<Token> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_word_char),
    )
        .take()
        .map(|word: &str| keyword(word).unwrap_or_else(|| Token::Variable(word.to_lowercase())))
        .parse_next(input)
}

fn keyword(word: &str) -> Option<Token> {
    let operator = match word.to_ascii_lowercase().as_str() {
        "not" => Operator::Not,
        "and" => Operator::And,
        "or" => Operator::Or,
        "xor" => Operator::Xor,
        "implies" => Operator::Implies,
        "equiv" => Operator::Equivalent,
        _ => return None,
    };

    Some(operator.into())
}

// `10` or `1x` must not lex as a constant followed by something else.
fn constant(input: &mut &str) -> PResult<Token> {
    terminated(one_of(['0', '1']), not(one_of(is_word_char)))
        .map(|digit: char| Token::Constant(digit == '1'))
        .parse_next(input)
}

fn symbol(input: &mut &str) -> PResult<Token> {
    alt((
        alt(("&&", "&")).value(Token::Operator(Operator::And)),
        alt(("||", "|")).value(Token::Operator(Operator::Or)),
        alt(("<->", "<=>", "==")).value(Token::Operator(Operator::Equivalent)),
        alt(("->", "=>")).value(Token::Operator(Operator::Implies)),
        '='.value(Token::Operator(Operator::Equivalent)),
        one_of(['!', '~']).value(Token::Operator(Operator::Not)),
        '^'.value(Token::Operator(Operator::Xor)),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
    ))
    .parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
