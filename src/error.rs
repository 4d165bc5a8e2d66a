//! Error types for every stage of the pipeline.
//!
//! Each stage has its own error type, so callers who only tokenize or only
//! evaluate can match on exactly what that stage may produce. The umbrella
//! [`Error`] wraps all of them and is what the end-to-end helpers in
//! [`pipeline`][crate::pipeline] return.

use std::fmt;

use thiserror::Error;

use crate::token::Token;

/// An unrecognized character sequence in a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input `{fragment}` at offset {offset}")]
pub struct LexError {
    /// The offending source fragment.
    pub fragment: String,
    /// Byte offset of the fragment in the source string.
    pub offset: usize,
}

/// What the parser found where it expected something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// A token, with the byte offset where it starts in the source.
    Token { token: Token, offset: usize },
    /// The token sequence ran out.
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token { token, offset } => write!(f, "`{}` at offset {}", token, offset),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A structurally invalid token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// An operator is not followed by a valid operand.
    #[error("missing operand for `{operator}`: found {found}")]
    MissingOperand { operator: Token, found: Found },

    /// A `(` is never closed. `open` is the byte offset of the `(`.
    #[error("unbalanced parenthesis opened at offset {open}: expected `)`, found {found}")]
    UnclosedParen { open: usize, found: Found },

    /// A complete formula was parsed but tokens remain.
    #[error("unexpected trailing {found}")]
    TrailingTokens { found: Found },

    /// The formula does not start with an operand.
    #[error("expected an operand, found {found}")]
    ExpectedOperand { found: Found },

    /// The formula nests deeper than [`MAX_DEPTH`][crate::parser::MAX_DEPTH].
    #[error("formula nests deeper than {limit} levels, at {found}")]
    TooDeep { limit: usize, found: Found },
}

impl SyntaxError {
    /// The offending token or end-of-input marker.
    pub fn found(&self) -> &Found {
        match self {
            SyntaxError::MissingOperand { found, .. }
            | SyntaxError::UnclosedParen { found, .. }
            | SyntaxError::TrailingTokens { found }
            | SyntaxError::ExpectedOperand { found }
            | SyntaxError::TooDeep { found, .. } => found,
        }
    }
}

/// A malformed model description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing `{section}` section")]
    MissingSection { section: &'static str },

    #[error("line {line}: world `{world}` is used in `access` but not defined in `worlds`")]
    UndefinedWorld { world: String, line: usize },

    #[error("line {line}: invalid world name `{world}`, expected an identifier")]
    InvalidWorldName { world: String, line: usize },

    #[error("line {line}: world `{world}` is defined more than once")]
    DuplicateWorld { world: String, line: usize },

    #[error("line {line}: malformed assignment `{text}`, expected `<var>=<0|1>`")]
    MalformedAssignment { text: String, line: usize },

    #[error("line {line}: invalid truth value `{value}`, expected 0 or 1")]
    InvalidTruthValue { value: String, line: usize },

    #[error("line {line}: malformed line `{text}`, expected `<world>: ...`")]
    MalformedLine { text: String, line: usize },

    #[error("`{section}` block is never closed")]
    UnclosedBlock { section: &'static str },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A formula references a variable the model does not define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unbound variable `{name}`")]
pub struct UnboundVariableError {
    pub name: String,
}

/// Inconsistent matrices handed to [`KripkeModel::new`][crate::model::KripkeModel::new].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("valuation matrix has shape {actual:?}, expected {expected:?}")]
    ValuationShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("access matrix has shape {actual:?}, expected {expected:?}")]
    AccessShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{matrix} matrix holds {value} at {row}x{col}, expected 0 or 1")]
    NotBoolean {
        matrix: &'static str,
        row: usize,
        col: usize,
        value: u8,
    },

    #[error("duplicate {kind} name `{name}`")]
    DuplicateName { kind: &'static str, name: String },

    #[error("unknown world `{0}`")]
    UnknownWorld(String),
}

/// Any failure of the parse-and-evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("evaluation error: {0}")]
    UnboundVariable(#[from] UnboundVariableError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_syntax_error_message_mentions_end_of_input() {
        let err = SyntaxError::MissingOperand {
            operator: Token::And,
            found: Found::EndOfInput,
        };
        assert_eq!(err.to_string(), "missing operand for `&&`: found end of input");
        assert_eq!(err.found(), &Found::EndOfInput);
    }

    #[test]
    fn test_found_token_reports_offset() {
        let err = SyntaxError::TrailingTokens {
            found: Found::Token {
                token: Token::RParen,
                offset: 5,
            },
        };
        assert_eq!(err.to_string(), "unexpected trailing `)` at offset 5");
    }

    #[test]
    fn test_umbrella_wraps_stage_errors() {
        let err: Error = FormatError::MissingSection { section: "access" }.into();
        assert!(matches!(err, Error::Format(FormatError::MissingSection { section: "access" })));
        assert_eq!(err.to_string(), "format error: missing `access` section");
    }
}
