//! Recursive-descent parser for modal formulas.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! implies := or ( "->" implies )?
//! or      := and ( "||" and )*
//! and     := unary ( "&&" unary )*
//! unary   := "!" unary | "#" unary | "@" unary | "(" implies ")" | IDENT
//! ```
//!
//! Implication is right-associative, `&&` binds tighter than `||`, and the
//! prefix operators bind tightest and may be stacked (`!#P`).
//!
//! Nesting is limited to [`MAX_DEPTH`] levels, both for the recursion of the
//! parser itself and for the depth of the resulting tree. Deeper input fails
//! with [`SyntaxError::TooDeep`] instead of exhausting the stack.

use std::ops::Range;

use log::debug;

use crate::ast::Formula;
use crate::error::{Error, Found, SyntaxError};
use crate::token::{tokenize_spanned, Token};

/// Maximum nesting depth of a parsed formula.
pub const MAX_DEPTH: usize = 256;

/// A subformula together with its depth.
type Parsed = (Formula, usize);

/// Parser state over a borrowed sequence of spanned tokens.
pub struct Parser<'a> {
    tokens: &'a [(Token, Range<usize>)],
    pos: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, Range<usize>)]) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    /// Byte offset of the token at `pos`.
    fn offset(&self, pos: usize) -> usize {
        self.tokens[pos].1.start
    }

    fn found(&self) -> Found {
        match self.tokens.get(self.pos) {
            Some((token, span)) => Found::Token {
                token: token.clone(),
                offset: span.start,
            },
            None => Found::EndOfInput,
        }
    }

    fn too_deep(&self) -> SyntaxError {
        SyntaxError::TooDeep {
            limit: MAX_DEPTH,
            found: self.found(),
        }
    }

    /// Depth of a new node over children of depth `depth`.
    fn deepen(&self, depth: usize) -> Result<usize, SyntaxError> {
        if depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(depth + 1)
    }

    /// Runs `f` one recursion level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>) -> Result<T, SyntaxError> {
        if self.nesting >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    /// Consumes the next token if it equals `expected`.
    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Fails unless the next token can start an operand of `operator`.
    fn expect_operand_of(&self, operator: &Token) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(token) if token.begins_operand() => Ok(()),
            _ => Err(SyntaxError::MissingOperand {
                operator: operator.clone(),
                found: self.found(),
            }),
        }
    }

    /// Parses a complete formula, rejecting trailing tokens.
    pub fn parse(mut self) -> Result<Formula, SyntaxError> {
        let (formula, _) = self.parse_implies()?;
        if self.peek().is_some() {
            return Err(SyntaxError::TrailingTokens { found: self.found() });
        }
        Ok(formula)
    }

    fn parse_implies(&mut self) -> Result<Parsed, SyntaxError> {
        let (left, left_depth) = self.parse_or()?;
        if self.eat(&Token::Implies) {
            self.expect_operand_of(&Token::Implies)?;
            let (right, right_depth) = self.nested(Self::parse_implies)?;
            let depth = self.deepen(left_depth.max(right_depth))?;
            debug!("parse: implies at token #{}", self.pos);
            return Ok((left.implies(right), depth));
        }
        Ok((left, left_depth))
    }

    fn parse_or(&mut self) -> Result<Parsed, SyntaxError> {
        let (mut left, mut depth) = self.parse_and()?;
        while self.eat(&Token::Or) {
            self.expect_operand_of(&Token::Or)?;
            let (right, right_depth) = self.parse_and()?;
            depth = self.deepen(depth.max(right_depth))?;
            left = left.or(right);
        }
        Ok((left, depth))
    }

    fn parse_and(&mut self) -> Result<Parsed, SyntaxError> {
        let (mut left, mut depth) = self.parse_unary()?;
        while self.eat(&Token::And) {
            self.expect_operand_of(&Token::And)?;
            let (right, right_depth) = self.parse_unary()?;
            depth = self.deepen(depth.max(right_depth))?;
            left = left.and(right);
        }
        Ok((left, depth))
    }

    fn parse_unary(&mut self) -> Result<Parsed, SyntaxError> {
        let Some(token) = self.peek() else {
            return Err(SyntaxError::ExpectedOperand { found: Found::EndOfInput });
        };
        match token {
            Token::Not | Token::Square | Token::Diamond => {
                self.pos += 1;
                self.expect_operand_of(token)?;
                let (inner, depth) = self.nested(Self::parse_unary)?;
                let depth = self.deepen(depth)?;
                let formula = match token {
                    Token::Not => inner.not(),
                    Token::Square => inner.square(),
                    _ => inner.diamond(),
                };
                Ok((formula, depth))
            }
            Token::LParen => {
                let open = self.offset(self.pos);
                self.pos += 1;
                self.expect_operand_of(token)?;
                let inner = self.nested(Self::parse_implies)?;
                if !self.eat(&Token::RParen) {
                    return Err(SyntaxError::UnclosedParen { open, found: self.found() });
                }
                Ok(inner)
            }
            Token::Ident(name) => {
                self.pos += 1;
                Ok((Formula::var(name.as_str()), 1))
            }
            _ => Err(SyntaxError::ExpectedOperand { found: self.found() }),
        }
    }
}

/// Parses a sequence of spanned tokens into a formula.
pub fn parse(tokens: &[(Token, Range<usize>)]) -> Result<Formula, SyntaxError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses `text`.
///
/// ```
/// use kripke_rs::ast::Formula;
/// use kripke_rs::parser::parse_formula;
///
/// let f = parse_formula("A && B || C").unwrap();
/// assert_eq!(f, Formula::var("A").and(Formula::var("B")).or(Formula::var("C")));
/// ```
pub fn parse_formula(text: &str) -> Result<Formula, Error> {
    let tokens = tokenize_spanned(text)?;
    let formula = parse(&tokens)?;
    debug!("parse_formula({:?}) -> {}", text, formula);
    Ok(formula)
}
