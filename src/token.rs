//! Lexical tokens of modal formulas.

use std::fmt;
use std::ops::Range;

use log::debug;
use logos::Logos;

use crate::error::LexError;

/// A lexical token of a modal formula.
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// `->`
    #[token("->")]
    Implies,
    /// `||`
    #[token("||")]
    Or,
    /// `&&`
    #[token("&&")]
    And,
    /// `!`
    #[token("!")]
    Not,
    /// `#`, necessity (box).
    #[token("#")]
    Square,
    /// `@`, possibility (diamond).
    #[token("@")]
    Diamond,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Propositional variable, such as `P` or `door_open`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),
}

impl Token {
    /// Returns true if this token can start an operand.
    pub fn begins_operand(&self) -> bool {
        matches!(
            self,
            Token::Not | Token::Square | Token::Diamond | Token::LParen | Token::Ident(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Implies => write!(f, "->"),
            Token::Or => write!(f, "||"),
            Token::And => write!(f, "&&"),
            Token::Not => write!(f, "!"),
            Token::Square => write!(f, "#"),
            Token::Diamond => write!(f, "@"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Ident(name) => write!(f, "{}", name),
        }
    }
}

/// Splits `text` into tokens, keeping the byte span of each.
pub fn tokenize_spanned(text: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(LexError {
                    fragment: lexer.slice().to_owned(),
                    offset: lexer.span().start,
                });
            }
        }
    }
    debug!("tokenize({:?}) -> {} tokens", text, tokens.len());
    Ok(tokens)
}

/// Splits `text` into tokens.
///
/// Whitespace is skipped. Parenthesis balance is not checked here.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_spanned(text)?.into_iter().map(|(token, _)| token).collect())
}
