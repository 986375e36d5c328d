use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

use super::lexer::parse_number_literal;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("import", TokenKind::Import);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    // Any other single character, identified by its value
    Char(char),

    // Reserved
    Fn,
    Import,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Char(c) => write!(f, "{:?}", c),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// Value of a number token, `None` for every other kind.
    pub fn number_value(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number => Some(parse_number_literal(&self.value)),
            _ => None,
        }
    }

    pub fn debug(&self) {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number => {
                log::trace!("{} ({})", self.kind, self.value)
            }
            _ => log::trace!("{} ()", self.kind),
        }
    }
}
