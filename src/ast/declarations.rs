use std::fmt::{Display, Formatter, Result};

use crate::Span;

use super::ast::Expr;

/// Prototype
///
/// A function's name and parameter names. On its own it declares an
/// external function; inside a [`Function`] it is the definition's signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub parameters: Vec<String>,
    pub span: Span,
}

impl Prototype {
    /// The nameless, parameterless prototype given to top-level expressions.
    pub fn anonymous(span: Span) -> Self {
        Prototype {
            name: String::new(),
            parameters: vec![],
            span,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}({})", self.name, self.parameters.join(" "))
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expr,
    pub span: Span,
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} {}", self.prototype, self.body)
    }
}
