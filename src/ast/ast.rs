use std::fmt::{Display, Formatter, Result};

use crate::Span;

use super::{
    declarations::{Function, Prototype},
    expressions::{BinaryExpr, CallExpr, NumberExpr, VariableExpr},
};

/// Expression
///
/// The closed set of expression kinds. Every node exclusively owns its
/// children, so an expression is always a strict tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Variable(VariableExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::Variable(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}

/// Renders the expression in fully parenthesised prefix form, e.g. `(+ 1 (* 2 3))`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Number(expr) => write!(f, "{}", expr.value),
            Expr::Variable(expr) => write!(f, "{}", expr.name),
            Expr::Binary(expr) => write!(f, "({} {} {})", expr.operator, expr.left, expr.right),
            Expr::Call(expr) => {
                write!(f, "{}(", expr.callee)?;
                for (i, argument) in expr.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Top-level construct
///
/// One unit handed from the parser to the code generator.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevel {
    /// `fn name(params) body`
    Definition(Function),
    /// `import name(params)`
    Import(Prototype),
    /// A bare expression wrapped in an anonymous function
    Expression(Function),
}

impl TopLevel {
    pub fn get_span(&self) -> &Span {
        match self {
            TopLevel::Definition(function) | TopLevel::Expression(function) => &function.span,
            TopLevel::Import(prototype) => &prototype.span,
        }
    }
}

impl Display for TopLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TopLevel::Definition(function) => write!(f, "fn {}", function),
            TopLevel::Import(prototype) => write!(f, "import {}", prototype),
            TopLevel::Expression(function) => write!(f, "{}", function.body),
        }
    }
}
