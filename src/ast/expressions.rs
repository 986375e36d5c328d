use crate::Span;

use super::ast::Expr;

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

/// Variable Expression
/// A reference to a parameter of the enclosing function.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub span: Span,
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: char,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Call Expression
/// Calls a function by name; arguments are kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
