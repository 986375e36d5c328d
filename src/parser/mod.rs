//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer and
//! builds AST nodes one top-level construct at a time. It handles:
//!
//! - Function definitions and imports (prototypes)
//! - Expression parsing (binary operators, calls, literals, grouping)
//! - Top-level expressions, wrapped in anonymous functions
//!
//! Binary expressions are parsed by operator-precedence climbing over a
//! per-parser precedence table.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod tests;
