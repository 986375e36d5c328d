//! Code generation module for the compiler.
//!
//! This module contains the LLVM-based code generator that lowers the AST
//! into LLVM IR. It handles:
//!
//! - Lowering of numeric expressions, comparisons and calls
//! - Declaration of imported functions
//! - Function definitions, including cleanup after a failed body

pub mod compiler;
pub mod decl;
pub mod expr;

#[cfg(test)]
mod tests;
