//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts a character
//! stream into tokens for parsing. It handles:
//!
//! - Recognition of keywords, identifiers, numbers and single-character operators
//! - Token position tracking for error reporting
//! - Line and block comments and whitespace

pub mod lexer;
pub mod tokens;
