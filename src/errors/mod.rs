//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexical, syntactic and semantic phases
//! - Error formatting and helpful suggestions

pub mod errors;
