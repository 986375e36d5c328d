use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> ErrorPhase {
        self.internal_error.phase()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InputUnreadable { .. } => "InputUnreadable",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedClosingParen { .. } => "ExpectedClosingParen",
            ErrorImpl::ExpectedArgumentSeparator { .. } => "ExpectedArgumentSeparator",
            ErrorImpl::ExpectedFunctionName { .. } => "ExpectedFunctionName",
            ErrorImpl::ExpectedOpenParen { .. } => "ExpectedOpenParen",
            ErrorImpl::ExpectedParameterListEnd { .. } => "ExpectedParameterListEnd",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::InvalidBinaryOperator { .. } => "InvalidBinaryOperator",
            ErrorImpl::FunctionRedefinition { .. } => "FunctionRedefinition",
            ErrorImpl::FunctionSignatureMismatch { .. } => "FunctionSignatureMismatch",
            ErrorImpl::VerificationFailed { .. } => "VerificationFailed",
            ErrorImpl::BuilderError { .. } => "BuilderError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::InputUnreadable { .. } => ErrorTip::Suggestion(String::from(
                "The rest of the input could not be read and was not processed",
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected an expression",
                token
            )),
            ErrorImpl::ExpectedClosingParen { token } => {
                ErrorTip::Suggestion(format!("Expected `)`, found `{}`", token))
            }
            ErrorImpl::ExpectedArgumentSeparator { token } => ErrorTip::Suggestion(format!(
                "Expected `,` or `)` in argument list, found `{}`",
                token
            )),
            ErrorImpl::ExpectedFunctionName { token } => ErrorTip::Suggestion(format!(
                "Expected function name in prototype, found `{}`",
                token
            )),
            ErrorImpl::ExpectedOpenParen { token } => ErrorTip::Suggestion(format!(
                "Expected `(` in prototype, found `{}`",
                token
            )),
            ErrorImpl::ExpectedParameterListEnd { token } => ErrorTip::Suggestion(format!(
                "Expected `)` in prototype, found `{}`; parameters are separated by spaces",
                token
            )),
            ErrorImpl::UnknownVariable { variable } => {
                ErrorTip::Suggestion(format!("Unknown variable name `{}`", variable))
            }
            ErrorImpl::UnknownFunction { function } => ErrorTip::Suggestion(format!(
                "Unknown function `{}` referenced, is it imported?",
                function
            )),
            ErrorImpl::ArgumentCountMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::InvalidBinaryOperator { operator } => {
                ErrorTip::Suggestion(format!("Invalid binary operator `{}`", operator))
            }
            ErrorImpl::FunctionRedefinition { function } => {
                ErrorTip::Suggestion(format!("Function `{}` cannot be redefined", function))
            }
            ErrorImpl::FunctionSignatureMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` was declared with {} parameters, found {}",
                function, expected, received
            )),
            ErrorImpl::VerificationFailed { .. } => ErrorTip::None,
            ErrorImpl::BuilderError { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The stage of the pipeline an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lexical,
    Syntactic,
    Semantic,
    Backend,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("input could not be read: {message}")]
    InputUnreadable { message: String },
    #[error("unknown token when expecting an expression: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected ')': {token:?}")]
    ExpectedClosingParen { token: String },
    #[error("expected ',' or ')' in argument list: {token:?}")]
    ExpectedArgumentSeparator { token: String },
    #[error("expected function name in prototype: {token:?}")]
    ExpectedFunctionName { token: String },
    #[error("expected '(' in prototype: {token:?}")]
    ExpectedOpenParen { token: String },
    #[error("expected ')' in prototype: {token:?}")]
    ExpectedParameterListEnd { token: String },
    #[error("unknown variable name {variable:?}")]
    UnknownVariable { variable: String },
    #[error("unknown function referenced: {function:?}")]
    UnknownFunction { function: String },
    #[error("incorrect number of arguments passed to {function:?}: expected {expected}, received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("invalid binary operator {operator:?}")]
    InvalidBinaryOperator { operator: char },
    #[error("function {function:?} cannot be redefined")]
    FunctionRedefinition { function: String },
    #[error("function {function:?} declared with {expected} parameters, found {received}")]
    FunctionSignatureMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} failed verification")]
    VerificationFailed { function: String },
    #[error("IR builder error: {message}")]
    BuilderError { message: String },
}

impl ErrorImpl {
    pub fn phase(&self) -> ErrorPhase {
        match self {
            ErrorImpl::UnterminatedComment | ErrorImpl::InputUnreadable { .. } => {
                ErrorPhase::Lexical
            }
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedClosingParen { .. }
            | ErrorImpl::ExpectedArgumentSeparator { .. }
            | ErrorImpl::ExpectedFunctionName { .. }
            | ErrorImpl::ExpectedOpenParen { .. }
            | ErrorImpl::ExpectedParameterListEnd { .. } => ErrorPhase::Syntactic,
            ErrorImpl::UnknownVariable { .. }
            | ErrorImpl::UnknownFunction { .. }
            | ErrorImpl::ArgumentCountMismatch { .. }
            | ErrorImpl::InvalidBinaryOperator { .. }
            | ErrorImpl::FunctionRedefinition { .. }
            | ErrorImpl::FunctionSignatureMismatch { .. } => ErrorPhase::Semantic,
            ErrorImpl::VerificationFailed { .. } | ErrorImpl::BuilderError { .. } => {
                ErrorPhase::Backend
            }
        }
    }
}
