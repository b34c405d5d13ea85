use thiserror::Error;

/// Failures that terminate an evaluation.
///
/// Recoverable problems found while scanning or converting an expression are
/// reported as [`Diagnostic`](crate::expr::Diagnostic)s instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("the provided expression was null")]
    NullExpression,

    #[error("the provided expression was empty")]
    EmptyExpression,

    #[error("cannot evaluate invalid token '{text}'")]
    InvalidToken { text: String },

    #[error("'{text}' is not a valid number")]
    InvalidNumber { text: String },

    #[error("constant '{name}' is not defined")]
    UnknownConstant { name: String },

    #[error("function '{name}' is not defined")]
    UnknownFunction { name: String },

    #[error("function '{name}' does not take {given} argument(s)")]
    ArityMismatch { name: String, given: usize },

    #[error("factorial is only defined for non-negative integers, got {value}")]
    InvalidFactorial { value: f64 },

    #[error("not enough operands for '{token}'")]
    StackUnderflow { token: String },

    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: String },

    #[error("function calls nested deeper than {limit} levels")]
    RecursionLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, EvalError>;
