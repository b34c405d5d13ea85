use crate::error::EvalError;

mod compiler;
mod diagnostic;
mod evaluator;
mod executor;
mod token;
mod tokenizer;

pub use compiler::Compiler;
pub use diagnostic::{excerpt, Diagnostic, Diagnostics};
pub use evaluator::{Evaluation, Evaluator};
pub use executor::Executor;
pub use token::{Token, TokenKind};
pub use tokenizer::{classify_operator, Tokenizer};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Plain IEEE arithmetic: dividing by zero yields an infinity or `NaN`.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "^" => Ok(Operator::Power),
            _ => Err(EvalError::InvalidToken {
                text: value.to_string(),
            }),
        }
    }
}
