pub mod config;
pub mod context;
pub mod error;
pub mod expr;
pub mod functions;

pub use config::EvaluatorConfig;
pub use error::{EvalError, Result};
pub use expr::{Diagnostic, Evaluation, Evaluator, Token, TokenKind};
pub use functions::FunctionDef;

use std::collections::HashMap;

/// One-shot evaluation with a set of constants and no user functions.
pub fn evaluate_expression(
    expression: &str,
    constants: &HashMap<String, f64>,
) -> Result<f64> {
    Evaluator::with_config(
        Vec::new(),
        constants.clone(),
        EvaluatorConfig::new().cache_size(0),
    )
    .evaluate(expression)
}
