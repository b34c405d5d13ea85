use crate::config::EvaluatorConfig;
use crate::context::Context;
use crate::error::{EvalError, Result};
use crate::expr::{Compiler, Diagnostic, Diagnostics, Executor, Token, Tokenizer};
use crate::functions::FunctionDef;
use log::debug;
use lru::LruCache;
use rayon::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Postfix form of a top-level expression plus what converting it reported.
#[derive(Debug, Clone)]
struct Compiled {
    postfix: Vec<Token>,
    diagnostics: Diagnostics,
}

/// The result of [`Evaluator::evaluate_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Evaluates arithmetic expressions against a fixed set of constants and
/// user-defined functions.
///
/// ```
/// use std::collections::HashMap;
/// use whisker_rs::{Evaluator, FunctionDef};
///
/// let evaluator = Evaluator::new(
///     vec![FunctionDef::new("f", ["x", "y"], "x * y + 1")],
///     HashMap::from([("half".to_string(), 0.5)]),
/// );
/// assert_eq!(evaluator.evaluate("f(2, 3) * half").unwrap(), 3.5);
/// ```
pub struct Evaluator {
    context: Context,
    config: EvaluatorConfig,
    cache: Option<Mutex<LruCache<String, Arc<Compiled>>>>,
}

impl Evaluator {
    /// Creates an `Evaluator` with the default configuration.
    ///
    /// Definitions cannot be added or removed afterwards.
    pub fn new(functions: Vec<FunctionDef>, constants: HashMap<String, f64>) -> Self {
        Self::with_config(functions, constants, EvaluatorConfig::default())
    }

    pub fn with_config(
        functions: Vec<FunctionDef>,
        constants: HashMap<String, f64>,
        config: EvaluatorConfig,
    ) -> Self {
        let cache = NonZeroUsize::new(config.cache_size).map(|size| Mutex::new(LruCache::new(size)));

        Self {
            context: Context::new(functions, constants),
            config,
            cache,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates an expression such as `"3 * 2 + 1"`.
    ///
    /// # Errors
    ///
    /// * [`EvalError::NullExpression`] for `None`.
    /// * [`EvalError::EmptyExpression`] for `""`.
    /// * Any evaluation failure, e.g. an unresolved name or a stack underflow.
    ///
    /// An expression that reduces to an undefined value returns `Ok(NaN)`.
    pub fn evaluate<'e>(&self, expression: impl Into<Option<&'e str>>) -> Result<f64> {
        self.evaluate_detailed(expression)
            .map(|evaluation| evaluation.value)
    }

    /// Like [`evaluate`](Self::evaluate), but never fails: any error, or a
    /// `NaN` result, is reported as `(false, NaN)`.
    pub fn try_evaluate<'e>(&self, expression: impl Into<Option<&'e str>>) -> (bool, f64) {
        match self.evaluate(expression) {
            Ok(value) if !value.is_nan() => (true, value),
            Ok(_) => (false, f64::NAN),
            Err(err) => {
                debug!("Evaluation failed: {err}");
                (false, f64::NAN)
            }
        }
    }

    /// Evaluates an expression and returns the diagnostics raised on the way.
    pub fn evaluate_detailed<'e>(
        &self,
        expression: impl Into<Option<&'e str>>,
    ) -> Result<Evaluation> {
        let expression = match expression.into() {
            None => return Err(EvalError::NullExpression),
            Some("") => return Err(EvalError::EmptyExpression),
            Some(expression) => expression,
        };

        let compiled = self.compiled(expression);
        let mut diagnostics = compiled.diagnostics.clone();
        let scope = self.context.global_scope();

        let value = Executor::new(&self.context, self.config.max_depth).execute(
            &compiled.postfix,
            &scope,
            &mut diagnostics,
        )?;
        debug!("{expression} = {value}");

        Ok(Evaluation {
            value,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Evaluates independent expressions in parallel, preserving order.
    pub fn evaluate_batch(&self, expressions: &[&str]) -> Vec<Result<f64>> {
        expressions
            .par_iter()
            .map(|expression| self.evaluate(*expression))
            .collect()
    }

    /// The token stream for `expression`, ending with `EndOfInput`.
    pub fn tokenize(&self, expression: &str) -> Vec<Token> {
        let scope = self.context.global_scope();
        Tokenizer::new(&self.context, &scope).tokenize(expression, &mut Diagnostics::new())
    }

    /// The postfix form of `expression`.
    pub fn compile(&self, expression: &str) -> Vec<Token> {
        self.compiled(expression).postfix.clone()
    }

    fn compiled(&self, expression: &str) -> Arc<Compiled> {
        let key = expression.to_string();
        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                if let Some(hit) = cache.get(&key) {
                    debug!("Cache hit: {expression}");
                    return Arc::clone(hit);
                }
            }
        }

        let scope = self.context.global_scope();
        let mut diagnostics = Diagnostics::new();
        let tokens = Tokenizer::new(&self.context, &scope).tokenize(expression, &mut diagnostics);
        let postfix = Compiler::compile(&tokens, &mut diagnostics);
        let compiled = Arc::new(Compiled {
            postfix,
            diagnostics,
        });

        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.put(key, Arc::clone(&compiled));
            }
        }
        compiled
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Vec::new(), HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_evaluator() -> Evaluator {
        Evaluator::new(
            vec![
                FunctionDef::new("tripleParam", ["x", "y", "z"], "x*y*z"),
                FunctionDef::new(
                    "lawOfCosines",
                    ["a", "b", "c"],
                    "sqrt(a ^ 2 + b ^ 2 - 2 * a * b * cos(c))",
                ),
                FunctionDef::new(
                    "zsormula",
                    ["x1", "x2", "y1", "y2", "z1", "z2"],
                    "((z1 ^ 2) + (z2^2)) * (x1 * y1 + x2 * y2)",
                ),
                FunctionDef::new("scale", ["x"], "x * 10"),
                FunctionDef::new("scale", ["x", "factor"], "x * factor"),
            ],
            HashMap::from([
                ("half".to_string(), 0.5),
                ("year".to_string(), 2022.0),
                ("first".to_string(), 1.0),
                ("second".to_string(), 2.0),
                ("third".to_string(), 3.0),
                ("a".to_string(), 97.0),
            ]),
        )
    }

    #[test]
    fn test_simple_binary_expression() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("3 + 2 * 2").unwrap(), 7.0);
        assert_eq!(evaluator.evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluator.evaluate("(1 + 2) * (3 + 4)").unwrap(), 21.0);
    }

    #[test]
    fn test_custom_functions() {
        let evaluator = setup_evaluator();
        assert_eq!(evaluator.evaluate("tripleParam(2, 3, 4)").unwrap(), 24.0);
        assert_eq!(
            evaluator.evaluate("zsormula(1,2,3,4,5,6)").unwrap(),
            (25.0 + 36.0) * (3.0 + 8.0)
        );
        let c = evaluator.evaluate("lawOfCosines(3, 4, acos(0))").unwrap();
        assert!((c - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_parameter_shadows_constant_only_inside_call() {
        let evaluator = setup_evaluator();
        // `a` is both a constant (97) and a parameter of lawOfCosines.
        let value = evaluator
            .evaluate("lawOfCosines(3, 4, acos(0)) + a")
            .unwrap();
        assert!((value - 102.0).abs() < 1e-9);
        assert_eq!(evaluator.evaluate("a").unwrap(), 97.0);
    }

    #[test]
    fn test_overloads_resolve_by_arity() {
        let evaluator = setup_evaluator();
        assert_eq!(evaluator.evaluate("scale(2)").unwrap(), 20.0);
        assert_eq!(evaluator.evaluate("scale(2, 3)").unwrap(), 6.0);
        assert_eq!(
            evaluator.evaluate("scale(1, 2, 3)"),
            Err(EvalError::ArityMismatch {
                name: "scale".to_string(),
                given: 3
            })
        );
    }

    #[test]
    fn test_null_and_empty_expressions() {
        let evaluator = setup_evaluator();
        assert_eq!(
            evaluator.evaluate(None::<&str>),
            Err(EvalError::NullExpression)
        );
        assert_eq!(evaluator.evaluate(""), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn test_try_evaluate() {
        let evaluator = setup_evaluator();
        assert_eq!(evaluator.try_evaluate("first + second"), (true, 3.0));

        for input in [None, Some(""), Some("1 +* 2 +"), Some("nope(1)"), Some("0 / 0")] {
            let (ok, value) = evaluator.try_evaluate(input);
            assert!(!ok, "{input:?} should fail");
            assert!(value.is_nan());
        }
    }

    #[test]
    fn test_evaluate_detailed_reports_diagnostics() {
        let evaluator = setup_evaluator();
        let evaluation = evaluator.evaluate_detailed("(1 + 2").unwrap();
        assert_eq!(evaluation.value, 3.0);
        assert_eq!(
            evaluation.diagnostics,
            vec![Diagnostic::MismatchedParentheses { open: 1, close: 0 }]
        );

        let clean = evaluator.evaluate_detailed("1 + 2").unwrap();
        assert!(clean.diagnostics.is_empty());
    }

    #[test]
    fn test_stray_symbols_do_not_abort() {
        let evaluator = Evaluator::default();
        let evaluation = evaluator.evaluate_detailed("1 + 2 @").unwrap();
        assert_eq!(evaluation.value, 3.0);
        assert_eq!(evaluation.diagnostics.len(), 1);
        assert!(matches!(
            &evaluation.diagnostics[0],
            Diagnostic::InvalidToken { text, position: 6, .. } if text == "@"
        ));
        assert_eq!(evaluator.try_evaluate("1 + 2 #"), (true, 3.0));
    }

    #[test]
    fn test_round_with_excessive_digits() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("rnd(1.005, 400)").unwrap(), 1.005);
        assert_eq!(evaluator.evaluate("rnd(2.345, 1)").unwrap(), 2.3);
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let evaluator = setup_evaluator();
        let first = evaluator.evaluate_detailed("scale(half) + 1 + 1 /").unwrap();
        for _ in 0..3 {
            assert_eq!(
                evaluator.evaluate_detailed("scale(half) + 1 + 1 /").unwrap(),
                first
            );
        }
        assert_eq!(first.value, 7.0);
        assert_eq!(first.diagnostics.len(), 1);
    }

    #[test]
    fn test_cache_can_be_disabled() {
        let evaluator = Evaluator::with_config(
            Vec::new(),
            HashMap::new(),
            EvaluatorConfig::new().cache_size(0),
        );
        assert!(evaluator.cache.is_none());
        assert_eq!(evaluator.evaluate("2 * 21").unwrap(), 42.0);
        assert_eq!(evaluator.evaluate("2 * 21").unwrap(), 42.0);
    }

    #[test]
    fn test_recursion_limit_from_config() {
        let evaluator = Evaluator::with_config(
            vec![FunctionDef::new("forever", ["n"], "forever(n)")],
            HashMap::new(),
            EvaluatorConfig::new().max_depth(4),
        );
        assert_eq!(
            evaluator.evaluate("forever(1)"),
            Err(EvalError::RecursionLimit { limit: 4 })
        );
    }

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let evaluator = setup_evaluator();
        let results = evaluator.evaluate_batch(&["1 + 1", "scale(3)", "bogus", "third!"]);
        assert_eq!(results[0], Ok(2.0));
        assert_eq!(results[1], Ok(30.0));
        assert!(results[2].is_err());
        assert_eq!(results[3], Ok(6.0));
    }

    #[test]
    fn test_tokenize_and_compile() {
        let evaluator = setup_evaluator();
        assert_eq!(evaluator.tokenize("half * 4").len(), 4);
        let postfix: Vec<String> = evaluator
            .compile("half * 4")
            .iter()
            .map(Token::to_string)
            .collect();
        assert_eq!(postfix, vec!["half", "4", "*"]);
    }
}
