use crate::context::{Context, Scope};
use crate::error::{EvalError, Result};
use crate::expr::diagnostic::{Diagnostic, Diagnostics};
use crate::expr::{Compiler, Operator, Token, TokenKind, Tokenizer};
use crate::functions::{factorial, Builtin, FACTORIAL_LIMIT};
use log::debug;

/// Evaluates postfix token streams over a value stack.
///
/// Each user-defined function call runs its body on a fresh executor one
/// level deeper, with the parameters bound in a private [`Scope`].
pub struct Executor<'a> {
    context: &'a Context,
    max_depth: usize,
    depth: usize,
    stack: Vec<f64>,
}

impl<'a> Executor<'a> {
    pub fn new(context: &'a Context, max_depth: usize) -> Self {
        Self {
            context,
            max_depth,
            depth: 0,
            stack: Vec::new(),
        }
    }

    fn nested(&self) -> Self {
        Self {
            context: self.context,
            max_depth: self.max_depth,
            depth: self.depth + 1,
            stack: Vec::new(),
        }
    }

    /// Tokenizes, converts and executes `source` against `scope`.
    pub fn run(&mut self, source: &str, scope: &Scope, diagnostics: &mut Diagnostics) -> Result<f64> {
        let tokens = Tokenizer::new(self.context, scope).tokenize(source, diagnostics);
        let postfix = Compiler::compile(&tokens, diagnostics);
        self.execute(&postfix, scope, diagnostics)
    }

    pub fn execute(
        &mut self,
        postfix: &[Token],
        scope: &Scope,
        diagnostics: &mut Diagnostics,
    ) -> Result<f64> {
        self.stack.clear();

        for token in postfix {
            match token.kind() {
                TokenKind::Number => {
                    let value = token.text().parse::<f64>().map_err(|_| EvalError::InvalidNumber {
                        text: token.text().to_string(),
                    })?;
                    self.stack.push(value);
                }

                TokenKind::Constant => {
                    let value =
                        scope
                            .lookup(token.text())
                            .ok_or_else(|| EvalError::UnknownConstant {
                                name: token.text().to_string(),
                            })?;
                    self.stack.push(value);
                }

                TokenKind::ArgumentSeparator => {}

                TokenKind::BinaryLeftAssoc | TokenKind::BinaryRightAssoc => {
                    let operator = Operator::try_from(token.text())?;
                    let right = self.pop(token)?;
                    let left = self.pop(token)?;
                    self.stack.push(operator.apply(left, right));
                }

                TokenKind::UnaryPrefix => {
                    let value = self.pop(token)?;
                    match token.text() {
                        "-" => self.stack.push(-value),
                        "+" => self.stack.push(value),
                        text => {
                            return Err(EvalError::InvalidToken {
                                text: text.to_string(),
                            })
                        }
                    }
                }

                TokenKind::UnaryPostfix => {
                    let value = self.pop(token)?;
                    if value > FACTORIAL_LIMIT {
                        diagnostics.push(Diagnostic::FactorialOverflow { value });
                    }
                    self.stack.push(factorial(value)?);
                }

                TokenKind::FunctionCall => {
                    let value = self.call(token, diagnostics)?;
                    self.stack.push(value);
                }

                TokenKind::Invalid => {
                    return Err(EvalError::InvalidToken {
                        text: token.text().to_string(),
                    })
                }

                TokenKind::ParenOpen | TokenKind::ParenClose => {
                    return Err(EvalError::MalformedExpression {
                        reason: "parenthesis in postfix stream".to_string(),
                    })
                }

                TokenKind::EndOfInput => break,
            }
        }

        match self.stack.len() {
            1 => Ok(self.stack.pop().unwrap_or(f64::NAN)),
            0 => Err(EvalError::StackUnderflow {
                token: Token::end_of_input().to_string(),
            }),
            n => Err(EvalError::MalformedExpression {
                reason: format!("{n} values left without an operator"),
            }),
        }
    }

    fn call(&mut self, token: &Token, diagnostics: &mut Diagnostics) -> Result<f64> {
        let name = token.text();
        let arity = token.arity();

        if let Some(builtin) = Builtin::from_name(name).filter(|b| b.arity() == arity) {
            let mut args = Vec::with_capacity(arity);
            for _ in 0..arity {
                args.push(self.pop(token)?);
            }
            args.reverse();
            let result = builtin.apply(&args);
            debug!("{builtin}{args:?} = {result}");
            return Ok(result);
        }

        let Some(function) = self.context.function(name, arity) else {
            return Err(if self.context.is_function(name) {
                EvalError::ArityMismatch {
                    name: name.to_string(),
                    given: arity,
                }
            } else {
                EvalError::UnknownFunction {
                    name: name.to_string(),
                }
            });
        };

        if self.depth >= self.max_depth {
            return Err(EvalError::RecursionLimit {
                limit: self.max_depth,
            });
        }

        let mut frame = self.context.global_scope();
        for parameter in function.binding_order() {
            let value = self.pop(token)?;
            frame.bind(parameter, value);
        }
        debug!("Calling {function} at depth {}", self.depth + 1);

        self.nested().run(function.body(), &frame, diagnostics)
    }

    fn pop(&mut self, token: &Token) -> Result<f64> {
        self.stack.pop().ok_or_else(|| EvalError::StackUnderflow {
            token: token.to_string(),
        })
    }
}
