use crate::expr::diagnostic::{Diagnostic, Diagnostics};
use crate::expr::{Token, TokenKind};
use log::debug;

/// Converts infix tokens to postfix order (shunting yard).
pub struct Compiler;

/// Book-keeping for one open parenthesis.
#[derive(Debug, Default)]
struct ParenFrame {
    call: bool,
    separators: usize,
    has_content: bool,
}

impl ParenFrame {
    fn arity(&self) -> usize {
        if self.has_content {
            self.separators + 1
        } else {
            0
        }
    }
}

impl Compiler {
    /// Reorders `tokens` into postfix. Unbalanced parentheses are reported to
    /// `diagnostics` and recovered from; conversion itself never fails.
    ///
    /// Function calls leave the output stamped with their argument count.
    pub fn compile(tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Token> {
        let open = tokens.iter().filter(|t| t.is(TokenKind::ParenOpen)).count();
        let close = tokens.iter().filter(|t| t.is(TokenKind::ParenClose)).count();
        if open != close {
            diagnostics.push(Diagnostic::MismatchedParentheses { open, close });
        }

        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut operators: Vec<Token> = Vec::new();
        let mut frames: Vec<ParenFrame> = Vec::new();
        let mut previous: Option<TokenKind> = None;

        for token in tokens {
            let kind = token.kind();
            if kind != TokenKind::ParenClose && kind != TokenKind::EndOfInput {
                if let Some(frame) = frames.last_mut() {
                    frame.has_content = true;
                }
            }

            match kind {
                TokenKind::EndOfInput => break,

                TokenKind::ArgumentSeparator => {
                    pop_until_paren(&mut operators, &mut output);
                    if let Some(frame) = frames.last_mut() {
                        frame.separators += 1;
                    }
                    output.push(token.clone());
                }

                TokenKind::Number
                | TokenKind::Constant
                | TokenKind::UnaryPostfix
                | TokenKind::Invalid => output.push(token.clone()),

                TokenKind::ParenOpen => {
                    frames.push(ParenFrame {
                        call: previous == Some(TokenKind::FunctionCall),
                        ..ParenFrame::default()
                    });
                    operators.push(token.clone());
                }

                TokenKind::UnaryPrefix | TokenKind::FunctionCall => operators.push(token.clone()),

                TokenKind::ParenClose => {
                    pop_until_paren(&mut operators, &mut output);
                    if operators.pop().is_some() {
                        let frame = frames.pop().unwrap_or_default();
                        if frame.call
                            && operators
                                .last()
                                .is_some_and(|top| top.is(TokenKind::FunctionCall))
                        {
                            output.extend(operators.pop().map(|f| f.with_arity(frame.arity())));
                        }
                    } else {
                        diagnostics.push(Diagnostic::UnmatchedParenthesis);
                    }
                }

                TokenKind::BinaryLeftAssoc | TokenKind::BinaryRightAssoc => {
                    let left_assoc = kind == TokenKind::BinaryLeftAssoc;
                    while let Some(top) = operators.last() {
                        let yields = if left_assoc {
                            top.precedence() >= token.precedence()
                        } else {
                            top.precedence() > token.precedence()
                        };
                        if top.is(TokenKind::ParenOpen) || !yields {
                            break;
                        }
                        output.extend(operators.pop());
                    }
                    operators.push(token.clone());
                }
            }

            previous = Some(kind);
        }

        // Leftover open parentheses were already reported above.
        while let Some(operator) = operators.pop() {
            if !operator.is(TokenKind::ParenOpen) {
                output.push(operator);
            }
        }

        debug!("Postfix: {:?}", output);
        output
    }
}

fn pop_until_paren(operators: &mut Vec<Token>, output: &mut Vec<Token>) {
    while operators
        .last()
        .is_some_and(|top| !top.is(TokenKind::ParenOpen))
    {
        output.extend(operators.pop());
    }
}
