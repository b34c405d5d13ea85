use crate::context::{normalize, Context, Scope};
use crate::expr::diagnostic::{excerpt, Diagnostic, Diagnostics};
use crate::expr::{Token, TokenKind};
use log::debug;

const DECIMAL_SEPARATOR: char = '.';

pub(crate) fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '/' | '*' | '!' | '^' | '(' | ')' | ',')
}

/// Classifies an operator character given the token emitted before it.
///
/// `-` and `+` are prefix operators at the start of the input and after
/// anything that still expects an operand.
pub fn classify_operator(c: char, previous: Option<&Token>) -> TokenKind {
    match c {
        ',' => TokenKind::ArgumentSeparator,
        '(' => TokenKind::ParenOpen,
        ')' => TokenKind::ParenClose,
        '!' => TokenKind::UnaryPostfix,
        '*' | '/' => TokenKind::BinaryLeftAssoc,
        '^' => TokenKind::BinaryRightAssoc,
        '-' | '+' => {
            let expects_operand = previous.map_or(true, |token| {
                matches!(
                    token.kind(),
                    TokenKind::BinaryLeftAssoc
                        | TokenKind::BinaryRightAssoc
                        | TokenKind::ParenOpen
                        | TokenKind::ArgumentSeparator
                        | TokenKind::UnaryPrefix
                )
            });
            if expects_operand {
                TokenKind::UnaryPrefix
            } else {
                TokenKind::BinaryLeftAssoc
            }
        }
        _ => TokenKind::Invalid,
    }
}

/// Splits expression text into tokens, resolving names against a context.
pub struct Tokenizer<'a> {
    context: &'a Context,
    scope: &'a Scope<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(context: &'a Context, scope: &'a Scope<'a>) -> Self {
        Self { context, scope }
    }

    /// Scans `input` left to right. Never fails: anything unrecognised is
    /// reported to `diagnostics` and surfaces as an `Invalid` token. The
    /// result always ends with a single `EndOfInput` token.
    pub fn tokenize(&self, input: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
        let source: Vec<char> = input.chars().collect();
        let mut tokens: Vec<Token> = Vec::new();
        let mut suppress_invalid = false;
        let mut i = 0;

        while i < source.len() {
            let c = source[i];

            if c.is_whitespace() {
                suppress_invalid = false;
                i += 1;
                continue;
            }

            if c.is_ascii_digit() {
                let (token, next) = scan_number(&source, i, diagnostics);
                tokens.push(token);
                suppress_invalid = false;
                i = next;
                continue;
            }

            if is_operator(c) {
                if let Some(token) = scan_operator(&source, i, tokens.last(), diagnostics) {
                    tokens.push(token);
                }
                suppress_invalid = false;
                i += 1;
                continue;
            }

            if let Some((token, next)) = self
                .scan_function(&source, i)
                .or_else(|| self.scan_constant(&source, i))
            {
                tokens.push(token);
                suppress_invalid = false;
                i = next;
                continue;
            }

            if !suppress_invalid {
                let text: String = source[i..]
                    .iter()
                    .take_while(|c| !is_operator(**c) && !c.is_whitespace())
                    .collect();
                diagnostics.push(Diagnostic::InvalidToken {
                    text: text.clone(),
                    position: i,
                    excerpt: excerpt(&source, i),
                });
                // Unresolved names must fail at execution; stray symbols are dropped.
                if is_identifier(&text) {
                    tokens.push(Token::new(text, TokenKind::Invalid));
                }
                suppress_invalid = true;
            }
            i += 1;
        }

        tokens.push(Token::end_of_input());
        debug!("Tokens: {:?}", tokens);
        tokens
    }

    /// Looks ahead for `name(`; embedded whitespace is ignored.
    fn scan_function(&self, source: &[char], start: usize) -> Option<(Token, usize)> {
        let mut name = String::new();
        let mut i = start;

        loop {
            let c = *source.get(i)?;
            if c == '(' {
                break;
            }
            if is_operator(c) {
                return None;
            }
            if !c.is_whitespace() {
                name.push(c);
            }
            i += 1;
        }

        if name.is_empty() || !self.context.is_function(&name) {
            return None;
        }
        Some((Token::new(name, TokenKind::FunctionCall), i))
    }

    fn scan_constant(&self, source: &[char], start: usize) -> Option<(Token, usize)> {
        let name: String = source[start..]
            .iter()
            .take_while(|c| !is_operator(**c) && !c.is_whitespace())
            .collect();

        if name.is_empty() || !self.scope.contains(&name) {
            return None;
        }
        let end = start + name.chars().count();
        Some((Token::new(normalize(&name), TokenKind::Constant), end))
    }
}

fn is_identifier(text: &str) -> bool {
    text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn scan_operator(
    source: &[char],
    i: usize,
    previous: Option<&Token>,
    diagnostics: &mut Diagnostics,
) -> Option<Token> {
    let c = source[i];

    // Only `!` and `)` may end an expression.
    if c != '!' && c != ')' && source[i + 1..].iter().all(|c| c.is_whitespace()) {
        diagnostics.push(Diagnostic::TrailingOperator {
            operator: c,
            position: i,
            excerpt: excerpt(source, i),
        });
        return None;
    }

    Some(Token::new(c.to_string(), classify_operator(c, previous)))
}

fn radix_of(prefix: char) -> Option<u32> {
    match prefix.to_ascii_lowercase() {
        'x' => Some(16),
        'b' => Some(2),
        'o' => Some(8),
        _ => None,
    }
}

/// Scans a numeric literal starting at `start`, returning the token and the
/// index of the first character after it.
fn scan_number(source: &[char], start: usize, diagnostics: &mut Diagnostics) -> (Token, usize) {
    let mut buffer = String::new();
    let mut i = start;

    while let Some(&c) = source.get(i) {
        if c.is_ascii_digit() || c == DECIMAL_SEPARATOR {
            buffer.push(c);
            i += 1;
            continue;
        }

        if buffer == "0" {
            if let Some(radix) = radix_of(c) {
                return scan_radix(source, start, i + 1, radix, diagnostics);
            }
        }

        if (c == 'e' || c == 'E') && buffer.ends_with(|d: char| d.is_ascii_digit()) {
            buffer.push('e');
            i += 1;
            if let Some(&sign) = source.get(i).filter(|c| **c == '+' || **c == '-') {
                buffer.push(sign);
                i += 1;
            }
            let digits_start = i;
            while let Some(&d) = source.get(i).filter(|d| d.is_ascii_digit()) {
                buffer.push(d);
                i += 1;
            }
            if i == digits_start {
                return (invalid_literal(source, start, i, diagnostics), i);
            }
        }

        break;
    }

    if buffer.parse::<f64>().is_err() {
        return (invalid_literal(source, start, i, diagnostics), i);
    }
    (Token::new(buffer, TokenKind::Number), i)
}

/// Scans the digits of a `0x`, `0b` or `0o` literal; `digits_start` points
/// just past the prefix letter.
fn scan_radix(
    source: &[char],
    start: usize,
    digits_start: usize,
    radix: u32,
    diagnostics: &mut Diagnostics,
) -> (Token, usize) {
    let digits: String = source[digits_start..]
        .iter()
        .take_while(|c| c.is_digit(radix))
        .collect();
    let end = digits_start + digits.len();

    match u64::from_str_radix(&digits, radix) {
        Ok(value) => (Token::new((value as f64).to_string(), TokenKind::Number), end),
        Err(_) => (invalid_literal(source, start, end, diagnostics), end),
    }
}

fn invalid_literal(
    source: &[char],
    start: usize,
    end: usize,
    diagnostics: &mut Diagnostics,
) -> Token {
    let text: String = source[start..end].iter().collect();
    diagnostics.push(Diagnostic::InvalidLiteral {
        text: text.clone(),
        position: start,
        excerpt: excerpt(source, start),
    });
    Token::new(text, TokenKind::Invalid)
}
