use log::warn;
use thiserror::Error;

const EXCERPT_RADIUS: usize = 15;

/// A recoverable problem found while processing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("skipping invalid token '{text}' starting at position {}\n{excerpt}", .position + 1)]
    InvalidToken {
        text: String,
        position: usize,
        excerpt: String,
    },

    #[error("invalid numeric literal '{text}' at position {}\n{excerpt}", .position + 1)]
    InvalidLiteral {
        text: String,
        position: usize,
        excerpt: String,
    },

    #[error("skipping invalid use of '{operator}' operator at last position\n{excerpt}")]
    TrailingOperator {
        operator: char,
        position: usize,
        excerpt: String,
    },

    #[error("mismatched parentheses in input: {open} opening, {close} closing")]
    MismatchedParentheses { open: usize, close: usize },

    #[error("ignoring closing parenthesis without an opening partner")]
    UnmatchedParenthesis,

    #[error("{value}! overflows a double, the result is infinite")]
    FactorialOverflow { value: f64 },
}

/// Diagnostics raised during one evaluation, in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records and logs a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Renders the input around `position` with a marker line underneath.
///
/// ```text
/// ... 2 + 3 * unknown + 1 ...
///             ^- HERE
/// ```
pub fn excerpt(source: &[char], position: usize) -> String {
    let position = position.min(source.len());
    let back = position.min(EXCERPT_RADIUS);
    let forward = (source.len() - position).min(EXCERPT_RADIUS);

    let mut text = String::new();
    let mut pad = back;
    if position - back > 0 {
        text.push_str("... ");
        pad += 4;
    }
    text.extend(&source[position - back..position + forward]);
    if position + forward < source.len() {
        text.push_str(" ...");
    }

    text.push('\n');
    text.push_str(&" ".repeat(pad));
    text.push_str("^- HERE");
    text
}
