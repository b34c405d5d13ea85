use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Constant,
    BinaryLeftAssoc,
    BinaryRightAssoc,
    UnaryPrefix,
    UnaryPostfix,
    ParenOpen,
    ParenClose,
    FunctionCall,
    ArgumentSeparator,
    EndOfInput,
    Invalid,
}

/// A classified lexical unit. Precedence is fixed by `(text, kind)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    text: String,
    kind: TokenKind,
    precedence: u8,
    arity: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        let text = text.into();
        let precedence = precedence_of(&text, kind);
        Self {
            text,
            kind,
            precedence,
            arity: 0,
        }
    }

    pub fn end_of_input() -> Self {
        Self::new("", TokenKind::EndOfInput)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    /// Number of arguments written at the call site. Only set on
    /// `FunctionCall` tokens that went through postfix conversion.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

fn precedence_of(text: &str, kind: TokenKind) -> u8 {
    match kind {
        TokenKind::ArgumentSeparator => 1,
        TokenKind::Number | TokenKind::Constant => 2,
        TokenKind::BinaryLeftAssoc => match text {
            "+" | "-" => 3,
            "*" | "/" => 4,
            _ => 0,
        },
        TokenKind::BinaryRightAssoc if text == "^" => 5,
        TokenKind::UnaryPrefix if text == "-" || text == "+" => 6,
        TokenKind::UnaryPostfix if text == "!" => 7,
        TokenKind::ParenOpen | TokenKind::ParenClose | TokenKind::FunctionCall => 8,
        _ => 0,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::FunctionCall if self.arity > 0 => {
                write!(f, "{}/{}", self.text, self.arity)
            }
            TokenKind::EndOfInput => f.write_str("<end>"),
            _ => f.write_str(&self.text),
        }
    }
}
