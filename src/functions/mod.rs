mod builtin;
mod numeric;

pub use builtin::Builtin;
pub use numeric::*;

use std::fmt;

/// A user-defined function: a named expression with formal parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    name: String,
    // Declaration-reversed: the last argument sits on top of the value stack,
    // so popping in this order pairs each value with its parameter.
    parameters: Vec<String>,
    body: String,
}

impl FunctionDef {
    /// Creates a function from its name, parameters in declaration order, and body.
    pub fn new<N, P, S, B>(name: N, parameters: P, body: B) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
        B: Into<String>,
    {
        let mut parameters: Vec<String> = parameters
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .collect();
        parameters.reverse();

        Self {
            name: name.into(),
            parameters,
            body: body.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().rev().map(String::as_str)
    }

    /// Parameters in binding order (last declared first).
    pub(crate) fn binding_order(&self) -> &[String] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters().collect();
        write!(f, "{}({}) = {}", self.name, params.join(", "), self.body)
    }
}
