use crate::functions::{Builtin, FunctionDef};
use std::collections::HashMap;

/// Constants and function definitions an evaluator resolves names against.
#[derive(Debug, Clone, Default)]
pub struct Context {
    constants: HashMap<String, f64>,
    functions: Vec<FunctionDef>,
}

impl Context {
    /// Builds a context. Constant names are case-insensitive; when two keys
    /// collide after normalization the later one wins.
    pub fn new(functions: Vec<FunctionDef>, constants: HashMap<String, f64>) -> Self {
        let constants = constants
            .into_iter()
            .map(|(name, value)| (normalize(&name), value))
            .collect();

        Self {
            constants,
            functions,
        }
    }

    pub fn constants(&self) -> &HashMap<String, f64> {
        &self.constants
    }

    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    /// Whether `name` refers to a built-in or user-defined function.
    pub fn is_function(&self, name: &str) -> bool {
        Builtin::from_name(name).is_some() || self.functions.iter().any(|f| f.name() == name)
    }

    /// The user-defined function called `name` that takes `arity` arguments.
    pub fn function(&self, name: &str, arity: usize) -> Option<&FunctionDef> {
        self.functions
            .iter()
            .find(|f| f.name() == name && f.arity() == arity)
    }

    /// A scope with no bindings of its own.
    pub fn global_scope(&self) -> Scope<'_> {
        Scope::new(&self.constants)
    }
}

/// A call frame: private parameter bindings layered over the global constants.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    bindings: HashMap<String, f64>,
    globals: &'a HashMap<String, f64>,
}

impl<'a> Scope<'a> {
    pub fn new(globals: &'a HashMap<String, f64>) -> Self {
        Self {
            bindings: HashMap::new(),
            globals,
        }
    }

    /// Binds `name` in this frame, shadowing any global of the same name.
    pub fn bind(&mut self, name: &str, value: f64) {
        self.bindings.insert(normalize(name), value);
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        let key = normalize(name);
        self.bindings
            .get(&key)
            .or_else(|| self.globals.get(&key))
            .copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
}
