/// Tuning knobs for an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Maximum nesting of user-defined function calls.
    pub max_depth: usize,
    /// Number of compiled top-level expressions kept around. `0` disables the cache.
    pub cache_size: usize,
}

impl EvaluatorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_CACHE_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            cache_size: Self::DEFAULT_CACHE_SIZE,
        }
    }
}
