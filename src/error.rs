#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("no generator can produce {types} within budget {budget}")]
    Unsatisfiable { types: String, budget: usize },

    /// A generator was invoked below its declared minimum. This points at a
    /// caller or partitioner bug rather than at bad luck.
    #[error("generator `{generator}` invoked with budget {budget}, below its minimum")]
    BudgetExhausted {
        generator: &'static str,
        budget: usize,
    },
}

pub type GenResult<T> = Result<T, GenerationError>;
