mod distribute;
mod expression;
mod function;
mod identifier;
mod literal;
mod object;
mod string;

pub use distribute::{distribute, generate_length, partition};
pub use expression::{dispatch, ExpressionFuzzer};
pub use function::FunctionFuzzer;
pub use identifier::IdentifierFuzzer;
pub use literal::{BooleanFuzzer, NumberFuzzer};
pub use object::ObjectFuzzer;
pub use string::StringFuzzer;

use crate::{
    context::FuzzingContext,
    error::{GenResult, GenerationError},
    node::Node,
    types::{self, Type, TypeSet},
};

/// What every generator offers the dispatcher.
pub trait Fuzz {
    /// Produces one node for a slot of `types` spending at most `budget`.
    /// Callers go through [`invoke`], which checks the preconditions first.
    fn generate(&self, context: &mut FuzzingContext, budget: usize, types: &TypeSet) -> GenResult<Node>;

    /// Minimum budget test. Monotonic in `budget`.
    fn is_enough(&self, budget: usize) -> bool;

    fn config_name(&self) -> &'static str;

    fn supported_types(&self) -> TypeSet {
        Type::all()
    }
}

/// Every generator the expression dispatcher may pick from, in the order
/// they are considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fuzzer {
    Identifier(IdentifierFuzzer),
    String(StringFuzzer),
    Number(NumberFuzzer),
    Boolean(BooleanFuzzer),
    Object(ObjectFuzzer),
    Function(FunctionFuzzer),
}

impl Fuzzer {
    pub const REGISTRY: [Fuzzer; 6] = [
        Fuzzer::Identifier(IdentifierFuzzer),
        Fuzzer::String(StringFuzzer),
        Fuzzer::Number(NumberFuzzer),
        Fuzzer::Boolean(BooleanFuzzer),
        Fuzzer::Object(ObjectFuzzer),
        Fuzzer::Function(FunctionFuzzer),
    ];
}

macro_rules! delegate {
    ($self:ident, $f:ident => $e:expr) => {
        match $self {
            Fuzzer::Identifier($f) => $e,
            Fuzzer::String($f) => $e,
            Fuzzer::Number($f) => $e,
            Fuzzer::Boolean($f) => $e,
            Fuzzer::Object($f) => $e,
            Fuzzer::Function($f) => $e,
        }
    };
}

impl Fuzz for Fuzzer {
    fn generate(&self, context: &mut FuzzingContext, budget: usize, types: &TypeSet) -> GenResult<Node> {
        delegate!(self, f => f.generate(context, budget, types))
    }

    fn is_enough(&self, budget: usize) -> bool {
        delegate!(self, f => f.is_enough(budget))
    }

    fn config_name(&self) -> &'static str {
        delegate!(self, f => f.config_name())
    }

    fn supported_types(&self) -> TypeSet {
        delegate!(self, f => f.supported_types())
    }
}

/// Runs `fuzzer` after checking its preconditions.
pub fn invoke<F: Fuzz + ?Sized>(
    fuzzer: &F,
    context: &mut FuzzingContext,
    budget: usize,
    types: &TypeSet,
) -> GenResult<Node> {
    if !fuzzer.is_enough(budget) {
        return Err(GenerationError::BudgetExhausted {
            generator: fuzzer.config_name(),
            budget,
        });
    }

    if !types::accepts(types, &fuzzer.supported_types()) {
        return Err(GenerationError::Unsatisfiable {
            types: types::describe(types),
            budget,
        });
    }

    fuzzer.generate(context, budget, types)
}
