use super::{generate_length, invoke, ExpressionFuzzer, Fuzz, IdentifierFuzzer};
use crate::{
    context::FuzzingContext,
    error::GenResult,
    node::Node,
    scope::ScopeKind,
    types::{Type, TypeSet},
};

/// `function (params) { return body; }`, generated inside its own scope so
/// parameters may shadow names from outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FunctionFuzzer;

impl Fuzz for FunctionFuzzer {
    fn generate(&self, context: &mut FuzzingContext, budget: usize, _types: &TypeSet) -> GenResult<Node> {
        // one unit for the function itself, one at least for the body
        let spare = budget.saturating_sub(2);
        let max_params = context.config.knob_usize(self.config_name(), "maxParams");
        let param_count = generate_length(&mut context.random, spare.min(max_params));

        let mut scoped = context.enter_scope(ScopeKind::Function);

        let mut params = Vec::with_capacity(param_count);
        for _ in 0..param_count {
            params.push(invoke(&IdentifierFuzzer, &mut scoped, 1, &Type::any())?);
        }

        let body_budget = budget.saturating_sub(1 + param_count);
        let body = invoke(&ExpressionFuzzer, &mut scoped, body_budget, &Type::any())?;

        Ok(Node::Function {
            params,
            body: Box::new(body),
        })
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 2
    }

    fn config_name(&self) -> &'static str {
        "function"
    }

    fn supported_types(&self) -> TypeSet {
        Type::Function.only()
    }
}
