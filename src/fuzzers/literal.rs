use super::Fuzz;
use crate::{
    context::FuzzingContext,
    error::GenResult,
    node::Node,
    types::{Type, TypeSet},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberFuzzer;

impl Fuzz for NumberFuzzer {
    fn generate(&self, context: &mut FuzzingContext, _budget: usize, _types: &TypeSet) -> GenResult<Node> {
        Ok(Node::Number {
            value: context.names.get_random_number(&mut context.random),
        })
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 1
    }

    fn config_name(&self) -> &'static str {
        "number"
    }

    fn supported_types(&self) -> TypeSet {
        Type::Number.only()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BooleanFuzzer;

impl Fuzz for BooleanFuzzer {
    fn generate(&self, context: &mut FuzzingContext, _budget: usize, _types: &TypeSet) -> GenResult<Node> {
        let true_ratio = context.config.knob_f64(self.config_name(), "trueRatio");
        Ok(Node::Boolean {
            value: context.random.next_double() < true_ratio,
        })
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 1
    }

    fn config_name(&self) -> &'static str {
        "boolean"
    }

    fn supported_types(&self) -> TypeSet {
        Type::Boolean.only()
    }
}
