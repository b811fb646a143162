use super::Fuzz;
use crate::{
    context::FuzzingContext,
    error::GenResult,
    node::Node,
    types::{Type, TypeSet},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringFuzzer;

impl Fuzz for StringFuzzer {
    fn generate(&self, context: &mut FuzzingContext, _budget: usize, _types: &TypeSet) -> GenResult<Node> {
        Ok(Node::string(context.names.get_string(&mut context.random)))
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 1
    }

    fn config_name(&self) -> &'static str {
        "string"
    }

    fn supported_types(&self) -> TypeSet {
        Type::String.only()
    }
}
