use super::{distribute, generate_length, ExpressionFuzzer, Fuzz};
use crate::{
    context::FuzzingContext,
    error::GenResult,
    node::Node,
    types::{Type, TypeSet},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectFuzzer;

impl Fuzz for ObjectFuzzer {
    fn generate(&self, context: &mut FuzzingContext, budget: usize, _types: &TypeSet) -> GenResult<Node> {
        let mut remaining_budget = budget.saturating_sub(1);

        // an object property needs at least two nodes
        let max_length = context.config.knob_usize(self.config_name(), "maxLength");
        let object_length = generate_length(&mut context.random, (remaining_budget / 2).min(max_length));
        if object_length == 0 {
            return Ok(Node::empty_object());
        }

        // reserve budget for keys
        remaining_budget -= object_length;
        let fuzzers = vec![ExpressionFuzzer; object_length];
        let values = distribute(context, remaining_budget, &fuzzers, &Type::any())?;

        let entries = values
            .into_iter()
            .map(|value| {
                let key = if context.random.next_int(2) == 0 {
                    context.names.get_property_name(&mut context.random)
                } else {
                    context.names.get_random_number(&mut context.random).to_string()
                };
                Node::string_key(key, value)
            })
            .collect();

        Ok(Node::ObjectLit { entries })
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 1
    }

    fn config_name(&self) -> &'static str {
        "object"
    }

    fn supported_types(&self) -> TypeSet {
        Type::Object.only()
    }
}
