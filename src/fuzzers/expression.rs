use super::{invoke, Fuzz, Fuzzer};
use crate::{
    context::FuzzingContext,
    error::{GenResult, GenerationError},
    log::log,
    node::Node,
    types::{self, Type, TypeSet},
};

/// Picks a generator for the slot and runs it.
///
/// Generators producing a specific type win over untyped ones (identifiers)
/// unless the slot asks for `any`; untyped generators only fill a typed slot
/// when nothing typed fits. Among the survivors the choice is weighted by each
/// generator's `weight` knob; a weight of 0 takes a generator out.
pub fn dispatch(context: &mut FuzzingContext, budget: usize, types: &TypeSet) -> GenResult<Node> {
    let eligible: Vec<(Fuzzer, f64)> = Fuzzer::REGISTRY
        .into_iter()
        .filter(|f| f.is_enough(budget) && types::accepts(types, &f.supported_types()))
        .map(|f| (f, context.config.knob_f64(f.config_name(), "weight")))
        .filter(|(_, weight)| *weight > 0.0)
        .collect();

    let candidates = if types.contains(&Type::Any) {
        eligible
    } else {
        let typed: Vec<(Fuzzer, f64)> = eligible
            .iter()
            .filter(|(f, _)| !types::is_universal(&f.supported_types()))
            .copied()
            .collect();
        if typed.is_empty() {
            if !eligible.is_empty() {
                log!(
                    "no {} generator fits budget {budget}, relaxing to untyped names",
                    types::describe(types)
                );
            }
            eligible
        } else {
            typed
        }
    };

    let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
    let Some(chosen) = context.random.choose_weighted(&weights) else {
        log!(
            "no generator for {} at budget {budget}",
            types::describe(types)
        );
        return Err(GenerationError::Unsatisfiable {
            types: types::describe(types),
            budget,
        });
    };

    invoke(&candidates[chosen].0, context, budget, types)
}

/// Stand-in for "some expression" wherever a composite needs a child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpressionFuzzer;

impl Fuzz for ExpressionFuzzer {
    fn generate(&self, context: &mut FuzzingContext, budget: usize, types: &TypeSet) -> GenResult<Node> {
        dispatch(context, budget, types)
    }

    fn is_enough(&self, budget: usize) -> bool {
        Fuzzer::REGISTRY.iter().any(|f| f.is_enough(budget))
    }

    fn config_name(&self) -> &'static str {
        "expression"
    }
}
