use super::Fuzz;
use crate::{
    context::FuzzingContext,
    error::GenResult,
    node::Node,
    scope::{ScopeManager, Symbol},
    types::TypeSet,
};

/// Names are untyped, so any slot can take one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentifierFuzzer;

impl Fuzz for IdentifierFuzzer {
    fn generate(&self, context: &mut FuzzingContext, _budget: usize, _types: &TypeSet) -> GenResult<Node> {
        let shadow = context.config.knob_f64(self.config_name(), "shadow");
        let roll = context.random.next_double();

        // reuse an enclosing name now and then so shadowing gets exercised
        let mut name = None;
        if roll < shadow && context.scopes.has_non_locals() {
            name = context
                .scopes
                .get_random_symbol(
                    &mut context.random,
                    ScopeManager::EXCLUDE_EXTERNS | ScopeManager::EXCLUDE_LOCALS,
                )
                .map(|symbol| symbol.name);
        }

        let name = name.unwrap_or_else(|| format!("x_{}", context.names.next_number()));

        context.scopes.add_symbol(Symbol::local(name.clone()));
        Ok(Node::name(name))
    }

    fn is_enough(&self, budget: usize) -> bool {
        budget >= 1
    }

    fn config_name(&self) -> &'static str {
        "identifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::Configuration,
        fuzzers::invoke,
        scope::{Origin, ScopeKind},
        types::Type,
    };

    fn name_of(node: &Node) -> &str {
        match node {
            Node::Name { name } => name,
            other => panic!("expected a name, got {other:?}"),
        }
    }

    #[test]
    fn fresh_names_count_up() {
        let mut context = FuzzingContext::new(1, Configuration::default().with_knob("identifier", "shadow", 0.0));

        let first = invoke(&IdentifierFuzzer, &mut context, 1, &Type::any()).unwrap();
        let second = invoke(&IdentifierFuzzer, &mut context, 5, &Type::any()).unwrap();

        assert_eq!(name_of(&first), "x_0");
        assert_eq!(name_of(&second), "x_1");
        assert_eq!(context.scopes.symbol_count(), 2);
    }

    #[test]
    fn types_are_ignored() {
        let mut context = FuzzingContext::new(1, Configuration::default());
        let node = invoke(&IdentifierFuzzer, &mut context, 1, &Type::Number.only()).unwrap();
        assert!(matches!(node, Node::Name { .. }));
    }

    #[test]
    fn full_shadow_reuses_the_outer_name() {
        let config = Configuration::default().with_knob("identifier", "shadow", 1.0);
        let mut context = FuzzingContext::new(3, config);
        context.scopes.add_symbol(Symbol::local("outer"));

        let mut scoped = context.enter_scope(ScopeKind::Function);
        for registered in 1..=10 {
            let node = invoke(&IdentifierFuzzer, &mut scoped, 1, &Type::any()).unwrap();
            assert_eq!(name_of(&node), "outer");
            assert_eq!(scoped.scopes.innermost().symbols().len(), registered);
        }
        assert!(scoped
            .scopes
            .innermost()
            .symbols()
            .iter()
            .all(|s| s.origin == Origin::Local));
    }

    #[test]
    fn externs_are_never_shadowed() {
        let config = Configuration::default()
            .with_knob("identifier", "shadow", 1.0)
            .with_externs(["window"]);
        let mut context = FuzzingContext::new(3, config);

        let mut scoped = context.enter_scope(ScopeKind::Function);
        let node = invoke(&IdentifierFuzzer, &mut scoped, 1, &Type::any()).unwrap();
        assert_eq!(name_of(&node), "x_0");
    }

    #[test]
    fn no_shadowing_at_top_level() {
        let config = Configuration::default().with_knob("identifier", "shadow", 1.0);
        let mut context = FuzzingContext::new(3, config);

        let names: Vec<String> = (0..3)
            .map(|_| name_of(&invoke(&IdentifierFuzzer, &mut context, 1, &Type::any()).unwrap()).to_string())
            .collect();
        assert_eq!(names, vec!["x_0", "x_1", "x_2"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_fresh_or_outer_and_always_registered(
                seed in any::<u64>(),
                shadow in 0.0f64..=1.0,
                budget in 1usize..50,
                outer in 0usize..4,
            ) {
                let config = Configuration::default().with_knob("identifier", "shadow", shadow);
                let mut context = FuzzingContext::new(seed, config);
                let outer_names: Vec<String> = (0..outer).map(|i| format!("outer_{i}")).collect();
                for name in &outer_names {
                    context.scopes.add_symbol(Symbol::local(name.clone()));
                }

                let mut scoped = context.enter_scope(ScopeKind::Function);
                let before = scoped.scopes.symbol_count();
                let node = invoke(&IdentifierFuzzer, &mut scoped, budget, &Type::any()).unwrap();
                let name = name_of(&node).to_string();

                prop_assert!(name == "x_0" || outer_names.contains(&name));
                prop_assert_eq!(scoped.scopes.symbol_count(), before + 1);
                prop_assert_eq!(&scoped.scopes.innermost().symbols()[0].name, &name);
            }
        }
    }
}
