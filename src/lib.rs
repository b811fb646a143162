//! Budget-directed, type-aware random program generation.
//!
//! A run asks for one node filling a `(budget, types)` slot. Generators pick
//! how much of the budget they spend themselves, hand the rest down to their
//! children through the dispatcher, and leave their marks (declared names,
//! advanced counters) on a [`FuzzingContext`] shared by the whole run.
//!
//! ```no_run
//! use budgetfuzz::{generate_program, Configuration, Type};
//!
//! let program = generate_program(42, 20, &Type::Object.only(), Configuration::default()).unwrap();
//! println!("({program});");
//! ```

pub mod configuration;
pub mod context;
pub mod error;
pub mod flags;
pub mod fuzzers;
pub mod log;
pub mod naming;
pub mod node;
pub mod random;
pub mod scope;
pub mod types;

pub use configuration::Configuration;
pub use context::FuzzingContext;
pub use error::{GenResult, GenerationError};
pub use node::Node;
pub use types::{Type, TypeSet};

use crate::log::log;

/// Generates one program from scratch. The same inputs always give the same tree.
pub fn generate_program(
    seed: u64,
    budget: usize,
    types: &TypeSet,
    configuration: Configuration,
) -> GenResult<Node> {
    let mut context = FuzzingContext::new(seed, configuration);
    generate_in(&mut context, budget, types)
}

/// Like [`generate_program`], on a context the caller keeps hold of.
pub fn generate_in(context: &mut FuzzingContext, budget: usize, types: &TypeSet) -> GenResult<Node> {
    let result = fuzzers::dispatch(context, budget, types);

    if let Err(e) = &result {
        log!("run with seed {} failed: {e}", context.random.seed());
    }

    result
}
