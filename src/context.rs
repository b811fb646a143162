use std::ops::{Deref, DerefMut};

use crate::{
    configuration::Configuration,
    naming::SymbolNameGenerator,
    random::RandomSource,
    scope::{ScopeKind, ScopeManager},
};

/// Everything a single generation run shares. One per run; concurrent runs
/// each get their own.
#[derive(Clone, Debug)]
pub struct FuzzingContext {
    pub random: RandomSource,
    pub names: SymbolNameGenerator,
    pub scopes: ScopeManager,
    pub config: Configuration,
}

impl FuzzingContext {
    pub fn new(seed: u64, config: Configuration) -> Self {
        let mut scopes = ScopeManager::new();
        for name in &config.externs {
            scopes.add_extern(name.clone());
        }

        FuzzingContext {
            random: RandomSource::new(seed),
            names: SymbolNameGenerator::new(),
            scopes,
            config,
        }
    }

    /// Pushes a scope that is popped when the guard goes out of scope,
    /// whichever way that happens.
    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeGuard<'_> {
        self.scopes.push_scope(kind);
        ScopeGuard { context: self }
    }
}

pub struct ScopeGuard<'a> {
    context: &'a mut FuzzingContext,
}

impl Deref for ScopeGuard<'_> {
    type Target = FuzzingContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.context.scopes.pop_scope();
    }
}
