use std::ops::BitOr;

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Local,
    /// Predeclared by the host environment, never introduced by the program.
    Extern,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub origin: Origin,
}

impl Symbol {
    pub fn local(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            origin: Origin::Local,
        }
    }

    pub fn external(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            origin: Origin::Extern,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    symbols: Vec<Symbol>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            symbols: vec![],
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Which visible symbols a random pick must skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Exclude(u8);

impl Exclude {
    pub const NOTHING: Exclude = Exclude(0);
    pub const EXTERNS: Exclude = Exclude(1);
    /// Symbols of the innermost scope.
    pub const LOCALS: Exclude = Exclude(1 << 1);

    pub fn contains(self, other: Exclude) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Exclude {
    type Output = Exclude;

    fn bitor(self, rhs: Self) -> Self::Output {
        Exclude(self.0 | rhs.0)
    }
}

/// Stack of lexical scopes. The global scope lives as long as the manager
/// and cannot be popped.
#[derive(Clone, Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    pushes: usize,
    pops: usize,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeManager {
    pub const EXCLUDE_EXTERNS: Exclude = Exclude::EXTERNS;
    pub const EXCLUDE_LOCALS: Exclude = Exclude::LOCALS;

    pub fn new() -> Self {
        ScopeManager {
            scopes: vec![Scope::new(ScopeKind::Global)],
            pushes: 0,
            pops: 0,
        }
    }

    pub fn push_scope(&mut self, kind: ScopeKind) {
        self.pushes += 1;
        self.scopes.push(Scope::new(kind));
    }

    /// Returns `None` instead of removing the global scope.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() == 1 {
            return None;
        }
        self.pops += 1;
        self.scopes.pop()
    }

    /// Registers into the innermost scope. Duplicate names are allowed,
    /// that is how shadowing happens.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.innermost_mut().symbols.push(symbol);
    }

    pub fn add_extern(&mut self, name: impl Into<String>) {
        self.scopes[0].symbols.push(Symbol::external(name));
    }

    pub fn has_non_locals(&self) -> bool {
        let outer = self.scopes.len() - 1;
        self.scopes[..outer].iter().any(|s| !s.symbols.is_empty())
    }

    /// Uniform pick among visible symbols surviving `exclude`.
    pub fn get_random_symbol<R: Rng>(&self, rng: &mut R, exclude: Exclude) -> Option<Symbol> {
        let innermost = self.scopes.len() - 1;

        let candidates: Vec<&Symbol> = self
            .scopes
            .iter()
            .enumerate()
            .filter(|(depth, _)| !(exclude.contains(Exclude::LOCALS) && *depth == innermost))
            .flat_map(|(_, scope)| scope.symbols.iter())
            .filter(|s| !(exclude.contains(Exclude::EXTERNS) && s.origin == Origin::Extern))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        Some(candidates[rng.gen_range(0..candidates.len())].clone())
    }

    pub fn innermost(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Number of scopes on the stack, global included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.scopes.iter().map(|s| s.symbols.len()).sum()
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn pops(&self) -> usize {
        self.pops
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn global_scope_cannot_be_popped() {
        let mut scopes = ScopeManager::new();
        assert!(scopes.pop_scope().is_none());
        assert_eq!(scopes.depth(), 1);
        assert_eq!(scopes.pops(), 0);
    }

    #[test]
    fn push_pop_is_counted() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope(ScopeKind::Function);
        scopes.push_scope(ScopeKind::Block);
        assert_eq!(scopes.depth(), 3);

        let popped = scopes.pop_scope().unwrap();
        assert_eq!(popped.kind, ScopeKind::Block);
        scopes.pop_scope();

        assert_eq!(scopes.pushes(), 2);
        assert_eq!(scopes.pops(), 2);
    }

    #[test]
    fn symbols_vanish_with_their_scope() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope(ScopeKind::Function);
        scopes.add_symbol(Symbol::local("x_0"));
        assert_eq!(scopes.symbol_count(), 1);

        scopes.pop_scope();
        assert_eq!(scopes.symbol_count(), 0);
    }

    #[test]
    fn non_locals_only_count_outer_scopes() {
        let mut scopes = ScopeManager::new();
        scopes.add_symbol(Symbol::local("x_0"));
        assert!(!scopes.has_non_locals());

        scopes.push_scope(ScopeKind::Function);
        assert!(scopes.has_non_locals());
    }

    #[test]
    fn exclusion_masks_filter_candidates() {
        let mut scopes = ScopeManager::new();
        scopes.add_extern("window");
        scopes.add_symbol(Symbol::local("x_0"));
        scopes.push_scope(ScopeKind::Function);
        scopes.add_symbol(Symbol::local("x_1"));

        let mut rng = rng();
        let mask = ScopeManager::EXCLUDE_EXTERNS | ScopeManager::EXCLUDE_LOCALS;
        for _ in 0..50 {
            assert_eq!(scopes.get_random_symbol(&mut rng, mask).unwrap().name, "x_0");
        }

        for _ in 0..50 {
            let picked = scopes
                .get_random_symbol(&mut rng, ScopeManager::EXCLUDE_LOCALS)
                .unwrap();
            assert_ne!(picked.name, "x_1");
        }

        let anything = scopes.get_random_symbol(&mut rng, Exclude::NOTHING);
        assert!(anything.is_some());
    }

    #[test]
    fn nothing_left_after_filtering() {
        let mut scopes = ScopeManager::new();
        scopes.add_extern("document");
        scopes.push_scope(ScopeKind::Function);

        let mut rng = rng();
        let mask = ScopeManager::EXCLUDE_EXTERNS | ScopeManager::EXCLUDE_LOCALS;
        assert!(scopes.has_non_locals());
        assert_eq!(scopes.get_random_symbol(&mut rng, mask), None);
    }

    #[test]
    fn shadowing_duplicates_are_kept() {
        let mut scopes = ScopeManager::new();
        scopes.add_symbol(Symbol::local("x_0"));
        scopes.push_scope(ScopeKind::Block);
        scopes.add_symbol(Symbol::local("x_0"));

        assert_eq!(scopes.symbol_count(), 2);
        assert_eq!(scopes.innermost().symbols(), &[Symbol::local("x_0")]);
    }

    #[test]
    fn mask_combination() {
        let both = Exclude::EXTERNS | Exclude::LOCALS;
        assert!(both.contains(Exclude::EXTERNS));
        assert!(both.contains(Exclude::LOCALS));
        assert!(!Exclude::EXTERNS.contains(Exclude::LOCALS));
        assert!(Exclude::NOTHING.contains(Exclude::NOTHING));
    }
}
