use lazy_static::lazy_static;
use rand::Rng;
use rand_regex::Regex;

fn compile_regex(s: &str, size_limit: u32) -> Result<Regex, &'static str> {
    let mut parser = regex_syntax::ParserBuilder::new().unicode(false).build();
    let hir = parser.parse(s).map_err(|_| "error compiling regex")?;
    Regex::with_hir(hir, size_limit).map_err(|_| "regex cannot be sampled")
}

lazy_static! {
    static ref PROPERTY_NAME: Regex = compile_regex(r"[A-Za-z_$][A-Za-z0-9_$]{0,7}", 8).unwrap();
    static ref STRING_CONTENT: Regex = compile_regex(r"[ -~]{0,12}", 12).unwrap();
}

/// Mints names and literal values. The counter is the only state of its
/// own; everything random comes from the caller's generator.
#[derive(Clone, Debug, Default)]
pub struct SymbolNameGenerator {
    counter: u64,
}

impl SymbolNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_number(&mut self) -> u64 {
        let current = self.counter;
        self.counter += 1;
        current
    }

    pub fn get_string<R: Rng>(&self, rng: &mut R) -> String {
        rng.sample(&*STRING_CONTENT)
    }

    /// Always usable as an unquoted property name.
    pub fn get_property_name<R: Rng>(&self, rng: &mut R) -> String {
        rng.sample(&*PROPERTY_NAME)
    }

    /// Small values are much more likely than large ones.
    pub fn get_random_number<R: Rng>(&self, rng: &mut R) -> u32 {
        match rng.gen_range(0..10) {
            0..=4 => rng.gen_range(0..10),
            5..=7 => rng.gen_range(10..1000),
            _ => rng.gen(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn is_property_name(s: &str) -> bool {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first.is_ascii_alphabetic() || first == '_' || first == '$')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    }

    #[test]
    fn counter_is_monotonic() {
        let mut names = SymbolNameGenerator::new();
        let drawn: Vec<u64> = (0..5).map(|_| names.next_number()).collect();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn property_names_are_identifiers() {
        let names = SymbolNameGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let name = names.get_property_name(&mut rng);
            assert!(is_property_name(&name), "bad property name {name:?}");
            assert!(name.len() <= 8);
        }
    }

    #[test]
    fn strings_are_printable_ascii() {
        let names = SymbolNameGenerator::new();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let s = names.get_string(&mut rng);
            assert!(s.len() <= 12);
            assert!(s.chars().all(|c| (' '..='~').contains(&c)));
        }
    }

    #[test]
    fn same_seed_same_values() {
        let names = SymbolNameGenerator::new();
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            assert_eq!(names.get_string(&mut a), names.get_string(&mut b));
            assert_eq!(names.get_random_number(&mut a), names.get_random_number(&mut b));
            assert_eq!(names.get_property_name(&mut a), names.get_property_name(&mut b));
        }
    }

    #[test]
    fn small_numbers_dominate() {
        let names = SymbolNameGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let small = (0..1000)
            .filter(|_| names.get_random_number(&mut rng) < 1000)
            .count();
        assert!(small > 500);
    }
}
