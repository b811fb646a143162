use rand::{distributions::WeightedIndex, prelude::Distribution, rngs::StdRng, Rng, RngCore, SeedableRng};

/// The single source of entropy for a run. Every random decision of every
/// generator goes through here, so a seed pins down the whole output.
#[derive(Clone, Debug)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        RandomSource {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Uniform in `0..bound`; `bound` must be positive.
    pub fn next_int(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Index into `weights` drawn proportionally; `None` when no weight is
    /// positive. Non-finite weights count as 0.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let usable = |w: f64| w.is_finite() && w > 0.0;

        let largest = weights.iter().copied().filter(|w| usable(*w)).fold(0.0, f64::max);
        if largest == 0.0 {
            return None;
        }

        // scaled into (0, 1] so the total stays finite however large the knobs are
        let scaled = weights
            .iter()
            .map(|w| if usable(*w) { w / largest } else { 0.0 })
            .collect::<Vec<_>>();

        let dist = WeightedIndex::new(&scaled).ok()?;
        Some(dist.sample(&mut self.rng))
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
