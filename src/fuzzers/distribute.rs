use std::iter::once;

use rand::Rng;

use super::{invoke, Fuzz};
use crate::{context::FuzzingContext, error::GenResult, node::Node, types::TypeSet};

/// Length of a generated list: 0 when nothing fits, otherwise uniform in `0..=max`.
pub fn generate_length<R: Rng>(rng: &mut R, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        rng.gen_range(0..=max)
    }
}

/// Splits `budget` into `slots` shares.
///
/// Each slot is first given a share of 1 while the budget lasts, then what is
/// left is cut at `slots - 1` uniform points. Shares always sum to exactly
/// `budget` when there is at least one slot.
pub fn partition<R: Rng>(rng: &mut R, budget: usize, slots: usize) -> Vec<usize> {
    if slots == 0 {
        return vec![];
    }

    let mut shares = vec![0; slots];
    let minimum = budget.min(slots);
    for share in shares.iter_mut().take(minimum) {
        *share = 1;
    }

    let residual = budget - minimum;
    if residual > 0 {
        let mut cuts: Vec<usize> = (0..slots - 1).map(|_| rng.gen_range(0..=residual)).collect();
        cuts.sort_unstable();

        let mut previous = 0;
        for (share, cut) in shares.iter_mut().zip(cuts.into_iter().chain(once(residual))) {
            *share += cut - previous;
            previous = cut;
        }
    }

    shares
}

/// Partitions `budget` among `fuzzers` and generates one node per slot, in order.
pub fn distribute<F: Fuzz>(
    context: &mut FuzzingContext,
    budget: usize,
    fuzzers: &[F],
    types: &TypeSet,
) -> GenResult<Vec<Node>> {
    let shares = partition(&mut context.random, budget, fuzzers.len());

    fuzzers
        .iter()
        .zip(shares)
        .map(|(fuzzer, share)| invoke(fuzzer, &mut *context, share, types))
        .collect()
}
