//! Weight vector operations for the genetic operators.
//!
//! These functions work on one flat layer at a time. [`Genome`](crate::genome::Genome)
//! applies them layer by layer, because layers differ in length and a cut
//! point is only meaningful inside a single layer.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] draws a uniformly distributed layer
//! - **Crossover**: [`crossover`] / [`crossover_at`] perform n-point crossover
//! - **Mutation**: [`mutate`] replaces weights with fresh uniform draws
//!
//! # N-point Crossover
//!
//! `n` cut positions are drawn in `[0, len]`, sorted ascending and closed with
//! `len` itself. The resulting segments alternate between swapping and
//! staying, starting with a swap:
//!
//! ```text
//! parents   a a a a a a      cuts: [2, 4, 6]
//!           b b b b b b
//! segments  [0,2) swap | [2,4) stay | [4,6) swap
//! children  b b a a b b
//!           a a b b a a
//! ```
//!
//! Sorting the cuts keeps every segment well formed; duplicate cuts simply
//! produce empty segments.
//!
//! # Replacement Mutation
//!
//! Mutation does not perturb a weight, it replaces it: with probability
//! `rate` a weight is redrawn from `U[-1, 1]`, otherwise it is left untouched
//! bit for bit.

use rand::Rng;
use rand_distr::{Distribution as _, Uniform};

/// Range of a freshly mutated weight.
pub const MUTATION_RANGE: (f32, f32) = (-1.0, 1.0);

/// Generates a layer of `len` weights uniformly distributed in `[-bound, bound]`.
///
/// # Panics
///
/// Panics if `bound` is negative or not finite.
pub fn random<R>(rng: &mut R, bound: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    let dist = Uniform::new_inclusive(-bound, bound).expect("weight bound must be finite");
    (0..len).map(|_| dist.sample(rng)).collect()
}

/// Draws `n_points` cut positions in `[0, len]`, sorted ascending, with `len`
/// appended as the final boundary.
pub fn crossover_cuts<R>(rng: &mut R, len: usize, n_points: usize) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut cuts = (0..n_points)
        .map(|_| rng.random_range(0..=len))
        .collect::<Vec<_>>();
    cuts.sort_unstable();
    cuts.push(len);
    cuts
}

/// Crosses two parent layers at the given ascending boundaries.
///
/// The last boundary should be the layer length; anything after the last
/// boundary is not copied.
///
/// # Panics
///
/// Panics if the parents have different lengths or the boundaries are not
/// ascending or exceed the layer length.
///
/// # Examples
///
/// ```
/// use snakevo_training::weights;
///
/// let (c1, c2) = weights::crossover_at(&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0], &[1, 3]);
/// assert_eq!(c1, [2.0, 1.0, 1.0]);
/// assert_eq!(c2, [1.0, 2.0, 2.0]);
/// ```
#[must_use]
pub fn crossover_at(p1: &[f32], p2: &[f32], cuts: &[usize]) -> (Vec<f32>, Vec<f32>) {
    assert_eq!(p1.len(), p2.len());
    assert!(cuts.is_sorted(), "crossover cuts must be ascending");

    let mut c1 = Vec::with_capacity(p1.len());
    let mut c2 = Vec::with_capacity(p2.len());
    let mut start = 0;
    for (i, &end) in cuts.iter().enumerate() {
        let (s1, s2) = (&p1[start..end], &p2[start..end]);
        if i % 2 == 0 {
            c1.extend_from_slice(s2);
            c2.extend_from_slice(s1);
        } else {
            c1.extend_from_slice(s1);
            c2.extend_from_slice(s2);
        }
        start = end;
    }
    (c1, c2)
}

/// Performs n-point crossover between two parent layers.
///
/// # Panics
///
/// Panics if parent layers have different lengths.
pub fn crossover<R>(p1: &[f32], p2: &[f32], n_points: usize, rng: &mut R) -> (Vec<f32>, Vec<f32>)
where
    R: Rng + ?Sized,
{
    let cuts = crossover_cuts(rng, p1.len(), n_points);
    crossover_at(p1, p2, &cuts)
}

/// Replaces each weight with a fresh draw from [`MUTATION_RANGE`] with
/// probability `rate`.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(weights: &mut [f32], rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let (low, high) = MUTATION_RANGE;
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = rng.random_range(low..=high);
        }
    }
}
