//! # Reproduction
//!
//! Single-point crossover followed by an optional one-locus mutation.
//!
//! For a cut point `c` drawn from `[0, size)` the child takes `x[0..=c]` from
//! the first parent and `y[c + 1..]` from the second, so it always inherits at
//! least the first locus of `x`. With a probability of `mutation_chance / 100`
//! one locus is then overwritten with a value drawn from the first parent's
//! `[min, max)` range. The child is scored before it is returned.

use tracing::trace;

use crate::{
    error::{GeneticError, Result},
    evolution::Challenge,
    gene::{Allele, Gene},
    rng::RandomNumberGenerator,
};

/// Single-point crossover of `x` and `y` at `cut`, without mutation.
///
/// # Errors
///
/// Returns `GenomeLengthMismatch` if the parents differ in length and
/// `OutOfBounds` if `cut` is not a valid locus.
pub fn crossover<T: Allele>(x: &[T], y: &[T], cut: usize) -> Result<Vec<T>> {
    if x.len() != y.len() {
        return Err(GeneticError::GenomeLengthMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    if cut >= x.len() {
        return Err(GeneticError::OutOfBounds(format!(
            "cut point {} outside a genome of length {}",
            cut,
            x.len()
        )));
    }
    let mut child = Vec::with_capacity(x.len());
    child.extend_from_slice(&x[..=cut]);
    child.extend_from_slice(&y[cut + 1..]);
    Ok(child)
}

/// Breeds one scored child out of `x` and `y`.
///
/// # Errors
///
/// Returns `GenomeLengthMismatch` if the parents differ in length,
/// `OutOfBounds` if they are empty and `FitnessCalculation` if the child's
/// score is not finite.
pub fn reproduce<T, C>(
    x: &Gene<T>,
    y: &Gene<T>,
    mutation_chance: u8,
    challenge: &C,
    rng: &mut RandomNumberGenerator,
) -> Result<Gene<T>>
where
    T: Allele,
    C: Challenge<T>,
{
    if x.size() != y.size() {
        return Err(GeneticError::GenomeLengthMismatch {
            expected: x.size(),
            found: y.size(),
        });
    }
    if x.size() == 0 {
        return Err(GeneticError::OutOfBounds(
            "cannot breed genes with an empty genome".to_string(),
        ));
    }

    let cut = rng.gen_index(x.size());
    let mut data = crossover(x.data(), y.data(), cut)?;

    if rng.chance(mutation_chance) {
        let locus = rng.gen_index(data.len());
        let (min, max) = x.bounds();
        data[locus] = rng.gen_value(min, max);
        trace!(cut, locus, "mutated offspring");
    }

    let fitness = evaluate(challenge, &data)?;
    let (min, max) = x.bounds();
    let mut child = Gene::from_parts(data, min, max);
    child.set_fitness(fitness);
    Ok(child)
}

/// Scores a genome, rejecting NaN and infinite results.
pub(crate) fn evaluate<T, C>(challenge: &C, genome: &[T]) -> Result<f64>
where
    T: Allele,
    C: Challenge<T>,
{
    let score = challenge.score(genome);
    if !score.is_finite() {
        return Err(GeneticError::FitnessCalculation(format!(
            "Non-finite fitness score encountered: {}",
            score
        )));
    }
    Ok(score)
}
