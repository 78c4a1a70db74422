use std::{fmt, marker::PhantomData};

use crate::gene::Allele;

/// Scores a genome. Higher is better.
///
/// Scoring takes `&self` and a read-only view of the genome, so an
/// implementation cannot alias state between two evaluations behind the
/// engine's back. Anything that needs scratch space allocates it per call.
pub trait Challenge<T: Allele> {
    fn score(&self, genome: &[T]) -> f64;
}

/// A fitness function paired with the context it reads.
///
/// The context is an explicit, named value owned by the binding. The engine
/// only ever hands it out by shared reference during evaluation; the caller can
/// reach it mutably between steps through `Engine::challenge_mut`.
///
/// ```rust
/// use vitae::evolution::{Challenge, FitnessBinding};
///
/// struct Target {
///     value: i32,
/// }
///
/// let binding = FitnessBinding::new(
///     |genome: &[i32], target: &Target| {
///         -genome.iter().map(|v| (v - target.value).abs() as f64).sum::<f64>()
///     },
///     Target { value: 3 },
/// );
///
/// assert_eq!(binding.score(&[3, 3]), 0.0);
/// assert_eq!(binding.score(&[1, 4]), -3.0);
/// ```
pub struct FitnessBinding<T, C, F> {
    function: F,
    context: C,
    _marker: PhantomData<fn(&[T])>,
}

impl<T, C, F> FitnessBinding<T, C, F>
where
    T: Allele,
    F: Fn(&[T], &C) -> f64,
{
    pub fn new(function: F, context: C) -> Self {
        Self {
            function,
            context,
            _marker: PhantomData,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

impl<T, C, F> Challenge<T> for FitnessBinding<T, C, F>
where
    T: Allele,
    F: Fn(&[T], &C) -> f64,
{
    fn score(&self, genome: &[T]) -> f64 {
        (self.function)(genome, &self.context)
    }
}

impl<T, C, F> Clone for FitnessBinding<T, C, F>
where
    C: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            context: self.context.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C: fmt::Debug, F> fmt::Debug for FitnessBinding<T, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessBinding")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
