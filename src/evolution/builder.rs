use tracing::warn;

use crate::{
    error::{GeneticError, OptionExt, Result},
    gene::Allele,
    population::{generate_initial_population, Population},
};

use super::{Challenge, Engine, EnvironmentParams};

/// Fluent construction of an [`Engine`].
///
/// The population is required. Parameters default to
/// `EnvironmentParams::default()`. Leaving out the challenge builds an unbound
/// engine whose first `step` reports termination.
///
/// ```rust
/// use vitae::evolution::{EngineBuilder, EnvironmentParams, FitnessBinding};
///
/// let engine = EngineBuilder::new()
///     .with_random_population(30, 8, 0u8, 8u8, 0x1337)
///     .unwrap()
///     .with_params(EnvironmentParams::default())
///     .with_challenge(FitnessBinding::new(
///         |genome: &[u8], _: &()| genome.iter().filter(|&&v| v == 0).count() as f64,
///         (),
///     ))
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.population().len(), 30);
/// ```
pub struct EngineBuilder<T, C>
where
    T: Allele,
    C: Challenge<T>,
{
    population: Option<Population<T>>,
    params: Option<EnvironmentParams>,
    challenge: Option<C>,
}

impl<T, C> EngineBuilder<T, C>
where
    T: Allele,
    C: Challenge<T>,
{
    pub fn new() -> Self {
        Self {
            population: None,
            params: None,
            challenge: None,
        }
    }

    pub fn with_population(mut self, population: Population<T>) -> Self {
        self.population = Some(population);
        self
    }

    /// Seeds the population with [`generate_initial_population`].
    pub fn with_random_population(
        mut self,
        count: usize,
        genome_size: usize,
        lower_bound: T,
        upper_bound: T,
        seed: u64,
    ) -> Result<Self> {
        self.population = Some(generate_initial_population(
            count,
            genome_size,
            lower_bound,
            upper_bound,
            seed,
        )?);
        Ok(self)
    }

    pub fn with_params(mut self, params: EnvironmentParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_challenge(mut self, challenge: C) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn build(self) -> Result<Engine<T, C>> {
        let population = self.population.ok_or_else_genetic(|| {
            GeneticError::Configuration("Population not specified".to_string())
        })?;
        let params = self.params.unwrap_or_default();

        if self.challenge.is_none() {
            warn!("building an engine without a fitness function, it will not evolve");
        }

        Engine::with_optional_challenge(population, params, self.challenge)
    }
}

impl<T, C> Default for EngineBuilder<T, C>
where
    T: Allele,
    C: Challenge<T>,
{
    fn default() -> Self {
        Self::new()
    }
}
