use std::fmt;

use tracing::{debug, info, trace, warn};

use super::{challenge::Challenge, options::EnvironmentParams};
use crate::{
    breeding,
    error::{GeneticError, Result},
    gene::{Allele, Gene},
    population::Population,
    rng::RandomNumberGenerator,
    selection::ProportionalSelection,
};

/// Why an engine refuses to advance. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No fitness function is bound.
    Unbound,
    /// The population died out.
    Extinct,
    /// `max_generation_count` generations have run.
    GenerationLimit,
    /// The best gene reached `desired_fitness`.
    DesiredFitness,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Termination::Unbound => "no fitness function bound",
            Termination::Extinct => "population is extinct",
            Termination::GenerationLimit => "generation limit reached",
            Termination::DesiredFitness => "desired fitness reached",
        };
        f.write_str(reason)
    }
}

/// What happened during the last successful `step`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Genes removed by the fitness-weighted age test.
    pub culled_by_age: usize,
    /// Genes removed because the population exceeded `max_population`.
    pub trimmed: usize,
    /// Fitness summed over the survivors, before breeding.
    pub total_fitness: f64,
    pub pair_quota: usize,
    pub pairs_assigned: usize,
    pub offspring: usize,
    /// Pairs whose partner search ran out of attempts.
    pub partner_fallbacks: usize,
    /// Whether selection ran out of passes and accepted proposers unconditionally.
    pub forced_selection: bool,
}

/// Runs one population through successive generations.
///
/// Construction scores and sorts the initial population. Every call to
/// [`Engine::step`] then ages, culls, trims, breeds and re-sorts it, driven by
/// a random stream seeded from the value passed in.
///
/// ```rust
/// use vitae::evolution::{Engine, EnvironmentParams, FitnessBinding};
/// use vitae::population::generate_initial_population;
///
/// let params = EnvironmentParams::builder()
///     .desired_fitness(40.0)
///     .max_generation_count(5)
///     .max_population(50)
///     .build()
///     .unwrap();
/// let challenge = FitnessBinding::new(
///     |genome: &[u8], _: &()| genome.iter().map(|&v| v as f64).sum(),
///     (),
/// );
/// let population = generate_initial_population::<u8>(20, 8, 0, 6, 7).unwrap();
///
/// let mut engine = Engine::new(population, params, challenge).unwrap();
/// let mut seed = 0;
/// while engine.step(seed).unwrap() {
///     seed += 1;
/// }
///
/// assert!(engine.termination().is_some());
/// assert!(engine.population().is_sorted_by_fitness());
/// ```
#[derive(Debug, Clone)]
pub struct Engine<T, C> {
    population: Population<T>,
    params: EnvironmentParams,
    challenge: Option<C>,
    generation: usize,
    last_report: Option<StepReport>,
}

impl<T, C> Engine<T, C>
where
    T: Allele,
    C: Challenge<T>,
{
    /// Creates an engine, scoring and sorting `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` does not validate, if the genes differ in
    /// genome length or have empty genomes, or if any score is not finite.
    pub fn new(population: Population<T>, params: EnvironmentParams, challenge: C) -> Result<Self> {
        Self::with_optional_challenge(population, params, Some(challenge))
    }

    /// Creates an engine with no fitness function.
    ///
    /// Genes keep whatever fitness they carry and the first `step` reports
    /// [`Termination::Unbound`].
    pub fn unbound(population: Population<T>, params: EnvironmentParams) -> Result<Self> {
        Self::with_optional_challenge(population, params, None)
    }

    pub(crate) fn with_optional_challenge(
        mut population: Population<T>,
        params: EnvironmentParams,
        challenge: Option<C>,
    ) -> Result<Self> {
        params.validate()?;
        if population.genome_size()? == Some(0) {
            return Err(GeneticError::Configuration(
                "Genome size cannot be zero".to_string(),
            ));
        }

        if let Some(challenge) = &challenge {
            for gene in population.genes_mut() {
                let fitness = breeding::evaluate(challenge, gene.data())?;
                gene.set_fitness(fitness);
            }
        }
        population.sort_by_fitness();

        debug!(
            population = population.len(),
            best = population.best().map(Gene::fitness),
            "engine initialised"
        );

        Ok(Self {
            population,
            params,
            challenge,
            generation: 0,
            last_report: None,
        })
    }

    /// Population, sorted by non-increasing fitness.
    pub fn population(&self) -> &Population<T> {
        &self.population
    }

    pub fn into_population(self) -> Population<T> {
        self.population
    }

    /// The fittest gene, if any survived.
    pub fn best(&self) -> Option<&Gene<T>> {
        self.population.best()
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn params(&self) -> &EnvironmentParams {
        &self.params
    }

    pub fn challenge(&self) -> Option<&C> {
        self.challenge.as_ref()
    }

    /// Mutable access to the fitness function and its context between steps.
    ///
    /// Scores already stored on genes are not refreshed.
    pub fn challenge_mut(&mut self) -> Option<&mut C> {
        self.challenge.as_mut()
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// Returns the first termination condition that currently holds.
    pub fn termination(&self) -> Option<Termination> {
        if self.challenge.is_none() {
            return Some(Termination::Unbound);
        }
        let Some(best) = self.population.best() else {
            return Some(Termination::Extinct);
        };
        if self.generation >= self.params.get_max_generation_count() {
            return Some(Termination::GenerationLimit);
        }
        if best.fitness() >= self.params.get_desired_fitness() {
            return Some(Termination::DesiredFitness);
        }
        None
    }

    /// Breeds one child from `x` and `y` with this engine's mutation chance and fitness function.
    ///
    /// # Errors
    ///
    /// Returns `MissingChallenge` for an unbound engine and
    /// `GenomeLengthMismatch` if the parents differ in length.
    pub fn reproduce(
        &self,
        x: &Gene<T>,
        y: &Gene<T>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Gene<T>> {
        let challenge = self
            .challenge
            .as_ref()
            .ok_or(GeneticError::MissingChallenge)?;
        breeding::reproduce(x, y, self.params.get_mutation_chance(), challenge, rng)
    }

    /// Advances the population by one generation.
    ///
    /// Returns `Ok(false)` without touching the population when a
    /// [`Termination`] condition holds, `Ok(true)` once the generation has run.
    ///
    /// # Errors
    ///
    /// Returns `FitnessCalculation` if an offspring scores NaN or infinity.
    /// The population is left as it was after trimming in that case.
    pub fn step(&mut self, seed: u64) -> Result<bool> {
        if let Some(reason) = self.termination() {
            info!(generation = self.generation, %reason, "evolution finished");
            return Ok(false);
        }
        let Some(challenge) = self.challenge.as_ref() else {
            return Ok(false);
        };

        let mut rng = RandomNumberGenerator::from_seed(seed);
        let mut report = StepReport::default();

        self.population.age_all();
        if self.params.is_aging_enabled() {
            report.culled_by_age = self.population.cull_aged(
                self.params.get_desired_fitness(),
                self.params.get_max_gene_age(),
            );
        }
        report.trimmed = self.population.trim(self.params.get_max_population());
        report.total_fitness = self.population.total_fitness();

        let offspring = if self.population.is_empty() {
            Vec::new()
        } else {
            breed_generation(
                &self.population,
                &self.params,
                challenge,
                &mut rng,
                &mut report,
            )?
        };

        report.offspring = offspring.len();
        self.population.extend(offspring);
        self.population.sort_by_fitness();
        self.generation += 1;

        debug!(
            generation = self.generation,
            culled = report.culled_by_age,
            trimmed = report.trimmed,
            total_fitness = report.total_fitness,
            pairs = report.pairs_assigned,
            offspring = report.offspring,
            population = self.population.len(),
            "generation complete"
        );
        self.last_report = Some(report);
        Ok(true)
    }
}

/// Assigns reproducing pairs until the quota is met and returns their offspring.
///
/// Each pass walks the population in order. Once `max_selection_passes`
/// passes have not filled the quota, every remaining candidate is accepted.
fn breed_generation<T, C>(
    population: &Population<T>,
    params: &EnvironmentParams,
    challenge: &C,
    rng: &mut RandomNumberGenerator,
    report: &mut StepReport,
) -> Result<Vec<Gene<T>>>
where
    T: Allele,
    C: Challenge<T>,
{
    let quota = params.pair_quota(population.len());
    report.pair_quota = quota;

    let selection = ProportionalSelection::new(
        report.total_fitness,
        params.get_successful_mate_threshold(),
        params.get_max_partner_attempts(),
    );
    let genes = population.as_slice();
    let mut offspring = Vec::new();
    let mut pass = 0;

    'passes: while report.pairs_assigned < quota {
        let forced = pass >= params.get_max_selection_passes();
        if forced && !report.forced_selection {
            warn!(
                passes = pass,
                assigned = report.pairs_assigned,
                quota,
                "selection pass limit reached, accepting remaining proposers"
            );
            report.forced_selection = true;
        }

        for (index, proposer) in genes.iter().enumerate() {
            if !forced && !selection.accepts(proposer.fitness(), rng) {
                continue;
            }

            let partner = selection.find_partner(genes, proposer.fitness(), rng);
            if partner.is_fallback() {
                report.partner_fallbacks += 1;
                warn!(
                    proposer = index,
                    attempts = params.get_max_partner_attempts(),
                    "no eligible partner drawn, pairing with the fittest gene"
                );
            }

            let children = rng.gen_count(params.get_max_num_of_children_per_pair());
            trace!(
                proposer = index,
                partner = partner.index(),
                children,
                "pair assigned"
            );
            for _ in 0..children {
                offspring.push(breeding::reproduce(
                    proposer,
                    &genes[partner.index()],
                    params.get_mutation_chance(),
                    challenge,
                    rng,
                )?);
            }

            report.pairs_assigned += 1;
            if report.pairs_assigned >= quota {
                break 'passes;
            }
        }
        pass += 1;
    }

    Ok(offspring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::FitnessBinding;

    type SumBinding = FitnessBinding<u8, (), fn(&[u8], &()) -> f64>;

    fn sum(genome: &[u8], _: &()) -> f64 {
        genome.iter().map(|&v| v as f64).sum()
    }

    fn sum_binding() -> SumBinding {
        FitnessBinding::new(sum as fn(&[u8], &()) -> f64, ())
    }

    fn population(genomes: &[&[u8]]) -> Population<u8> {
        Population::from(
            genomes
                .iter()
                .map(|g| Gene::new(g.to_vec(), 0, 8).unwrap())
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_new_scores_and_sorts() {
        let engine = Engine::new(
            population(&[&[1, 1], &[7, 7], &[3, 4]]),
            EnvironmentParams::default(),
            sum_binding(),
        )
        .unwrap();

        let fitness: Vec<f64> = engine.population().iter().map(Gene::fitness).collect();
        assert_eq!(fitness, vec![14.0, 7.0, 2.0]);
        assert_eq!(engine.generation(), 0);
        assert!(engine.last_report().is_none());
    }

    #[test]
    fn test_new_rejects_mixed_lengths() {
        let result = Engine::new(
            population(&[&[1, 1], &[7, 7, 7]]),
            EnvironmentParams::default(),
            sum_binding(),
        );
        assert!(matches!(
            result,
            Err(GeneticError::GenomeLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_new_rejects_empty_genomes() {
        let genes = population(&[&[], &[]]);

        let bound = Engine::new(genes.clone(), EnvironmentParams::default(), sum_binding());
        assert!(matches!(bound, Err(GeneticError::Configuration(_))));

        let unbound: Result<Engine<u8, SumBinding>> =
            Engine::unbound(genes, EnvironmentParams::default());
        assert!(matches!(unbound, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_termination_order() {
        let params = EnvironmentParams::builder()
            .max_generation_count(0)
            .desired_fitness(1.0)
            .build()
            .unwrap();

        let unbound: Engine<u8, SumBinding> =
            Engine::unbound(Population::new(), params.clone()).unwrap();
        assert_eq!(unbound.termination(), Some(Termination::Unbound));

        let extinct = Engine::new(Population::<u8>::new(), params.clone(), sum_binding()).unwrap();
        assert_eq!(extinct.termination(), Some(Termination::Extinct));

        let capped = Engine::new(population(&[&[4, 4]]), params, sum_binding()).unwrap();
        assert_eq!(capped.termination(), Some(Termination::GenerationLimit));
    }

    #[test]
    fn test_step_updates_report() {
        let params = EnvironmentParams::builder()
            .desired_fitness(100.0)
            .max_population(3)
            .build()
            .unwrap();
        let mut engine = Engine::new(
            population(&[&[1, 2], &[2, 3], &[3, 4], &[4, 5], &[5, 6]]),
            params,
            sum_binding(),
        )
        .unwrap();

        assert!(engine.step(1).unwrap());

        let report = engine.last_report().unwrap().clone();
        assert_eq!(report.trimmed, 2);
        assert_eq!(report.total_fitness, 11.0 + 9.0 + 7.0);
        assert_eq!(report.pair_quota, 3);
        assert_eq!(report.pairs_assigned, 3);
        assert!(report.offspring >= 3 && report.offspring <= 6);
        assert_eq!(engine.population().len(), 3 + report.offspring);
        assert!(engine.population().is_sorted_by_fitness());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_reproduce_requires_challenge() {
        let genes = population(&[&[1, 2], &[3, 4]]);
        let engine: Engine<u8, SumBinding> =
            Engine::unbound(genes.clone(), EnvironmentParams::default()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);

        assert_eq!(
            engine.reproduce(&genes[0], &genes[1], &mut rng),
            Err(GeneticError::MissingChallenge)
        );
    }

    #[test]
    fn test_zero_ratio_breeds_nothing() {
        let params = EnvironmentParams::builder()
            .desired_fitness(100.0)
            .reproduction_pairs_ratio(0.0)
            .build()
            .unwrap();
        let mut engine =
            Engine::new(population(&[&[1, 2], &[3, 4]]), params, sum_binding()).unwrap();

        assert!(engine.step(3).unwrap());
        assert_eq!(engine.last_report().unwrap().offspring, 0);
        assert!(engine.population().iter().all(|gene| gene.age() == 1));
    }
}
