//! # Population
//!
//! An ordered collection of `Gene`s. Once handed to an `Engine` the population
//! is kept sorted by non-increasing fitness after every mutating operation, so
//! the first gene is always the best one.
//!
//! This module also hosts the seeded initial population generator.
//!
//! ## Example
//!
//! ```rust
//! use vitae::population::generate_initial_population;
//!
//! let population = generate_initial_population::<u8>(100, 8, 0, 8, 0x1337).unwrap();
//! assert_eq!(population.len(), 100);
//! assert!(population.iter().all(|gene| gene.size() == 8));
//! ```

use std::cmp::Ordering;

use crate::{
    error::{GeneticError, Result},
    gene::{check_bounds, Allele, Gene},
    rng::RandomNumberGenerator,
};

/// Number of genes tolerated above `max_population` once the overpopulation trim ran.
pub const OVERPOPULATION_SLACK: usize = 0;

#[derive(Clone, Debug, PartialEq)]
pub struct Population<T> {
    genes: Vec<Gene<T>>,
}

impl<T: Allele> Population<T> {
    pub fn new() -> Self {
        Self { genes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Gene<T>> {
        self.genes.iter()
    }

    pub fn as_slice(&self) -> &[Gene<T>] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> Option<&Gene<T>> {
        self.genes.get(index)
    }

    /// The first gene, which is the fittest one once the population is sorted.
    pub fn best(&self) -> Option<&Gene<T>> {
        self.genes.first()
    }

    pub fn into_vec(self) -> Vec<Gene<T>> {
        self.genes
    }

    /// Sum of every gene's fitness.
    pub fn total_fitness(&self) -> f64 {
        self.genes.iter().map(Gene::fitness).sum()
    }

    /// Whether the genes are ordered by non-increasing fitness.
    pub fn is_sorted_by_fitness(&self) -> bool {
        self.genes
            .windows(2)
            .all(|pair| pair[0].fitness() >= pair[1].fitness())
    }

    /// Returns the shared genome length, `None` for an empty population.
    ///
    /// # Errors
    ///
    /// Returns `GenomeLengthMismatch` for the first gene whose length differs
    /// from the first gene's.
    pub fn genome_size(&self) -> Result<Option<usize>> {
        let Some(first) = self.genes.first() else {
            return Ok(None);
        };
        let expected = first.size();
        match self.genes.iter().find(|gene| gene.size() != expected) {
            Some(gene) => Err(GeneticError::GenomeLengthMismatch {
                expected,
                found: gene.size(),
            }),
            None => Ok(Some(expected)),
        }
    }

    /// Stable sort by descending fitness.
    pub(crate) fn sort_by_fitness(&mut self) {
        self.genes
            .sort_by(|a, b| b.fitness().partial_cmp(&a.fitness()).unwrap_or_else(|| {
                // NaN sorts last
                if b.fitness().is_nan() && !a.fitness().is_nan() {
                    Ordering::Less
                } else if a.fitness().is_nan() && !b.fitness().is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }));
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [Gene<T>] {
        &mut self.genes
    }

    pub(crate) fn age_all(&mut self) {
        self.genes.iter_mut().for_each(Gene::inc_age);
    }

    /// Removes every gene for which `age * desired_fitness / fitness >= max_age`.
    ///
    /// Weaker genes reach the limit at a younger age. Returns the number removed.
    pub(crate) fn cull_aged(&mut self, desired_fitness: f64, max_age: usize) -> usize {
        let before = self.genes.len();
        let max_age = max_age as f64;
        // A NaN ratio (0 / 0) does not count as aged out.
        self.genes
            .retain(|gene| !(gene.age() as f64 * desired_fitness / gene.fitness() >= max_age));
        before - self.genes.len()
    }

    /// Drops the weakest genes from the tail until at most
    /// `max_population + OVERPOPULATION_SLACK` remain. Returns the number removed.
    ///
    /// Assumes the population is sorted.
    pub(crate) fn trim(&mut self, max_population: usize) -> usize {
        let keep = max_population.saturating_add(OVERPOPULATION_SLACK);
        if self.genes.len() <= keep {
            return 0;
        }
        let removed = self.genes.len() - keep;
        self.genes.truncate(keep);
        removed
    }

    pub(crate) fn extend(&mut self, offspring: Vec<Gene<T>>) {
        self.genes.extend(offspring);
    }
}

impl<T: Allele> Default for Population<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Gene<T>>> for Population<T> {
    fn from(genes: Vec<Gene<T>>) -> Self {
        Self { genes }
    }
}

impl<T> std::ops::Index<usize> for Population<T> {
    type Output = Gene<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl<'a, T> IntoIterator for &'a Population<T> {
    type Item = &'a Gene<T>;
    type IntoIter = std::slice::Iter<'a, Gene<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

/// Seeds a population of `count` unevaluated genes.
///
/// Every locus is drawn independently and uniformly from
/// `[lower_bound, upper_bound)` using a generator seeded with `seed`, so equal
/// arguments always yield equal populations. Fitness starts at 0; the engine
/// scores the genes when it is constructed.
///
/// # Errors
///
/// Returns `InvalidBounds` if `[lower_bound, upper_bound)` cannot be sampled
/// and `Configuration` if `genome_size` is zero.
pub fn generate_initial_population<T: Allele>(
    count: usize,
    genome_size: usize,
    lower_bound: T,
    upper_bound: T,
    seed: u64,
) -> Result<Population<T>> {
    check_bounds(lower_bound, upper_bound)?;
    if genome_size == 0 {
        return Err(GeneticError::Configuration(
            "Genome size cannot be zero".to_string(),
        ));
    }

    let mut rng = RandomNumberGenerator::from_seed(seed);
    let genes = (0..count)
        .map(|_| {
            let data = (0..genome_size)
                .map(|_| rng.gen_value(lower_bound, upper_bound))
                .collect();
            Gene::from_parts(data, lower_bound, upper_bound)
        })
        .collect();

    Ok(Population { genes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(fitness: &[f64]) -> Population<u8> {
        let genes = fitness
            .iter()
            .map(|&f| {
                let mut gene = Gene::new(vec![0u8; 4], 0, 8).unwrap();
                gene.set_fitness(f);
                gene
            })
            .collect::<Vec<_>>();
        Population::from(genes)
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_initial_population::<u8>(50, 8, 0, 8, 0x1337).unwrap();
        let b = generate_initial_population::<u8>(50, 8, 0, 8, 0x1337).unwrap();
        assert_eq!(a, b);

        let c = generate_initial_population::<u8>(50, 8, 0, 8, 0x1338).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_respects_bounds() {
        let population = generate_initial_population::<i32>(30, 16, -5, 5, 9).unwrap();
        for gene in &population {
            assert_eq!(gene.size(), 16);
            assert_eq!(gene.age(), 0);
            assert_eq!(gene.fitness(), 0.0);
            assert_eq!(gene.bounds(), (-5, 5));
            assert!(gene.data().iter().all(|v| (-5..5).contains(v)));
        }
    }

    #[test]
    fn test_generate_rejects_inverted_bounds() {
        assert!(matches!(
            generate_initial_population::<u8>(10, 8, 8, 8, 1),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(matches!(
            generate_initial_population::<u8>(10, 8, 9, 2, 1),
            Err(GeneticError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_generate_rejects_overflowing_float_range() {
        assert!(matches!(
            generate_initial_population::<f64>(2, 3, f64::MIN, f64::MAX, 1),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(matches!(
            generate_initial_population::<f64>(2, 3, 0.0, f64::INFINITY, 1),
            Err(GeneticError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_generate_rejects_empty_genome() {
        assert!(matches!(
            generate_initial_population::<u8>(10, 0, 0, 8, 1),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_sort_by_fitness_descending() {
        let mut population = scored(&[1.0, 5.0, f64::NAN, 3.0, 5.0]);
        population.sort_by_fitness();

        assert!(population.is_sorted_by_fitness());
        assert_eq!(population[0].fitness(), 5.0);
        assert!(population[4].fitness().is_nan());
    }

    #[test]
    fn test_trim_keeps_strongest() {
        let mut population = scored(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]);

        let removed = population.trim(4);

        assert_eq!(removed, 2);
        assert_eq!(population.len(), 4 + OVERPOPULATION_SLACK);
        assert_eq!(population[3].fitness(), 7.0);
        assert_eq!(population.trim(4), 0);
    }

    #[test]
    fn test_cull_aged_is_fitness_weighted() {
        let mut population = scored(&[60.0, 30.0, 6.0]);
        population.age_all();
        population.age_all();

        // age 2: ratios are 2, 4 and 20 against a limit of 4
        let culled = population.cull_aged(60.0, 4);

        assert_eq!(culled, 2);
        assert_eq!(population.len(), 1);
        assert_eq!(population[0].fitness(), 60.0);
    }

    #[test]
    fn test_total_fitness() {
        assert_eq!(scored(&[1.5, 2.5, 4.0]).total_fitness(), 8.0);
        assert_eq!(Population::<u8>::new().total_fitness(), 0.0);
    }

    #[test]
    fn test_genome_size_detects_mismatch() {
        let genes = vec![
            Gene::new(vec![0u8; 4], 0, 8).unwrap(),
            Gene::new(vec![0u8; 3], 0, 8).unwrap(),
        ];
        assert_eq!(
            Population::from(genes).genome_size(),
            Err(GeneticError::GenomeLengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(Population::<u8>::new().genome_size(), Ok(None));
    }
}
