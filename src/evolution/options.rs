//! # EnvironmentParams
//!
//! The `EnvironmentParams` struct is the immutable configuration of one run:
//! termination targets, population and aging limits, reproduction rates and
//! the retry limits that keep selection bounded.
//!
//! ## Example
//!
//! ```rust
//! use vitae::evolution::options::EnvironmentParams;
//!
//! // Defaults match the eight queens driver
//! let default_params = EnvironmentParams::default();
//! assert_eq!(default_params.get_desired_fitness(), 60.0);
//!
//! // Custom parameters through the builder
//! let params = EnvironmentParams::builder()
//!     .desired_fitness(100.0)
//!     .max_population(500)
//!     .mutation_chance(10)
//!     .enable_aging(true)
//!     .build()
//!     .unwrap();
//! assert!(params.is_aging_enabled());
//! ```
//!
//! ## Fields
//!
//! - `desired_fitness`: stop as soon as the best gene reaches this score.
//! - `reproduction_pairs_ratio`: pairs to assign per generation, as a fraction of the population,
//!   at most `MAX_REPRODUCTION_PAIRS_RATIO`.
//! - `successful_mate_threshold`: minimum partner fitness, as a multiple of the proposer's.
//! - `max_generation_count`: generation cap.
//! - `max_population`: survivors kept by the overpopulation trim.
//! - `max_gene_age`: limit for the fitness-weighted age test.
//! - `max_num_of_children_per_pair`: offspring per pair are drawn from `[1, max]`.
//! - `mutation_chance`: percentage in `[0, 100]`.
//! - `enable_aging`: whether old genes are culled.
//! - `max_selection_passes`: passes over the population before proposers are accepted unconditionally.
//! - `max_partner_attempts`: partner draws before falling back to the fittest gene.

use crate::error::{GeneticError, Result};

/// Largest accepted `reproduction_pairs_ratio`. Keeps the per-generation pair
/// quota, and with it the offspring buffer, proportional to the population.
pub const MAX_REPRODUCTION_PAIRS_RATIO: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentParams {
    desired_fitness: f64,
    reproduction_pairs_ratio: f64,
    successful_mate_threshold: f64,
    max_generation_count: usize,
    max_population: usize,
    max_gene_age: usize,
    max_num_of_children_per_pair: usize,
    mutation_chance: u8,
    enable_aging: bool,
    max_selection_passes: usize,
    max_partner_attempts: usize,
}

impl EnvironmentParams {
    pub fn get_desired_fitness(&self) -> f64 {
        self.desired_fitness
    }

    pub fn get_reproduction_pairs_ratio(&self) -> f64 {
        self.reproduction_pairs_ratio
    }

    pub fn get_successful_mate_threshold(&self) -> f64 {
        self.successful_mate_threshold
    }

    pub fn get_max_generation_count(&self) -> usize {
        self.max_generation_count
    }

    pub fn get_max_population(&self) -> usize {
        self.max_population
    }

    pub fn get_max_gene_age(&self) -> usize {
        self.max_gene_age
    }

    pub fn get_max_num_of_children_per_pair(&self) -> usize {
        self.max_num_of_children_per_pair
    }

    pub fn get_mutation_chance(&self) -> u8 {
        self.mutation_chance
    }

    pub fn is_aging_enabled(&self) -> bool {
        self.enable_aging
    }

    pub fn get_max_selection_passes(&self) -> usize {
        self.max_selection_passes
    }

    pub fn get_max_partner_attempts(&self) -> usize {
        self.max_partner_attempts
    }

    /// Number of reproducing pairs a generation must assign for a population of `population_size`.
    pub fn pair_quota(&self, population_size: usize) -> usize {
        (population_size as f64 * self.reproduction_pairs_ratio).ceil() as usize
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.desired_fitness.is_finite() {
            return Err(GeneticError::Configuration(
                "desired_fitness must be finite".to_string(),
            ));
        }
        if !(0.0..=MAX_REPRODUCTION_PAIRS_RATIO).contains(&self.reproduction_pairs_ratio) {
            return Err(GeneticError::Configuration(format!(
                "reproduction_pairs_ratio must be between 0 and {}, got {}",
                MAX_REPRODUCTION_PAIRS_RATIO, self.reproduction_pairs_ratio
            )));
        }
        if !self.successful_mate_threshold.is_finite() || self.successful_mate_threshold < 0.0 {
            return Err(GeneticError::Configuration(
                "successful_mate_threshold must be finite and non-negative".to_string(),
            ));
        }
        if self.max_num_of_children_per_pair == 0 {
            return Err(GeneticError::Configuration(
                "max_num_of_children_per_pair must be at least 1".to_string(),
            ));
        }
        if self.mutation_chance > 100 {
            return Err(GeneticError::Configuration(format!(
                "mutation_chance must be between 0 and 100, got {}",
                self.mutation_chance
            )));
        }
        if self.max_selection_passes == 0 {
            return Err(GeneticError::Configuration(
                "max_selection_passes must be at least 1".to_string(),
            ));
        }
        if self.max_partner_attempts == 0 {
            return Err(GeneticError::Configuration(
                "max_partner_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EnvironmentParams` instance.
    pub fn builder() -> EnvironmentParamsBuilder {
        EnvironmentParamsBuilder::default()
    }
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            desired_fitness: 60.0,
            reproduction_pairs_ratio: 0.8,
            successful_mate_threshold: 0.8,
            max_generation_count: 100,
            max_population: 10_000,
            max_gene_age: 20,
            max_num_of_children_per_pair: 2,
            mutation_chance: 5,
            enable_aging: false,
            max_selection_passes: 1000,
            max_partner_attempts: 100,
        }
    }
}

/// Builder for `EnvironmentParams`.
///
/// Unset fields fall back to `EnvironmentParams::default()`.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentParamsBuilder {
    desired_fitness: Option<f64>,
    reproduction_pairs_ratio: Option<f64>,
    successful_mate_threshold: Option<f64>,
    max_generation_count: Option<usize>,
    max_population: Option<usize>,
    max_gene_age: Option<usize>,
    max_num_of_children_per_pair: Option<usize>,
    mutation_chance: Option<u8>,
    enable_aging: Option<bool>,
    max_selection_passes: Option<usize>,
    max_partner_attempts: Option<usize>,
}

impl EnvironmentParamsBuilder {
    pub fn desired_fitness(mut self, value: f64) -> Self {
        self.desired_fitness = Some(value);
        self
    }

    pub fn reproduction_pairs_ratio(mut self, value: f64) -> Self {
        self.reproduction_pairs_ratio = Some(value);
        self
    }

    pub fn successful_mate_threshold(mut self, value: f64) -> Self {
        self.successful_mate_threshold = Some(value);
        self
    }

    pub fn max_generation_count(mut self, value: usize) -> Self {
        self.max_generation_count = Some(value);
        self
    }

    pub fn max_population(mut self, value: usize) -> Self {
        self.max_population = Some(value);
        self
    }

    pub fn max_gene_age(mut self, value: usize) -> Self {
        self.max_gene_age = Some(value);
        self
    }

    pub fn max_num_of_children_per_pair(mut self, value: usize) -> Self {
        self.max_num_of_children_per_pair = Some(value);
        self
    }

    pub fn mutation_chance(mut self, value: u8) -> Self {
        self.mutation_chance = Some(value);
        self
    }

    pub fn enable_aging(mut self, value: bool) -> Self {
        self.enable_aging = Some(value);
        self
    }

    pub fn max_selection_passes(mut self, value: usize) -> Self {
        self.max_selection_passes = Some(value);
        self
    }

    pub fn max_partner_attempts(mut self, value: usize) -> Self {
        self.max_partner_attempts = Some(value);
        self
    }

    /// Builds and validates the `EnvironmentParams` instance.
    pub fn build(self) -> Result<EnvironmentParams> {
        let defaults = EnvironmentParams::default();
        let params = EnvironmentParams {
            desired_fitness: self.desired_fitness.unwrap_or(defaults.desired_fitness),
            reproduction_pairs_ratio: self
                .reproduction_pairs_ratio
                .unwrap_or(defaults.reproduction_pairs_ratio),
            successful_mate_threshold: self
                .successful_mate_threshold
                .unwrap_or(defaults.successful_mate_threshold),
            max_generation_count: self
                .max_generation_count
                .unwrap_or(defaults.max_generation_count),
            max_population: self.max_population.unwrap_or(defaults.max_population),
            max_gene_age: self.max_gene_age.unwrap_or(defaults.max_gene_age),
            max_num_of_children_per_pair: self
                .max_num_of_children_per_pair
                .unwrap_or(defaults.max_num_of_children_per_pair),
            mutation_chance: self.mutation_chance.unwrap_or(defaults.mutation_chance),
            enable_aging: self.enable_aging.unwrap_or(defaults.enable_aging),
            max_selection_passes: self
                .max_selection_passes
                .unwrap_or(defaults.max_selection_passes),
            max_partner_attempts: self
                .max_partner_attempts
                .unwrap_or(defaults.max_partner_attempts),
        };
        params.validate()?;
        Ok(params)
    }
}
