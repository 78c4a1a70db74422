//! # Fitness-proportional selection
//!
//! Decides which genes get to propose a pairing and whom they pair with.
//!
//! A candidate is accepted as a proposer when a draw from
//! `[0, ceil(total_fitness))` does not exceed `ceil(fitness)`, so its odds grow
//! with its share of the population's total fitness. An accepted proposer then
//! draws partners uniformly until one is at least `successful_mate_threshold`
//! times as fit as itself. Partner search gives up after a fixed number of
//! draws and falls back to the fittest gene.

use tracing::trace;

use crate::{
    gene::{Allele, Gene},
    rng::RandomNumberGenerator,
};

/// Outcome of a partner search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerChoice {
    /// A drawn partner passed the mate threshold.
    Eligible(usize),
    /// No draw passed; the fittest gene was chosen instead.
    Fallback(usize),
}

impl PartnerChoice {
    pub fn index(self) -> usize {
        match self {
            PartnerChoice::Eligible(index) | PartnerChoice::Fallback(index) => index,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, PartnerChoice::Fallback(_))
    }
}

#[derive(Debug, Clone)]
pub struct ProportionalSelection {
    /// `ceil(total_fitness)`, clamped to at least 1 so it can serve as a draw range.
    total_ceiling: u64,
    mate_threshold: f64,
    max_partner_attempts: usize,
}

impl ProportionalSelection {
    pub fn new(total_fitness: f64, mate_threshold: f64, max_partner_attempts: usize) -> Self {
        // Saturating float-to-int cast; NaN lands on 0 and is clamped up.
        let total_ceiling = (total_fitness.ceil() as u64).max(1);
        Self {
            total_ceiling,
            mate_threshold,
            max_partner_attempts: max_partner_attempts.max(1),
        }
    }

    pub fn total_ceiling(&self) -> u64 {
        self.total_ceiling
    }

    /// Fitness-proportional acceptance test for a would-be proposer.
    pub fn accepts(&self, fitness: f64, rng: &mut RandomNumberGenerator) -> bool {
        let draw = rng.gen_below(self.total_ceiling);
        draw as f64 <= fitness.ceil()
    }

    /// Whether `candidate` is fit enough to pair with `proposer`.
    pub fn is_compatible(&self, proposer: f64, candidate: f64) -> bool {
        candidate >= proposer * self.mate_threshold
    }

    /// Draws a partner for a proposer of fitness `proposer`.
    ///
    /// The proposer may draw itself. `population` must be non-empty and sorted,
    /// the fallback relies on index 0 being the fittest gene.
    pub fn find_partner<T: Allele>(
        &self,
        population: &[Gene<T>],
        proposer: f64,
        rng: &mut RandomNumberGenerator,
    ) -> PartnerChoice {
        for attempt in 0..self.max_partner_attempts {
            let index = rng.gen_index(population.len());
            if self.is_compatible(proposer, population[index].fitness()) {
                trace!(attempt, index, "partner found");
                return PartnerChoice::Eligible(index);
            }
        }
        PartnerChoice::Fallback(0)
    }
}
