//! # Gene
//!
//! A `Gene` is one candidate solution: a fixed-length genome of `Allele`
//! values, the fitness score it was last evaluated to, its age in generations
//! and the `[min, max)` range its loci are drawn from when mutating.
//!
//! ## Example
//!
//! ```rust
//! use vitae::gene::Gene;
//!
//! let mut gene = Gene::new(vec![0u8, 3, 5, 7], 0, 8).unwrap();
//! assert_eq!(gene.size(), 4);
//! assert_eq!(gene.age(), 0);
//!
//! gene.inc_age();
//! assert_eq!(gene.age(), 1);
//!
//! assert!(gene.modify_gene_field(1, 6).is_ok());
//! assert_eq!(gene.data(), &[0, 6, 5, 7]);
//! assert!(gene.modify_gene_field(4, 1).is_err());
//! ```

use std::fmt::Debug;

use rand::distributions::uniform::SampleUniform;

use crate::error::{GeneticError, Result};

/// Element type a genome is made of.
///
/// Implemented for every primitive integer and float type. Beyond copying,
/// comparing and uniform sampling, an allele decides which `[min, max)`
/// ranges can actually be sampled.
pub trait Allele: Copy + PartialOrd + Debug + SampleUniform {
    /// Whether values can be drawn uniformly from `[min, max)`.
    fn is_sampleable_range(min: Self, max: Self) -> bool;
}

macro_rules! integer_allele {
    ($($t:ty),*) => {
        $(
            impl Allele for $t {
                fn is_sampleable_range(min: Self, max: Self) -> bool {
                    min < max
                }
            }
        )*
    };
}

macro_rules! float_allele {
    ($($t:ty),*) => {
        $(
            impl Allele for $t {
                // The width must stay finite, so f64::MIN..f64::MAX is out.
                fn is_sampleable_range(min: Self, max: Self) -> bool {
                    min < max && min.is_finite() && max.is_finite() && (max - min).is_finite()
                }
            }
        )*
    };
}

integer_allele!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
float_allele!(f32, f64);

/// Checks that `[min, max)` is a range alleles can be drawn from.
///
/// # Errors
///
/// Returns `InvalidBounds` for empty, inverted, unordered, non-finite or
/// overflowing ranges.
pub fn check_bounds<T: Allele>(min: T, max: T) -> Result<()> {
    if !T::is_sampleable_range(min, max) {
        return Err(GeneticError::InvalidBounds(format!(
            "cannot draw values from [{:?}, {:?})",
            min, max
        )));
    }
    Ok(())
}

/// One individual of the population.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gene<T> {
    data: Vec<T>,
    fitness: f64,
    age: usize,
    min: T,
    max: T,
}

impl<T: Allele> Gene<T> {
    /// Creates an unevaluated gene (fitness 0, age 0).
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if `[min, max)` cannot be sampled (see
    /// [`check_bounds`]) and `OutOfBounds` if any element lies outside it.
    pub fn new(data: Vec<T>, min: T, max: T) -> Result<Self> {
        check_bounds(min, max)?;
        if let Some((index, value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !Self::in_range(**v, min, max))
        {
            return Err(GeneticError::OutOfBounds(format!(
                "locus {} holds {:?}, outside [{:?}, {:?})",
                index, value, min, max
            )));
        }
        Ok(Self::from_parts(data, min, max))
    }

    /// Builds a gene whose invariants the caller has already established.
    pub(crate) fn from_parts(data: Vec<T>, min: T, max: T) -> Self {
        Self {
            data,
            fitness: 0.0,
            age: 0,
            min,
            max,
        }
    }

    fn in_range(value: T, min: T, max: T) -> bool {
        value >= min && value < max
    }

    /// Fitness stored by the last evaluation, 0 if never scored.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Read-only view of the genome.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Number of generations this gene has survived.
    pub fn age(&self) -> usize {
        self.age
    }

    pub fn inc_age(&mut self) {
        self.age += 1;
    }

    /// Genome length.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The `(min, max)` pair mutation draws from, `max` exclusive.
    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    pub fn min_bound(&self) -> T {
        self.min
    }

    pub fn max_bound(&self) -> T {
        self.max
    }

    /// Overwrites a single locus.
    ///
    /// The stored fitness is left untouched and goes stale until the gene is
    /// scored again.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index >= size()` or if `value` lies outside
    /// `[min, max)`. The gene is unchanged on failure.
    pub fn modify_gene_field(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.data.len() {
            return Err(GeneticError::OutOfBounds(format!(
                "locus {} does not exist in a genome of length {}",
                index,
                self.data.len()
            )));
        }
        if !Self::in_range(value, self.min, self.max) {
            return Err(GeneticError::OutOfBounds(format!(
                "value {:?} outside [{:?}, {:?})",
                value, self.min, self.max
            )));
        }
        self.data[index] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gene_is_fresh() {
        let gene = Gene::new(vec![1i32, 2, 3], 0, 10).unwrap();
        assert_eq!(gene.fitness(), 0.0);
        assert_eq!(gene.age(), 0);
        assert_eq!(gene.size(), 3);
        assert_eq!(gene.bounds(), (0, 10));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert!(matches!(
            Gene::new(vec![1i32], 5, 5),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(matches!(
            Gene::new(vec![1.0f64], 2.0, 1.0),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(matches!(
            Gene::new(vec![1.0f64], f64::NAN, 1.0),
            Err(GeneticError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_unsampleable_float_ranges_rejected() {
        // Both ends are finite but the width overflows
        assert!(matches!(
            Gene::new(vec![0.0f64; 4], f64::MIN, f64::MAX),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(matches!(
            Gene::new(vec![0.0f32], f32::NEG_INFINITY, 1.0),
            Err(GeneticError::InvalidBounds(_))
        ));
        assert!(Gene::new(vec![0.0f64], -1e300, 1e300).is_ok());
        assert!(Gene::new(vec![i64::MIN], i64::MIN, i64::MAX).is_ok());
    }

    #[test]
    fn test_element_outside_bounds_rejected() {
        // Upper bound is exclusive
        assert!(matches!(
            Gene::new(vec![0u8, 8], 0, 8),
            Err(GeneticError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_modify_gene_field_keeps_fitness_stale() {
        let mut gene = Gene::new(vec![0u8; 4], 0, 8).unwrap();
        gene.set_fitness(12.5);

        gene.modify_gene_field(3, 7).unwrap();

        assert_eq!(gene.data(), &[0, 0, 0, 7]);
        assert_eq!(gene.fitness(), 12.5);
    }

    #[test]
    fn test_modify_gene_field_failures_leave_gene_untouched() {
        let mut gene = Gene::new(vec![1u8, 2], 0, 8).unwrap();
        let before = gene.clone();

        assert!(matches!(
            gene.modify_gene_field(2, 3),
            Err(GeneticError::OutOfBounds(_))
        ));
        assert!(matches!(
            gene.modify_gene_field(0, 9),
            Err(GeneticError::OutOfBounds(_))
        ));
        assert_eq!(gene, before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json_keeps_age_and_fitness() {
        let mut gene = Gene::new(vec![2u8, 5], 0, 8).unwrap();
        gene.set_fitness(3.5);
        gene.inc_age();

        let json = serde_json::to_string(&gene).unwrap();
        let restored: Gene<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, gene);
    }
}
