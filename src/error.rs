//! # Error Types
//!
//! This module defines the error type shared by every fallible operation in the
//! engine. Errors represent broken caller contracts (inverted bounds, genomes of
//! different lengths, out-of-range loci, invalid parameters). Reaching the
//! generation cap or the desired fitness is not an error: `Engine::step`
//! reports those through its boolean result.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use vitae::error::{GeneticError, Result};
//!
//! fn checked_ratio(ratio: f64) -> Result<f64> {
//!     if ratio < 0.0 {
//!         return Err(GeneticError::Configuration("ratio must be non-negative".to_string()));
//!     }
//!     Ok(ratio)
//! }
//!
//! assert!(checked_ratio(-1.0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use vitae::error::{GeneticError, OptionExt};
//!
//! fn first_locus(genome: &[u8]) -> vitae::error::Result<u8> {
//!     genome.first().copied().ok_or_else_genetic(||
//!         GeneticError::OutOfBounds("genome is empty".to_string())
//!     )
//! }
//!
//! assert_eq!(first_locus(&[3, 1]).unwrap(), 3);
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or running an engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a value range is empty or inverted.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Error that occurs when a locus index or value falls outside a gene.
    #[error("Bounds error: {0}")]
    OutOfBounds(String),

    /// Error that occurs when two genomes that must line up have different lengths.
    #[error("Genome length mismatch: expected {expected}, found {found}")]
    GenomeLengthMismatch { expected: usize, found: usize },

    /// Error that occurs when a fitness calculation produces an unusable score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an operation needs a fitness function but none is bound.
    #[error("No fitness function is bound to the engine")]
    MissingChallenge,
}

/// A specialized Result type for engine operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result, building the error lazily.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
