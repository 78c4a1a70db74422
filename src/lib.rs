pub mod breeding;
pub mod error;
pub mod evolution;
pub mod gene;
pub mod population;
pub mod queens;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, Engine, EngineBuilder, EnvironmentParams, FitnessBinding};
pub use gene::{Allele, Gene};
pub use population::{generate_initial_population, Population};
