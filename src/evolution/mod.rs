pub mod builder;
pub mod challenge;
pub mod engine;
pub mod options;

pub use builder::EngineBuilder;
pub use challenge::{Challenge, FitnessBinding};
pub use engine::{Engine, StepReport, Termination};
pub use options::{EnvironmentParams, EnvironmentParamsBuilder};
