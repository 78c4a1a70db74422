//! Evolves a solution to the eight queens puzzle and prints the board.
//!
//! Run with `cargo run --example queens`. Set `RUST_LOG=debug` for
//! per-generation engine summaries.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use vitae::{
    evolution::{Engine, EnvironmentParams},
    population::generate_initial_population,
    queens, Result,
};

const BOARD_SIZE: usize = 8;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let params = EnvironmentParams::builder()
        .desired_fitness(queens::PERFECT_SCORE)
        .reproduction_pairs_ratio(0.8)
        .successful_mate_threshold(0.8)
        .max_generation_count(100)
        .max_population(10_000)
        .max_gene_age(20)
        .max_num_of_children_per_pair(2)
        .mutation_chance(5)
        .enable_aging(false)
        .build()?;

    let population =
        generate_initial_population::<u8>(100, BOARD_SIZE, 0, BOARD_SIZE as u8, 0x1337)?;
    let mut engine = Engine::new(population, params, queens::binding(BOARD_SIZE))?;

    let base_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    loop {
        println!("current generation: {}", engine.generation());
        println!("{}", "-".repeat(30));
        match (engine.population().best(), engine.population().iter().last()) {
            (Some(best), Some(worst)) => {
                println!("population: {}", engine.population().len());
                println!("max fitness: {}", best.fitness());
                println!("min fitness: {}", worst.fitness());
            }
            _ => println!("All genes are dead!"),
        }
        println!();

        if !engine.step(base_seed.wrapping_add(engine.generation() as u64))? {
            break;
        }
    }

    if let Some(reason) = engine.termination() {
        println!("stopped: {}", reason);
    }
    if let Some(best) = engine.best() {
        println!("\n\nBest solution:");
        print!("{}", queens::render_board(best.data(), BOARD_SIZE));
    }
    Ok(())
}
