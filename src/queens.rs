//! # N-queens
//!
//! A ready-made problem for the engine: genome locus `row` holds the column of
//! the queen placed on that row, so rows never clash and only columns and
//! diagonals can. The score starts at `perfect_score` and loses one point for
//! every other queen each queen can see along its column or a diagonal.
//!
//! ```rust
//! use vitae::evolution::Challenge;
//! use vitae::queens;
//!
//! let binding = queens::binding(8);
//! // A known solution
//! assert_eq!(binding.score(&[0, 4, 7, 5, 2, 6, 1, 3]), queens::PERFECT_SCORE);
//! // All queens in one column: 8 * 7 column sightings, plus none on diagonals
//! assert_eq!(binding.score(&[0; 8]), queens::PERFECT_SCORE - 56.0);
//! ```

use std::fmt::Write;

use crate::evolution::FitnessBinding;

/// Score of a board with no conflicts.
pub const PERFECT_SCORE: f64 = 60.0;

/// Board description bound to the queens fitness function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueensBoard {
    pub size: usize,
    pub perfect_score: f64,
}

impl QueensBoard {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            perfect_score: PERFECT_SCORE,
        }
    }
}

pub type QueensBinding = FitnessBinding<u8, QueensBoard, fn(&[u8], &QueensBoard) -> f64>;

/// Fitness binding for a `size` x `size` board.
pub fn binding(size: usize) -> QueensBinding {
    FitnessBinding::new(
        score as fn(&[u8], &QueensBoard) -> f64,
        QueensBoard::new(size),
    )
}

/// Number of queen pairs sharing a column or a diagonal.
pub fn conflicting_pairs(genome: &[u8]) -> usize {
    let mut pairs = 0;
    for (row, &col) in genome.iter().enumerate() {
        for (other_row, &other_col) in genome.iter().enumerate().skip(row + 1) {
            let rows_apart = other_row - row;
            let cols_apart = col.abs_diff(other_col) as usize;
            if cols_apart == 0 || cols_apart == rows_apart {
                pairs += 1;
            }
        }
    }
    pairs
}

/// Every conflicting pair is seen from both ends.
pub fn score(genome: &[u8], board: &QueensBoard) -> f64 {
    board.perfect_score - 2.0 * conflicting_pairs(genome) as f64
}

/// Draws the board as rows of `|X| ` and `| | ` cells between dashed lines.
///
/// Columns outside the board leave their row empty.
pub fn render_board(genome: &[u8], size: usize) -> String {
    let separator = "-".repeat(4 * size);
    let mut out = String::new();
    for row in 0..size {
        let queen = genome.get(row).map(|&col| col as usize);
        let _ = writeln!(out, "{}", separator);
        for col in 0..size {
            out.push_str(if queen == Some(col) { "|X| " } else { "| | " });
        }
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');
    out
}
