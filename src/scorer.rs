use crate::config::ScoringWeights;
use crate::error::{CgResult, CrossgridError};
use crate::grid::Grid;

/// Scores a finished grid; higher is better. Implementations must be pure
/// and deterministic for a fixed grid state, since the pipeline compares
/// scores across thousands of candidates.
pub trait GridScorer: Send + Sync {
    fn score(&self, grid: &Grid, unplaced_word_count: i64) -> i64;
}

/// Linear combination of the grid counters: rewards crossings, placed words
/// and letters; penalizes unplaced words and bounding-box area.
pub struct SimpleScorer {
    weights: ScoringWeights,
}

impl SimpleScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl GridScorer for SimpleScorer {
    fn score(&self, grid: &Grid, unplaced_word_count: i64) -> i64 {
        let w = &self.weights;
        let area = grid.height() as i64 * grid.width() as i64;
        grid.crossing_count() * w.weight_crossing
            + grid.placed_word_count() as i64 * w.weight_placed_word
            + grid.placed_letter_count() as i64 * w.weight_placed_letter
            - unplaced_word_count * w.penalty_unplaced
            - area * w.penalty_area
    }
}

/// Resolves a scorer by its string key. "simple" is the only kind.
pub fn create_scorer(kind: &str, weights: ScoringWeights) -> CgResult<Box<dyn GridScorer>> {
    match kind {
        "simple" => Ok(Box::new(SimpleScorer::new(weights))),
        other => Err(CrossgridError::Config(format!(
            "unknown scorer type '{}'",
            other
        ))),
    }
}
