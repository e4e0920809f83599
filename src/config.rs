use std::fs;
use std::path::Path;

use clap::Args;
use serde::Deserialize;

use crate::error::CgResult;

/// Generation constraints. All of these are validated again by
/// `Generator::new`, which refuses non-positive values before any thread
/// starts.
#[derive(Args, Debug, Clone)]
pub struct GenerateParams {
    /// How many candidate grids to generate and score.
    #[arg(long, default_value_t = 10_000)]
    pub count: i64,

    #[arg(long, default_value_t = 15)]
    pub max_height: i64,

    #[arg(long, default_value_t = 15)]
    pub max_width: i64,

    /// Worker threads building candidate grids.
    #[arg(long, default_value_t = 5)]
    pub threads: usize,

    /// Seed for reproducible runs; omitted means a fresh seed per run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log the running best every this many processed grids.
    #[arg(long, default_value_t = 2500)]
    pub progress_every: usize,
}

/// Weights of the "simple" scorer. Doubles as the schema of the optional
/// JSON weights file, which overrides the CLI defaults wholesale.
#[derive(Args, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Reward per pair of crossing words.
    #[arg(long, default_value_t = 10)]
    pub weight_crossing: i64,

    /// Reward per placed word.
    #[arg(long, default_value_t = 5)]
    pub weight_placed_word: i64,

    /// Reward per occupied cell.
    #[arg(long, default_value_t = 2)]
    pub weight_placed_letter: i64,

    /// Penalty per word left out of the grid.
    #[arg(long, default_value_t = 20)]
    pub penalty_unplaced: i64,

    /// Penalty per cell of bounding-box area, rewarding compact grids.
    #[arg(long, default_value_t = 1)]
    pub penalty_area: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_crossing: 10,
            weight_placed_word: 5,
            weight_placed_letter: 2,
            penalty_unplaced: 20,
            penalty_area: 1,
        }
    }
}

impl ScoringWeights {
    pub fn load_from_file(path: impl AsRef<Path>) -> CgResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
