use clap::Args;
use crossgrid::config::{GenerateParams, ScoringWeights};
use crossgrid::error::CgResult;
use crossgrid::generator::{Generator, GeneratorOptions};
use crossgrid::latex::LatexRenderer;
use crossgrid::scorer::GridScorer;
use crossgrid::words::WordList;
use tracing::info;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub params: GenerateParams,

    #[command(flatten)]
    pub weights: ScoringWeights,

    /// Where to write the typeset puzzle.
    #[arg(short, long, default_value = "crossword.tex")]
    pub output: String,
}

pub fn run(args: GenerateArgs, words: WordList, scorer: Box<dyn GridScorer>) -> CgResult<()> {
    let options = GeneratorOptions::from(&args.params);
    let generator = Generator::new(options, words, scorer)?;

    let best = generator.generate()?;

    reports::print_grid(&best);
    reports::print_clues(&best);

    LatexRenderer.write_to_file(&best, &args.output)?;
    info!("wrote puzzle document to {}", args.output);
    Ok(())
}
