use clap::Args;
use crossgrid::error::CgResult;
use crossgrid::words::WordList;

use crate::reports;

/// Loads the word list, which also validates it, and prints it.
#[derive(Args, Debug, Clone)]
pub struct WordsArgs {
    /// Only print the summary line, not the full table.
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}

pub fn run(args: WordsArgs, words: &WordList) -> CgResult<()> {
    let longest = words.iter().map(|w| w.len()).max().unwrap_or(0);
    println!(
        "{} words, longest solution {} letters",
        words.len(),
        longest
    );
    if !args.summary {
        reports::print_word_list(words);
    }
    Ok(())
}
