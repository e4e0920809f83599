use clap::{Parser, Subcommand};
use crossgrid::config::ScoringWeights;
use crossgrid::error::{CgResult, CrossgridError};
use crossgrid::scorer::create_scorer;
use crossgrid::words::WordSource;
use std::process;
use tracing::error;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list location.
    #[arg(global = true, short, long, default_value = "data/wordlist.csv")]
    wordlist: String,

    /// Word source type.
    #[arg(global = true, long, default_value = "csv")]
    source: String,

    /// Column delimiter of the word list.
    #[arg(global = true, long, default_value_t = ',')]
    delimiter: char,

    /// Skip the first line of the word list.
    #[arg(global = true, long, default_value_t = false)]
    headers: bool,

    /// Scorer type.
    #[arg(global = true, long, default_value = "simple")]
    scorer: String,

    /// JSON file overriding the scoring weights.
    #[arg(global = true, long)]
    weights: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Generate(cmd::generate::GenerateArgs),
    Words(cmd::words::WordsArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> CgResult<()> {
    if !cli.delimiter.is_ascii() {
        return Err(CrossgridError::Config(format!(
            "delimiter '{}' is not an ASCII character",
            cli.delimiter
        )));
    }

    let source = WordSource::from_kind(
        &cli.source,
        &cli.wordlist,
        cli.delimiter as u8,
        cli.headers,
    )?;
    let words = source.load()?;

    match cli.command {
        Commands::Generate(args) => {
            let weights = match &cli.weights {
                Some(path) => ScoringWeights::load_from_file(path)?,
                None => args.weights.clone(),
            };
            let scorer = create_scorer(&cli.scorer, weights)?;
            cmd::generate::run(args, words, scorer)
        }
        Commands::Words(args) => cmd::words::run(args, &words),
    }
}
