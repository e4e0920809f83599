use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::info;

use crate::error::{CgResult, CrossgridError};

pub type WordId = u32;

/// A clue/solution pair. Immutable once created; the solution is stored
/// uppercase so cell comparisons never have to case-fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: WordId,
    pub clue: String,
    pub solution: String,
}

impl Word {
    pub fn new(id: WordId, clue: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            id,
            clue: clue.into(),
            solution: solution.into().to_ascii_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    pub fn letters(&self) -> &[u8] {
        self.solution.as_bytes()
    }
}

pub type WordList = Vec<Word>;

/// The closed set of word sources. A source kind is still picked by a string
/// key on the command line, but resolution happens once here instead of in a
/// global factory registry.
#[derive(Debug, Clone)]
pub enum WordSource {
    Csv(CsvWordSource),
}

impl WordSource {
    pub fn from_kind(
        kind: &str,
        path: impl Into<PathBuf>,
        delimiter: u8,
        has_headers: bool,
    ) -> CgResult<Self> {
        match kind {
            "csv" => Ok(Self::Csv(CsvWordSource {
                path: path.into(),
                delimiter,
                has_headers,
            })),
            other => Err(CrossgridError::Config(format!(
                "unknown word source type '{}'",
                other
            ))),
        }
    }

    pub fn load(&self) -> CgResult<WordList> {
        match self {
            Self::Csv(csv) => csv.load(),
        }
    }
}

/// Reads clue/solution pairs from a delimited text file, one pair per line.
#[derive(Debug, Clone)]
pub struct CsvWordSource {
    pub path: PathBuf,
    pub delimiter: u8,
    pub has_headers: bool,
}

impl CsvWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            has_headers: false,
        }
    }

    pub fn load(&self) -> CgResult<WordList> {
        let file = std::fs::File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut words = WordList::new();
        let mut next_id: WordId = 1;
        for result in reader.records() {
            let record = result?;
            if record.len() != 2 {
                return Err(CrossgridError::Validation(format!(
                    "expected two columns separated by '{}' but got {} (line {})",
                    self.delimiter as char,
                    record.len(),
                    record.position().map_or(0, |p| p.line()),
                )));
            }

            let word = Word::new(next_id, &record[0], &record[1]);
            if word.clue.is_empty() || word.solution.is_empty() {
                return Err(CrossgridError::Validation(format!(
                    "clue or solution is empty (line {})",
                    record.position().map_or(0, |p| p.line()),
                )));
            }
            next_id += 1;
            words.push(word);
        }

        info!(
            "loaded {} words from {}",
            words.len(),
            self.path.display()
        );
        Ok(words)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
