mod buffer;

use std::time::Instant;

use tracing::{debug, info};

use crate::config::GenerateParams;
use crate::error::{CgResult, CrossgridError};
use crate::grid::{Grid, Orientation};
use crate::scorer::GridScorer;
use crate::words::WordList;

use buffer::{SharedGridBuffer, BUFFER_CAPACITY};

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub count: i64,
    pub max_height: i64,
    pub max_width: i64,
    pub threads: usize,
    pub seed: Option<u64>,
    pub progress_every: usize,
}

impl From<&GenerateParams> for GeneratorOptions {
    fn from(params: &GenerateParams) -> Self {
        Self {
            count: params.count,
            max_height: params.max_height,
            max_width: params.max_width,
            threads: params.threads,
            seed: params.seed,
            progress_every: params.progress_every,
        }
    }
}

/// Builds many candidate grids in parallel, scores each, and keeps the best.
pub struct Generator {
    options: GeneratorOptions,
    words: WordList,
    scorer: Box<dyn GridScorer>,
}

impl Generator {
    /// Validates the configuration up front; nothing is spawned and no work
    /// starts if any constraint is non-positive.
    pub fn new(
        options: GeneratorOptions,
        words: WordList,
        scorer: Box<dyn GridScorer>,
    ) -> CgResult<Self> {
        if options.count <= 0 {
            return Err(CrossgridError::Config(format!(
                "grid count must be positive, got {}",
                options.count
            )));
        }
        if options.max_height <= 0 || options.max_width <= 0 {
            return Err(CrossgridError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                options.max_height, options.max_width
            )));
        }
        if options.threads == 0 || options.threads >= BUFFER_CAPACITY {
            return Err(CrossgridError::Config(format!(
                "thread count must be between 1 and {}, got {}",
                BUFFER_CAPACITY - 1,
                options.threads
            )));
        }
        if options.progress_every == 0 {
            return Err(CrossgridError::Config(
                "progress interval must be positive".into(),
            ));
        }
        if words.is_empty() {
            return Err(CrossgridError::Validation(
                "word list is empty; nothing to place".into(),
            ));
        }
        // If every word is longer than both dimensions, no first word can
        // ever be placed and every candidate grid would come out empty.
        let longest_side = options.max_height.max(options.max_width);
        if !words.iter().any(|w| w.len() as i64 <= longest_side) {
            return Err(CrossgridError::Validation(format!(
                "no word fits a {}x{} grid",
                options.max_height, options.max_width
            )));
        }

        Ok(Self {
            options,
            words,
            scorer,
        })
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// One randomized greedy candidate: shuffle, place the first word at the
    /// center with a random orientation, then keep passing over the
    /// remaining words, placing each at a uniformly random valid crossing
    /// and deferring the ones with none. Stops when everything is placed or
    /// a whole pass places nothing.
    fn build_single_grid(&self, rng: &mut fastrand::Rng) -> Grid {
        let mut grid = Grid::new(
            self.options.max_height as i32,
            self.options.max_width as i32,
        );
        let mut remaining = self.words.clone();
        rng.shuffle(&mut remaining);

        let orientation = if rng.bool() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        if let Some(first) = remaining.pop() {
            if !grid.place_first_word(&first, orientation) {
                debug!(
                    "first word '{}' does not fit a {}x{} grid as {}",
                    first.solution, self.options.max_height, self.options.max_width, orientation
                );
            }
        }

        let mut placements = Vec::new();
        while !remaining.is_empty() {
            rng.shuffle(&mut remaining);

            let mut deferred = Vec::with_capacity(remaining.len());
            let mut placed_any = false;
            for word in remaining.drain(..) {
                placements.clear();
                grid.get_valid_placements(&word, &mut placements);
                if placements.is_empty() {
                    deferred.push(word);
                } else {
                    let loc = placements[rng.usize(..placements.len())];
                    grid.place_word_unchecked(&word, loc);
                    placed_any = true;
                }
            }
            remaining = deferred;

            // The leftovers are unplaceable against this grid; give up on
            // them rather than looping forever.
            if !placed_any {
                break;
            }
        }
        grid
    }

    /// Runs the full pipeline: W workers each build their quota of grids and
    /// deposit them into the shared ring buffer; one consumer drains the
    /// slots in strict order, scores every grid, and keeps the best under
    /// strict greater-than (the first grid wins ties).
    pub fn generate(&self) -> CgResult<Grid> {
        let worker_count = self.options.threads;
        let total = self.options.count as usize;
        let base_quota = total / worker_count;
        let remainder = total % worker_count;

        let buffer = SharedGridBuffer::new(worker_count);
        info!(
            "generating {} grids on {} threads and keeping the best",
            total, worker_count
        );
        let started = Instant::now();

        let best = std::thread::scope(|s| {
            for worker in 0..worker_count {
                let mut producer = buffer.producer(worker);
                // Spreading the remainder over the first workers keeps the
                // consumer's strict slot order complete: the t-th consumed
                // slot is the (t / W)-th grid of worker t % W.
                let quota = base_quota + usize::from(worker < remainder);
                let mut rng = match self.options.seed {
                    Some(seed) => fastrand::Rng::with_seed(seed + worker as u64),
                    None => fastrand::Rng::new(),
                };
                s.spawn(move || {
                    for _ in 0..quota {
                        producer.send(self.build_single_grid(&mut rng));
                    }
                });
            }

            let mut consumer = buffer.consumer();
            let scorer_thread = s.spawn(move || {
                let mut best: Option<(Grid, i64)> = None;
                for processed in 1..=total {
                    let grid = consumer.recv();
                    let unplaced = self.words.len() as i64 - grid.placed_word_count() as i64;
                    let score = self.scorer.score(&grid, unplaced);
                    match &best {
                        Some((_, top)) if score <= *top => {}
                        _ => best = Some((grid, score)),
                    }

                    if processed % self.options.progress_every == 0 {
                        if let Some((grid, score)) = &best {
                            info!(
                                "processed {} of {} grids; current best scores {}:\n{}",
                                processed, total, score, grid
                            );
                        }
                    }
                }
                best
            });

            match scorer_thread.join() {
                Ok(best) => best,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        let (grid, score) = best.ok_or_else(|| {
            CrossgridError::Validation("no grids were generated".into())
        })?;
        info!(
            "generated all {} grids in {:.2}s; best scores {}:\n{}",
            total,
            started.elapsed().as_secs_f64(),
            score,
            grid
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringWeights;
    use crate::scorer::SimpleScorer;
    use crate::words::Word;

    fn sample_words() -> WordList {
        vec![
            Word::new(1, "capital of France", "PARIS"),
            Word::new(2, "feline", "CAT"),
            Word::new(3, "tree", "ELM"),
        ]
    }

    fn options(count: i64, threads: usize) -> GeneratorOptions {
        GeneratorOptions {
            count,
            max_height: 15,
            max_width: 15,
            threads,
            seed: Some(7),
            progress_every: 2500,
        }
    }

    fn scorer() -> Box<dyn GridScorer> {
        Box::new(SimpleScorer::new(ScoringWeights::default()))
    }

    #[test]
    fn rejects_non_positive_count() {
        let err = Generator::new(options(0, 1), sample_words(), scorer()).err().unwrap();
        assert!(matches!(err, CrossgridError::Config(_)), "{err}");
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut opts = options(1, 1);
        opts.max_height = 0;
        let err = Generator::new(opts, sample_words(), scorer()).err().unwrap();
        assert!(matches!(err, CrossgridError::Config(_)), "{err}");
    }

    #[test]
    fn rejects_zero_threads() {
        let err = Generator::new(options(1, 0), sample_words(), scorer()).err().unwrap();
        assert!(matches!(err, CrossgridError::Config(_)), "{err}");
    }

    #[test]
    fn rejects_word_list_where_nothing_fits() {
        let mut opts = options(1, 1);
        opts.max_height = 3;
        opts.max_width = 3;
        let words = vec![Word::new(1, "clue", "ABCDEFG")];
        let err = Generator::new(opts, words, scorer()).err().unwrap();
        assert!(matches!(err, CrossgridError::Validation(_)), "{err}");
    }

    #[test]
    fn oversized_words_are_left_unplaced() {
        let mut opts = options(1, 1);
        opts.max_height = 5;
        opts.max_width = 5;
        let words = vec![
            Word::new(1, "clue", "AAAA"),
            Word::new(2, "clue", "ABCDEFGHIJKL"),
        ];
        let generator = Generator::new(opts, words, scorer()).unwrap();

        let mut rng = fastrand::Rng::with_seed(5);
        let grid = generator.build_single_grid(&mut rng);
        for (_, word) in grid.placed_words() {
            assert!(word.len() <= 5, "{} cannot fit a 5x5 grid", word.solution);
        }
    }

    #[test]
    fn rejects_empty_word_list() {
        let err = Generator::new(options(1, 1), WordList::new(), scorer()).err().unwrap();
        assert!(matches!(err, CrossgridError::Validation(_)), "{err}");
    }

    #[test]
    fn single_grid_places_at_least_the_first_word() {
        let generator = Generator::new(options(1, 1), sample_words(), scorer()).unwrap();
        let mut rng = fastrand::Rng::with_seed(3);
        let grid = generator.build_single_grid(&mut rng);

        assert!(grid.placed_word_count() >= 1);
        assert!(grid.placed_word_count() <= 3);
        assert!(grid.height() <= 15);
        assert!(grid.width() <= 15);
    }
}
