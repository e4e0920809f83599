use criterion::{criterion_group, criterion_main, Criterion};
use crossgrid::config::ScoringWeights;
use crossgrid::generator::{Generator, GeneratorOptions};
use crossgrid::grid::{Grid, Location, Orientation};
use crossgrid::scorer::SimpleScorer;
use crossgrid::words::{Word, WordList};
use std::hint::black_box;

fn bench_words() -> WordList {
    [
        "PARIS", "CAT", "ELM", "STAR", "RATES", "TENSE", "SCALE", "LEMON", "NOTES", "ORBIT",
        "TRACE", "CRATE", "SONAR", "RAISE", "LINEN", "ONSET", "METRO", "CIDER", "BASIN", "ARENA",
    ]
    .iter()
    .enumerate()
    .map(|(i, s)| Word::new(i as u32 + 1, format!("clue {}", i + 1), *s))
    .collect()
}

fn crossed_grid() -> Grid {
    let mut grid = Grid::new(15, 15);
    grid.place_first_word(&Word::new(1, "c", "PARIS"), Orientation::Horizontal);
    grid.place_word(
        &Word::new(2, "c", "CAT"),
        Location::new(14, 14, Orientation::Vertical),
    );
    grid
}

fn bench_valid_placements(c: &mut Criterion) {
    let grid = crossed_grid();
    let candidate = Word::new(3, "c", "RATES");
    let mut out = Vec::new();

    c.bench_function("get_valid_placements", |b| {
        b.iter(|| {
            out.clear();
            grid.get_valid_placements(black_box(&candidate), &mut out);
            black_box(out.len())
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let options = GeneratorOptions {
        count: 50,
        max_height: 15,
        max_width: 15,
        threads: 1,
        seed: Some(42),
        progress_every: 1_000_000,
    };
    let generator = Generator::new(
        options,
        bench_words(),
        Box::new(SimpleScorer::new(ScoringWeights::default())),
    )
    .expect("valid options");

    c.bench_function("generate_50_grids", |b| {
        b.iter(|| black_box(generator.generate().expect("pipeline runs")))
    });
}

criterion_group!(benches, bench_valid_placements, bench_generate);
criterion_main!(benches);
