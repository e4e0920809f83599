use crossgrid::grid::{Grid, Location, Orientation};
use crossgrid::words::Word;
use proptest::prelude::*;

const MAX_DIM: i32 = 12;

// Small alphabet so random words actually share letters and cross.
fn arb_solution() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::sample::select(vec!['A', 'B', 'C', 'D', 'E']), 2..7)
        .prop_map(|letters| letters.into_iter().collect())
}

fn arb_word_list() -> impl Strategy<Value = Vec<Word>> {
    proptest::collection::vec(arb_solution(), 2..12).prop_map(|solutions| {
        solutions
            .into_iter()
            .enumerate()
            .map(|(i, s)| Word::new(i as u32 + 1, format!("clue {}", i), s))
            .collect()
    })
}

/// Greedily fills a grid, checking the closure property along the way:
/// every location the search returns must pass the validity predicate and
/// place successfully.
fn fill_checked(words: &[Word], pick: usize) -> Grid {
    let mut grid = Grid::new(MAX_DIM, MAX_DIM);
    let mut iter = words.iter();
    if let Some(first) = iter.next() {
        assert!(grid.place_first_word(first, Orientation::Horizontal));
    }

    let mut placements: Vec<Location> = Vec::new();
    for word in iter {
        placements.clear();
        grid.get_valid_placements(word, &mut placements);
        for loc in &placements {
            assert!(
                grid.is_valid_placement(word, *loc),
                "search returned an invalid location {:?} for {}",
                loc,
                word.solution
            );
        }
        if !placements.is_empty() {
            let loc = placements[pick % placements.len()];
            assert!(grid.place_word(word, loc));
        }
    }
    grid
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn valid_placements_always_place(words in arb_word_list(), pick in 0usize..1000) {
        let _ = fill_checked(&words, pick);
    }

    #[test]
    fn used_extent_never_exceeds_the_maxima(words in arb_word_list(), pick in 0usize..1000) {
        let grid = fill_checked(&words, pick);
        prop_assert!(grid.height() >= 1 && grid.height() <= MAX_DIM);
        prop_assert!(grid.width() >= 1 && grid.width() <= MAX_DIM);
    }

    #[test]
    fn placed_words_read_back_consistently(words in arb_word_list(), pick in 0usize..1000) {
        let grid = fill_checked(&words, pick);

        let mut found = 0;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                    let Some(word) = grid.word_starting_at(row, col, orientation) else {
                        continue;
                    };
                    found += 1;
                    let (dr, dc) = orientation.step();
                    for (i, &letter) in word.letters().iter().enumerate() {
                        let cell = grid.cell(row + i as i32 * dr, col + i as i32 * dc);
                        prop_assert_eq!(cell, letter);
                    }
                }
            }
        }
        prop_assert_eq!(found, grid.placed_word_count());
    }

    #[test]
    fn letter_count_matches_occupied_cells(words in arb_word_list(), pick in 0usize..1000) {
        let grid = fill_checked(&words, pick);

        let mut occupied = 0;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.cell(row, col) != crossgrid::grid::EMPTY_CELL {
                    occupied += 1;
                }
            }
        }
        prop_assert_eq!(occupied, grid.placed_letter_count());
    }
}
