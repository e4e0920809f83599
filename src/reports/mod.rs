use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use crossgrid::grid::{Grid, Orientation, EMPTY_CELL};
use crossgrid::words::Word;

/// Prints the used extent of the grid as a cell table plus its counters.
pub fn print_grid(grid: &Grid) {
    println!(
        "\n{}x{} grid, {} words placed, {} letters, {} crossings",
        grid.height(),
        grid.width(),
        grid.placed_word_count(),
        grid.placed_letter_count(),
        grid.crossing_count()
    );

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    for row in 0..grid.height() {
        let cells: Vec<Cell> = (0..grid.width())
            .map(|col| {
                let content = grid.cell(row, col);
                let s = if content == EMPTY_CELL {
                    " ".to_string()
                } else {
                    (content as char).to_string()
                };
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
}

/// Prints one row per placed word: start cell, orientation, clue, solution.
pub fn print_clues(grid: &Grid) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["row", "col", "dir", "clue", "solution"]);

    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        for (loc, word) in grid
            .placed_words()
            .filter(|(loc, _)| loc.orientation == orientation)
        {
            table.add_row(vec![
                Cell::new(loc.row),
                Cell::new(loc.col),
                Cell::new(orientation),
                Cell::new(&word.clue),
                Cell::new(&word.solution),
            ]);
        }
    }
    println!("{table}");
}

pub fn print_word_list(words: &[Word]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["id", "clue", "solution", "len"]);

    for word in words {
        table.add_row(vec![
            Cell::new(word.id),
            Cell::new(&word.clue),
            Cell::new(&word.solution),
            Cell::new(word.len()),
        ]);
    }
    println!("{table}");
}
