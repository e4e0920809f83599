use std::fs;
use std::path::Path;

use crate::error::CgResult;
use crate::grid::{Grid, Orientation, EMPTY_CELL};

const PREAMBLE: &str = r"\documentclass{article}

\usepackage{amssymb}
\usepackage{multicol}
\usepackage{enumitem}
\usepackage[a4paper, margin=1cm]{geometry}
\usepackage[small]{cwpuzzle}

\setlist[enumerate]{itemsep=0mm}

\begin{document}
\pagestyle{empty}
";

const PUZZLE_MACROS: &str = r"
\renewcommand{\PuzzleUnitlength}{13pt}
\newcommand{\cluer}[1]{\textbf{#1}^\blacktriangleright}
\newcommand{\clued}[1]{\textbf{#1}\blacktriangledown}
";

/// Renders a finished grid as a cwpuzzle LaTeX document: the empty puzzle
/// with numbered word-start markers, the clue lists, then the solution.
/// Reads the grid through its external accessors only.
pub struct LatexRenderer;

impl LatexRenderer {
    pub fn render(&self, grid: &Grid) -> String {
        let mut doc = String::new();
        doc.push_str(PREAMBLE);
        doc.push_str(PUZZLE_MACROS);

        self.push_puzzle(grid, &mut doc);
        doc.push_str("\n\\pagebreak\n");
        self.push_clues(grid, &mut doc);
        doc.push_str("\n\\pagebreak\n");
        doc.push_str("\n\\PuzzleSolution\n");
        self.push_puzzle(grid, &mut doc);

        doc.push_str("\n\\end{document}\n");
        doc
    }

    pub fn write_to_file(&self, grid: &Grid, path: impl AsRef<Path>) -> CgResult<()> {
        fs::write(path, self.render(grid))?;
        Ok(())
    }

    fn push_puzzle(&self, grid: &Grid, out: &mut String) {
        // One extra row and column: the word-start markers sit in the cell
        // above (vertical) or left of (horizontal) the word's first letter.
        out.push_str(&format!(
            "\n\\begin{{Puzzle}}{{{}}}{{{}}}\n",
            grid.width() + 1,
            grid.height() + 1
        ));

        let mut vertical_count = 0;
        let mut horizontal_count = 0;
        for row in 0..=grid.height() {
            for col in 0..=grid.width() {
                let vertical_marker = grid
                    .word_starting_at(row, col - 1, Orientation::Vertical)
                    .map(|_| {
                        vertical_count += 1;
                        vertical_count
                    });
                let horizontal_marker = grid
                    .word_starting_at(row - 1, col, Orientation::Horizontal)
                    .map(|_| {
                        horizontal_count += 1;
                        horizontal_count
                    });

                out.push('|');
                if vertical_marker.is_some() || horizontal_marker.is_some() {
                    out.push_str("[$");
                    if let Some(n) = vertical_marker {
                        out.push_str(&format!("_{{\\clued{{{}}}}}", n));
                    }
                    if let Some(n) = horizontal_marker {
                        out.push_str(&format!("^{{\\cluer{{{}}}}}", n));
                    }
                    out.push_str("$]");
                }

                let content = grid.cell(row - 1, col - 1);
                if content == EMPTY_CELL {
                    out.push_str("{}");
                } else {
                    out.push_str(&format!(" {}", content as char));
                }
            }
            out.push_str("|.\n");
        }
        out.push_str("\\end{Puzzle}\n\n");
    }

    fn push_clues(&self, grid: &Grid, out: &mut String) {
        out.push_str("\\begin{multicols*}{2}\n");
        self.push_clue_list(grid, Orientation::Vertical, "VERTICAL CLUES", out);
        out.push_str("\\vfill\\null\n\\columnbreak\n");
        self.push_clue_list(grid, Orientation::Horizontal, "HORIZONTAL CLUES", out);
        out.push_str("\\end{multicols*}\n");
    }

    // Scans in the same (row, col) order as the marker pass, so the n-th
    // list item matches the n-th marker of that orientation.
    fn push_clue_list(
        &self,
        grid: &Grid,
        orientation: Orientation,
        title: &str,
        out: &mut String,
    ) {
        out.push_str(&format!("{}\n\\begin{{enumerate}}\n", title));
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if let Some(word) = grid.word_starting_at(row, col, orientation) {
                    out.push_str(&format!("\\item {}\n", word.clue));
                }
            }
        }
        out.push_str("\\end{enumerate}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Location;
    use crate::words::Word;

    fn crossed_grid() -> Grid {
        let mut grid = Grid::new(15, 15);
        assert!(grid.place_first_word(
            &Word::new(1, "capital of France", "PARIS"),
            Orientation::Horizontal
        ));
        assert!(grid.place_word(
            &Word::new(2, "feline", "CAT"),
            Location::new(14, 14, Orientation::Vertical)
        ));
        grid
    }

    #[test]
    fn document_has_puzzle_clues_and_solution() {
        let doc = LatexRenderer.render(&crossed_grid());

        assert!(doc.starts_with("\\documentclass{article}"));
        // Two puzzle environments: empty and solution.
        assert_eq!(doc.matches("\\begin{Puzzle}").count(), 2);
        assert!(doc.contains("\\PuzzleSolution"));
        assert!(doc.contains("\\item capital of France"));
        assert!(doc.contains("\\item feline"));
        assert!(doc.ends_with("\\end{document}\n"));
    }

    #[test]
    fn puzzle_frame_is_one_larger_than_the_grid() {
        let grid = crossed_grid();
        let doc = LatexRenderer.render(&grid);
        let frame = format!(
            "\\begin{{Puzzle}}{{{}}}{{{}}}",
            grid.width() + 1,
            grid.height() + 1
        );
        assert!(doc.contains(&frame));
    }

    #[test]
    fn both_words_get_start_markers() {
        let doc = LatexRenderer.render(&crossed_grid());
        assert!(doc.contains("\\clued{1}"));
        assert!(doc.contains("\\cluer{1}"));
    }

    #[test]
    fn solution_contains_the_letters() {
        let doc = LatexRenderer.render(&crossed_grid());
        for letter in ["| P", "| A", "| R", "| I", "| S", "| C", "| T"] {
            assert!(doc.contains(letter), "missing {letter}");
        }
    }
}
