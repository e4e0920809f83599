use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fnv::FnvHashMap;
use strum::{Display, EnumString};

use crate::words::Word;

pub const EMPTY_CELL: u8 = b'.';

/// Axis a word extends along. Vertical must encode as 0 and horizontal as 1:
/// the bounds arithmetic uses `1 - o` / `o` as axis multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    Vertical = 0,
    Horizontal = 1,
}

impl Orientation {
    /// Per-letter step as (row delta, column delta).
    #[inline]
    pub fn step(self) -> (i32, i32) {
        (1 - self as i32, self as i32)
    }
}

/// Where a word's first letter sits and which way it runs. Ordered by
/// (row, column, orientation); the ordering only serves as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub row: i32,
    pub col: i32,
    pub orientation: Orientation,
}

impl Location {
    pub fn new(row: i32, col: i32, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }
}

/// The puzzle state under construction.
///
/// The cell buffer is twice the requested height and width, and the first
/// word is anchored at its center, so the puzzle can grow in all four
/// directions no matter where that word ends up. The externally visible grid
/// is the used extent (bounding box), which is kept within the requested
/// maxima by `is_in_bounds`.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<u8>,
    internal_rows: i32,
    internal_cols: i32,
    max_rows: i32,
    max_cols: i32,

    min_row_used: i32,
    max_row_used: i32,
    min_col_used: i32,
    max_col_used: i32,

    crossing_count: i64,
    // letter -> flat indices of cells currently holding it; this is what
    // makes the placement search crossing-driven instead of a buffer scan.
    letter_index: FnvHashMap<u8, BTreeSet<usize>>,
    placed_words: BTreeMap<Location, Word>,
}

impl Grid {
    pub fn new(max_height: i32, max_width: i32) -> Self {
        let internal_rows = 2 * max_height;
        let internal_cols = 2 * max_width;
        Self {
            cells: vec![EMPTY_CELL; (internal_rows * internal_cols) as usize],
            internal_rows,
            internal_cols,
            max_rows: max_height,
            max_cols: max_width,
            // Bounds start at the buffer center, where the first word lands.
            min_row_used: max_height,
            max_row_used: max_height,
            min_col_used: max_width,
            max_col_used: max_width,
            crossing_count: 0,
            letter_index: FnvHashMap::default(),
            placed_words: BTreeMap::new(),
        }
    }

    #[inline]
    fn flat_index(&self, row: i32, col: i32) -> usize {
        (row * self.internal_cols + col) as usize
    }

    #[inline]
    fn in_buffer(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.internal_rows && col >= 0 && col < self.internal_cols
    }

    #[inline]
    fn cell_at(&self, row: i32, col: i32) -> u8 {
        if self.in_buffer(row, col) {
            self.cells[self.flat_index(row, col)]
        } else {
            EMPTY_CELL
        }
    }

    /// Cells outside the buffer count as empty, which lets the adjacency
    /// checks probe neighbors without bounds branching at every call site.
    #[inline]
    fn is_empty_cell(&self, row: i32, col: i32) -> bool {
        self.cell_at(row, col) == EMPTY_CELL
    }

    /// True when the word fits inside the internal buffer and would not grow
    /// the used extent past the requested maximum height/width.
    pub fn is_in_bounds(&self, word: &Word, loc: Location) -> bool {
        let span = word.len() as i32 - 1;
        let end_row = loc.row + span * (1 - loc.orientation as i32);
        let end_col = loc.col + span * (loc.orientation as i32);

        if loc.row < 0 || loc.col < 0 {
            return false;
        }
        if end_row >= self.internal_rows || end_col >= self.internal_cols {
            return false;
        }

        let used_height = end_row.max(self.max_row_used) - loc.row.min(self.min_row_used);
        let used_width = end_col.max(self.max_col_used) - loc.col.min(self.min_col_used);
        used_height < self.max_rows && used_width < self.max_cols
    }

    /// Pure adjacency/crossing check. Rules:
    /// - the cell before the first letter and after the last letter, along
    ///   the placement axis, must be empty (no word concatenation);
    /// - an empty target cell needs both perpendicular neighbors empty (no
    ///   parallel word touching without a real crossing);
    /// - an occupied target cell must already hold the letter being placed,
    ///   and the next cell along the placement axis must be empty. The last
    ///   rule blocks overlapping a same-orientation word with a shared
    ///   prefix/suffix, like "TESTTEST" over "TESTT".
    pub fn is_valid_placement(&self, word: &Word, loc: Location) -> bool {
        if !self.is_in_bounds(word, loc) {
            return false;
        }

        let (dr, dc) = loc.orientation.step();
        let (pr, pc) = (dc, dr);
        let len = word.len() as i32;

        if !self.is_empty_cell(loc.row - dr, loc.col - dc) {
            return false;
        }
        if !self.is_empty_cell(loc.row + len * dr, loc.col + len * dc) {
            return false;
        }

        for (i, &letter) in word.letters().iter().enumerate() {
            let row = loc.row + i as i32 * dr;
            let col = loc.col + i as i32 * dc;
            let existing = self.cell_at(row, col);
            if existing == EMPTY_CELL {
                if !self.is_empty_cell(row + pr, col + pc)
                    || !self.is_empty_cell(row - pr, col - pc)
                {
                    return false;
                }
            } else {
                if existing != letter {
                    return false;
                }
                if !self.is_empty_cell(row + dr, col + dc) {
                    return false;
                }
            }
        }
        true
    }

    /// Writes the word without validating. The caller is responsible for
    /// having checked `is_valid_placement`; structurally this always
    /// succeeds.
    pub fn place_word_unchecked(&mut self, word: &Word, loc: Location) -> bool {
        let (dr, dc) = loc.orientation.step();
        for (i, &letter) in word.letters().iter().enumerate() {
            let row = loc.row + i as i32 * dr;
            let col = loc.col + i as i32 * dc;
            let idx = self.flat_index(row, col);
            if self.cells[idx] != EMPTY_CELL {
                self.crossing_count += 1;
            }
            self.cells[idx] = letter;
            self.letter_index.entry(letter).or_default().insert(idx);
        }

        let span = word.len() as i32 - 1;
        self.max_row_used = self.max_row_used.max(loc.row + span * dr);
        self.max_col_used = self.max_col_used.max(loc.col + span * dc);
        self.min_row_used = self.min_row_used.min(loc.row);
        self.min_col_used = self.min_col_used.min(loc.col);

        self.placed_words.insert(loc, word.clone());
        true
    }

    pub fn place_word(&mut self, word: &Word, loc: Location) -> bool {
        if !self.is_valid_placement(word, loc) {
            return false;
        }
        self.place_word_unchecked(word, loc)
    }

    /// Places the first word so it straddles the buffer midpoint. Fails on a
    /// grid that already holds a word.
    pub fn place_first_word(&mut self, word: &Word, orientation: Orientation) -> bool {
        if !self.placed_words.is_empty() {
            return false;
        }

        let (dr, dc) = orientation.step();
        let half = word.len() as i32 / 2;
        let loc = Location::new(
            self.internal_rows / 2 - half * dr,
            self.internal_cols / 2 - half * dc,
            orientation,
        );
        self.place_word(word, loc)
    }

    /// Appends every valid placement of `word` to `out`. The search is
    /// crossing-driven: for each letter of the candidate it looks up the
    /// occupied cells holding that letter and tests the two locations that
    /// would make the candidate cross there.
    pub fn get_valid_placements(&self, word: &Word, out: &mut Vec<Location>) {
        for (i, &letter) in word.letters().iter().enumerate() {
            let Some(cells) = self.letter_index.get(&letter) else {
                continue;
            };
            for &idx in cells {
                let row = idx as i32 / self.internal_cols;
                let col = idx as i32 % self.internal_cols;

                let vertical = Location::new(row - i as i32, col, Orientation::Vertical);
                if self.is_valid_placement(word, vertical) {
                    out.push(vertical);
                }
                let horizontal = Location::new(row, col - i as i32, Orientation::Horizontal);
                if self.is_valid_placement(word, horizontal) {
                    out.push(horizontal);
                }
            }
        }
    }

    pub fn placed_word_count(&self) -> usize {
        self.placed_words.len()
    }

    pub fn placed_letter_count(&self) -> usize {
        self.letter_index.values().map(|cells| cells.len()).sum()
    }

    pub fn crossing_count(&self) -> i64 {
        self.crossing_count
    }

    /// Height of the used extent. An empty grid reports 1 (the degenerate
    /// single-cell box seeded at the buffer center).
    pub fn height(&self) -> i32 {
        self.max_row_used - self.min_row_used + 1
    }

    pub fn width(&self) -> i32 {
        self.max_col_used - self.min_col_used + 1
    }

    /// Cell content in external coordinates, relative to the used extent.
    /// Out-of-range reads return the empty cell.
    pub fn cell(&self, row: i32, col: i32) -> u8 {
        if row < 0 || row >= self.height() || col < 0 || col >= self.width() {
            return EMPTY_CELL;
        }
        self.cells[self.flat_index(self.min_row_used + row, self.min_col_used + col)]
    }

    /// The word whose first letter sits at (row, col) with the given
    /// orientation, in external coordinates.
    pub fn word_starting_at(&self, row: i32, col: i32, orientation: Orientation) -> Option<&Word> {
        let loc = Location::new(
            row + self.min_row_used,
            col + self.min_col_used,
            orientation,
        );
        self.placed_words.get(&loc)
    }

    /// Placed words with their start positions in external coordinates, in
    /// (row, col, orientation) order.
    pub fn placed_words(&self) -> impl Iterator<Item = (Location, &Word)> {
        self.placed_words.iter().map(|(loc, word)| {
            (
                Location::new(
                    loc.row - self.min_row_used,
                    loc.col - self.min_col_used,
                    loc.orientation,
                ),
                word,
            )
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}x{} grid, {} words, {} letters, {} crossings",
            self.height(),
            self.width(),
            self.placed_word_count(),
            self.placed_letter_count(),
            self.crossing_count
        )?;
        for row in 0..self.height() {
            write!(f, " ")?;
            for col in 0..self.width() {
                write!(f, "{}", self.cell(row, col) as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
