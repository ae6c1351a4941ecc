mod error;

pub use error::*;

use tracing::trace;

use crate::{Cell, Move, Player, WinResult};

/// Number of rows. Row 0 is the bottom row.
pub const ROWS: i8 = 6;
/// Number of columns, indexed from 0 on the left.
pub const COLUMNS: i8 = 9;
/// Number of tokens in a straight line needed to win.
pub const WIN_LENGTH: i8 = 4;

/// The four axes a line can lie on, as `(row step, column step)`: vertical,
/// horizontal, rising diagonal and falling diagonal.
///
/// Each axis is walked in this direction and in the negated one.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// The playing grid.
///
/// Tokens can only be added through [`Self::insert()`], which keeps the
/// occupied cells of every column contiguous from row 0 upwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Indexed by `[row][column]`.
    cells: [[Cell; COLUMNS as usize]; ROWS as usize],
    /// The number of tokens in each column, which is also the row the next
    /// token in that column lands in.
    heights: [i8; COLUMNS as usize],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLUMNS as usize]; ROWS as usize],
            heights: [0; COLUMNS as usize],
        }
    }

    /// Removes all tokens.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_in_bounds(row: i8, column: i8) -> bool {
        (0..ROWS).contains(&row) && (0..COLUMNS).contains(&column)
    }

    pub fn is_valid_column(column: i8) -> bool {
        (0..COLUMNS).contains(&column)
    }

    /// The cell at the given coordinates, or `None` if they are outside of the board.
    pub fn cell(&self, row: i8, column: i8) -> Option<Cell> {
        Self::is_in_bounds(row, column).then(|| self.cells[row as usize][column as usize])
    }

    /// The color of the token at the given coordinates.
    ///
    /// Returns `None` for empty cells and for coordinates outside of the board,
    /// so callers can walk off the edge without checking bounds first.
    pub fn color_at(&self, row: i8, column: i8) -> Option<Player> {
        self.cell(row, column).and_then(Cell::player)
    }

    /// Whether the topmost cell of the column is occupied.
    ///
    /// Columns outside of the board count as full, since no token fits there.
    pub fn is_column_full(&self, column: i8) -> bool {
        !Self::is_valid_column(column) || self.heights[column as usize] >= ROWS
    }

    /// Whether every column is full.
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&height| height >= ROWS)
    }

    /// Drops a token into a column.
    ///
    /// The token comes to rest in the lowest empty row. On error, the board
    /// is not modified.
    pub fn insert(&mut self, column: i8, player: Player) -> Result<Move, IllegalInsert> {
        if !Self::is_valid_column(column) {
            return Err(IllegalInsert::InvalidColumnIndex { column });
        }
        if self.is_column_full(column) {
            return Err(IllegalInsert::ColumnFull { column });
        }
        let row = self.heights[column as usize];
        self.cells[row as usize][column as usize] = Cell::Occupied(player);
        self.heights[column as usize] += 1;
        trace!(row, column, %player, "Token inserted");
        Ok(Move::new(row, column, player))
    }

    /// For every column, the row a token dropped there would land in, or
    /// `None` if the column is full.
    pub fn lowest_empty_rows(&self) -> [Option<i8>; COLUMNS as usize] {
        self.heights.map(|height| (height < ROWS).then_some(height))
    }

    /// The columns that are not full yet, from left to right.
    pub fn legal_columns(&self) -> impl Iterator<Item = i8> + '_ {
        (0..COLUMNS).filter(|&column| !self.is_column_full(column))
    }

    /// The number of tokens in each column.
    pub fn heights(&self) -> &[i8; COLUMNS as usize] {
        &self.heights
    }

    /// The number of tokens on the board.
    pub fn move_count(&self) -> usize {
        self.heights.iter().map(|&height| height as usize).sum()
    }

    // Internal helper for adjacency().
    //
    // Counts the tokens of `player` that directly follow `(row, column)` in
    // the given direction. The starting cell itself is not counted. A zero
    // step has no run.
    fn run_length(&self, row: i8, column: i8, direction: (i8, i8), player: Player) -> i8 {
        let (d_row, d_column) = direction;
        if direction == (0, 0) {
            return 0;
        }
        let mut count = 0;
        let (mut r, mut c) = (row + d_row, column + d_column);
        while self.color_at(r, c) == Some(player) {
            count += 1;
            r += d_row;
            c += d_column;
        }
        count
    }

    /// The number of `player` tokens adjacent to `(row, column)` along its best
    /// axis, capped at 3.
    ///
    /// The cell itself is not counted and does not have to be occupied, so this
    /// also scores a hypothetical token. A score of 3 means that a token of
    /// `player` there completes (or completed) four in a row.
    pub fn adjacency(&self, row: i8, column: i8, player: Player) -> u8 {
        if !Self::is_in_bounds(row, column) {
            return 0;
        }
        DIRECTIONS
            .iter()
            .map(|&(d_row, d_column)| {
                self.run_length(row, column, (d_row, d_column), player)
                    + self.run_length(row, column, (-d_row, -d_column), player)
            })
            .max()
            .unwrap_or(0)
            .min(WIN_LENGTH - 1) as u8
    }

    /// Checks whether the token of `player` at `(row, column)` is part of four
    /// in a row, and if so, which cells form the line.
    ///
    /// This is meant to be called with the coordinates of the latest [`Move`],
    /// since only the latest token can complete a new line. Runs longer than
    /// four still yield exactly four cells.
    pub fn check_win(&self, row: i8, column: i8, player: Player) -> Option<WinResult> {
        if self.color_at(row, column) != Some(player) {
            return None;
        }
        if self.adjacency(row, column, player) < (WIN_LENGTH - 1) as u8 {
            return None;
        }
        DIRECTIONS
            .iter()
            .find_map(|&direction| self.winning_cells(row, column, direction, player))
            .map(|cells| WinResult::new(player, cells))
    }

    // Internal helper for check_win().
    //
    // Collects up to four cells starting at the anchor in the positive direction,
    // tops them up from the negative direction, and orders the result along the axis.
    fn winning_cells(
        &self,
        row: i8,
        column: i8,
        direction: (i8, i8),
        player: Player,
    ) -> Option<[(i8, i8); 4]> {
        let (d_row, d_column) = direction;
        let forward = self.collect_run(row, column, (d_row, d_column), player);
        let missing = WIN_LENGTH as usize - forward.len();
        let backward: Vec<(i8, i8)> = if missing > 0 {
            self.collect_run(row, column, (-d_row, -d_column), player)
                .into_iter()
                .skip(1) // The anchor is already in `forward`
                .take(missing)
                .collect()
        } else {
            Vec::new()
        };
        if forward.len() + backward.len() < WIN_LENGTH as usize {
            return None;
        }
        let line: Vec<(i8, i8)> = backward.into_iter().rev().chain(forward).collect();
        line.try_into().ok()
    }

    // Internal helper for winning_cells().
    //
    // The cells of `player` starting at (and including) the anchor, at most four.
    fn collect_run(
        &self,
        row: i8,
        column: i8,
        direction: (i8, i8),
        player: Player,
    ) -> Vec<(i8, i8)> {
        let (d_row, d_column) = direction;
        (0..WIN_LENGTH)
            .map(|step| (row + step * d_row, column + step * d_column))
            .take_while(|&(r, c)| self.color_at(r, c) == Some(player))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
