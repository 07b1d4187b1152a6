use std::fmt;

use crate::error::BoardError;

use super::Player;

pub const STANDARD_COLUMNS: usize = 7;
pub const STANDARD_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// Decode a rack value: 0 is empty, 1 and 2 are player tokens.
    pub fn from_id(id: u8) -> Option<Cell> {
        match id {
            0 => Some(Cell::Empty),
            1 => Some(Cell::One),
            2 => Some(Cell::Two),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => 'X',
            Cell::Two => 'O',
        }
    }
}

/// Board dimensions. Every board and quartet catalog is tied to one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub columns: usize,
    pub rows: usize,
}

impl Shape {
    pub fn new(columns: usize, rows: usize) -> Self {
        Shape { columns, rows }
    }

    /// The classic 7 x 6 rack.
    pub fn standard() -> Self {
        Shape::new(STANDARD_COLUMNS, STANDARD_ROWS)
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::standard()
    }
}

/// A gravity-filled rack stored column-major.
///
/// Column 0 is the leftmost column and row 0 is the bottom row. Within a
/// column the occupied cells always form a contiguous run from row 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    shape: Shape,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(shape: Shape) -> Self {
        Board {
            shape,
            cells: vec![Cell::Empty; shape.cell_count()],
        }
    }

    /// Build a board from a column-major rack of ids (0 empty, 1 or 2 a token).
    pub fn from_columns(rack: &[Vec<u8>]) -> Result<Self, BoardError> {
        let columns = rack.len();
        if columns == 0 {
            return Err(BoardError::NoColumns);
        }
        let rows = rack[0].len();
        if rows == 0 {
            return Err(BoardError::NoRows);
        }

        let shape = Shape::new(columns, rows);
        let mut cells = Vec::with_capacity(shape.cell_count());
        for (column, values) in rack.iter().enumerate() {
            if values.len() != rows {
                return Err(BoardError::Ragged {
                    column,
                    expected: rows,
                    found: values.len(),
                });
            }
            let mut seen_empty = false;
            for (row, &value) in values.iter().enumerate() {
                let cell = Cell::from_id(value).ok_or(BoardError::InvalidCell { column, row, value })?;
                if cell == Cell::Empty {
                    seen_empty = true;
                } else if seen_empty {
                    return Err(BoardError::FloatingToken { column, row });
                }
                cells.push(cell);
            }
        }

        Ok(Board { shape, cells })
    }

    /// Export the board as a column-major rack of ids.
    pub fn to_columns(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.shape.rows)
            .map(|column| column.iter().map(|c| c.id()).collect())
            .collect()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn columns(&self) -> usize {
        self.shape.columns
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    fn index(&self, col: usize, row: usize) -> usize {
        col * self.shape.rows + row
    }

    /// Get the cell at a specific position. Row 0 is the bottom.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[self.index(col, row)]
    }

    /// The cells of one column, bottom first.
    pub fn column(&self, col: usize) -> &[Cell] {
        let start = self.index(col, 0);
        &self.cells[start..start + self.shape.rows]
    }

    /// True iff the topmost cell of the column is empty
    pub fn is_column_playable(&self, col: usize) -> bool {
        col < self.shape.columns
            && self.shape.rows > 0
            && self.get(col, self.shape.rows - 1) == Cell::Empty
    }

    /// Columns that still have room, left to right
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.shape.columns)
            .filter(|&col| self.is_column_playable(col))
            .collect()
    }

    /// The row a token dropped into `col` would land on.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if !self.is_column_playable(col) {
            return None;
        }
        self.column(col).iter().position(|&c| c == Cell::Empty)
    }

    /// Check if any column can still take a token
    pub fn has_open_cell(&self) -> bool {
        (0..self.shape.columns).any(|col| self.is_column_playable(col))
    }

    /// Copy of this board with `player`'s token dropped into `col`, plus the
    /// row it landed on.
    pub fn with_token(&self, col: usize, player: Player) -> Result<(Board, usize), BoardError> {
        if col >= self.shape.columns {
            return Err(BoardError::InvalidColumn(col));
        }
        let row = self.landing_row(col).ok_or(BoardError::ColumnFull(col))?;
        let mut next = self.clone();
        let idx = next.index(col, row);
        next.cells[idx] = player.to_cell();
        Ok((next, row))
    }

    /// Every board reachable by one move of `player`, in ascending column
    /// order. Full columns are skipped.
    pub fn successors(&self, player: Player) -> Vec<Board> {
        (0..self.shape.columns)
            .filter_map(|col| self.with_token(col, player).ok())
            .map(|(board, _)| board)
            .collect()
    }

    /// First column (left to right) whose contents differ from `other`.
    /// Both boards must have the same shape.
    pub fn first_differing_column(&self, other: &Board) -> Option<usize> {
        if self.shape != other.shape {
            return None;
        }
        (0..self.shape.columns).find(|&col| self.column(col) != other.column(col))
    }

    /// Check if the token at (col, row) is part of four in a line.
    pub fn check_win(&self, col: usize, row: usize) -> bool {
        let cell = self.get(col, row);
        if cell == Cell::Empty {
            return false;
        }

        // Horizontal, vertical, rising, falling
        const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        DIRECTIONS.iter().any(|&(dc, dr)| {
            1 + self.run_length(col, row, dc, dr, cell) + self.run_length(col, row, -dc, -dr, cell)
                >= 4
        })
    }

    /// Number of consecutive `cell` tokens walking from (col, row), exclusive.
    fn run_length(&self, col: usize, row: usize, dc: isize, dr: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut c = col as isize + dc;
        let mut r = row as isize + dr;
        while c >= 0
            && r >= 0
            && (c as usize) < self.shape.columns
            && (r as usize) < self.shape.rows
            && self.get(c as usize, r as usize) == cell
        {
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Shape::standard())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.shape.rows).rev() {
            for col in 0..self.shape.columns {
                write!(f, " {}", self.get(col, row).symbol())?;
            }
            writeln!(f)?;
        }
        for col in 0..self.shape.columns {
            write!(f, " {}", col % 10)?;
        }
        Ok(())
    }
}
