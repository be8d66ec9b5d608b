use super::engine::EngineError;

/// A cell coordinate on a board, row-major with the origin at the top left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular grid of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Board {
    /// Create a board where every cell holds `fill`
    pub fn filled(rows: usize, cols: usize, fill: char) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Build a board from ASCII art, one string per row
    ///
    /// All rows must be non-empty and share the same width.
    pub fn from_art<S: AsRef<str>>(art: &[S]) -> Result<Self, EngineError> {
        let Some(first) = art.first() else {
            return Err(EngineError::InvalidLayout("art has no rows".to_string()));
        };

        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(EngineError::InvalidLayout("art rows are empty".to_string()));
        }

        let mut cells = Vec::with_capacity(art.len() * cols);
        for (index, row) in art.iter().enumerate() {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            if cells.len() - before != cols {
                return Err(EngineError::InvalidLayout(format!(
                    "row {index} has width {}, expected {cols}",
                    cells.len() - before
                )));
            }
        }

        Ok(Self {
            rows: art.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.contains(pos).then(|| self.cells[pos.row * self.cols + pos.col])
    }

    /// Overwrite one cell. Returns false if `pos` is off the board.
    pub fn set(&mut self, pos: Position, value: char) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.cells[pos.row * self.cols + pos.col] = value;
        true
    }

    /// Characters of a single row
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate over all rows, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Find the first cell holding `value`, scanning row by row
    pub fn find(&self, value: char) -> Option<Position> {
        self.cells
            .iter()
            .position(|&c| c == value)
            .map(|index| Position::new(index / self.cols, index % self.cols))
    }

    /// Replace every occurrence of a character according to `map`
    pub fn map_cells(&mut self, mut map: impl FnMut(char) -> char) {
        for cell in &mut self.cells {
            *cell = map(*cell);
        }
    }
}

/// What the game shows the player after kickoff or a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub board: Board,
}

impl Observation {
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}
