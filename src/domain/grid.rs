use thiserror::Error;

/// Errors raised by grid construction and bounds-checked access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

/// Read-only view over one generation of cells.
/// Neighbor lookups wrap around both edges (toroidal topology).
#[derive(Clone, Copy)]
pub struct Generation<'a> {
    cells: &'a [bool],
    height: usize,
    width: usize,
}

impl Generation<'_> {
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[(row % self.height) * self.width + col % self.width]
    }

    /// Count live cells among the 8 surrounding positions, wrapping at the edges.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let (h, w) = (self.height, self.width);
        let (row, col) = (row % h, col % w);
        let rows = [(row + h - 1) % h, row, (row + 1) % h];
        let cols = [(col + w - 1) % w, col, (col + 1) % w];

        rows.iter()
            .enumerate()
            .flat_map(|(dr, &r)| cols.iter().enumerate().map(move |(dc, &c)| (dr, dc, r, c)))
            .filter(|&(dr, dc, _, _)| dr != 1 || dc != 1)
            .filter(|&(_, _, r, c)| self.cells[r * w + c])
            .count() as u8
    }
}

/// Double-buffered toroidal grid.
///
/// `current` is the authoritative generation; `next` is scratch space the
/// rule engine writes into before [`Grid::swap`] exchanges the two.
pub struct Grid {
    height: usize,
    width: usize,
    current: Vec<bool>,
    next: Vec<bool>,
}

impl Grid {
    /// Create a new grid with all cells dead
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            current: vec![false; height * width],
            next: vec![false; height * width],
        })
    }

    /// Grid dimensions as (height, width)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(GridError::IndexOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.index(row, col).map(|idx| self.current[idx])
    }

    /// Write a cell of the current generation (interactive edits only)
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.current[idx] = alive;
        Ok(())
    }

    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> u8 {
        self.generation().count_alive_neighbors(row, col)
    }

    /// Exchange current and next buffers without copying cells
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn generation(&self) -> Generation<'_> {
        Generation {
            cells: &self.current,
            height: self.height,
            width: self.width,
        }
    }

    /// Borrow the current generation for reading and the next buffer for writing.
    pub(crate) fn split_buffers(&mut self) -> (Generation<'_>, &mut [bool]) {
        let generation = Generation {
            cells: &self.current,
            height: self.height,
            width: self.width,
        };
        (generation, &mut self.next)
    }

    /// Number of live cells in the current generation
    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&alive| alive).count()
    }

    /// Overwrite every cell of the current generation from `alive`
    pub fn fill(&mut self, mut alive: impl FnMut() -> bool) {
        self.current.iter_mut().for_each(|cell| *cell = alive());
    }

    /// Copy of the current generation in row-major order
    pub fn cells(&self) -> Vec<bool> {
        self.current.clone()
    }

    /// Iterate over (row, col) of every live cell
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.current
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| (idx / width, idx % width))
    }
}
