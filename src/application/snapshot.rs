/// Read-only copy of the simulation taken after a tick, handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub elapsed_ticks: u64,
    pub paused: bool,
    pub population: usize,
    cells: Vec<bool>,
}

impl Snapshot {
    pub(crate) fn new(
        height: usize,
        width: usize,
        cells: Vec<bool>,
        elapsed_ticks: u64,
        paused: bool,
    ) -> Self {
        let population = cells.iter().filter(|&&alive| alive).count();
        Self {
            width,
            height,
            elapsed_ticks,
            paused,
            population,
            cells,
        }
    }

    /// Cells outside the grid read as dead
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| (idx / width, idx % width))
    }
}
