use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rows × columns of cells stored row-major, plus the mine count the grid was configured with.
///
/// Mines are planted lazily: a fresh grid has none until [`Grid::plant_mines`] runs on the first reveal, which
/// is what lets the first click always land on an empty neighborhood.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_planted: bool,
}

impl Grid {
    pub fn new(rows: Coord, columns: Coord, mine_count: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 || mine_count > mult(rows, columns) {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self::empty(rows, columns, mine_count))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::empty(config.rows(), config.columns(), config.mine_count())
    }

    /// Builds a grid whose mines are already in place, so no planting happens on the first reveal.
    pub fn from_mine_coords(rows: Coord, columns: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(rows, columns, 0)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            if !grid[coords].mine {
                grid.set_mine(coords);
                grid.mine_count += 1;
            }
        }

        grid.mines_planted = true;
        Ok(grid)
    }

    fn empty(rows: Coord, columns: Coord, mine_count: CellCount) -> Self {
        Self {
            cells: Array2::default((usize::from(rows), usize::from(columns))),
            mine_count,
            mines_planted: false,
        }
    }

    /// Size as `(columns, rows)`.
    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (columns.try_into().unwrap(), rows.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().1
    }

    pub fn columns(&self) -> Coord {
        self.size().0
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mines_planted(&self) -> bool {
        self.mines_planted
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].mine
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count()
            .try_into()
            .unwrap()
    }

    /// Places the configured number of mines at random, keeping the 3×3 block around `safe` clear.
    ///
    /// Only the first call on a grid has any effect.
    pub fn plant_mines(&mut self, safe: Coord2, seed: u64) {
        RandomMinePlanter::new(seed, safe, SafeZone::Neighborhood).plant(self);
    }

    /// Uncovers a single cell. The cell must be hidden.
    pub fn reveal(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        debug_assert_eq!(cell.cover, Cover::Hidden, "reveal on a non-hidden cell");
        cell.cover = Cover::Revealed;
    }

    /// Opens the region of zero-adjacency cells connected to `coords` along with the numbered cells bordering
    /// it. Does nothing unless `coords` itself has no adjacent mines.
    ///
    /// Mines and flagged cells are never opened and do not carry the flood further. Returns how many cells were
    /// newly revealed, not counting `coords` itself.
    pub fn flood_reveal(&mut self, coords: Coord2) -> CellCount {
        if self.adjacent_mine_count(coords) != 0 {
            return 0;
        }

        let mut revealed = 0;
        let mut to_visit: VecDeque<_> = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].cover == Cover::Hidden)
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        // the revealed cover doubles as the visited set
        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self[visit_coords];
            if cell.cover != Cover::Hidden || cell.mine {
                continue;
            }

            self.cells[visit_coords.to_nd_index()].cover = Cover::Revealed;
            revealed += 1;

            let visit_adjacent_mines = self.adjacent_mine_count(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self[pos].cover == Cover::Hidden),
                );
            }
        }

        revealed
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.cover {
            Cover::Hidden => {
                cell.cover = Cover::Flagged;
                MarkOutcome::Flagged
            }
            Cover::Flagged => {
                cell.cover = Cover::Hidden;
                MarkOutcome::Unflagged
            }
            Cover::Revealed => MarkOutcome::NoChange,
        }
    }

    pub(crate) fn set_mine(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].mine = true;
    }

    pub(crate) fn mark_planted(&mut self) {
        self.mines_planted = true;
    }

    pub(crate) fn count_mines(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.mine)
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
