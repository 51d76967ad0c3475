use serde::{Deserialize, Serialize};

use crate::*;

/// How many mines a grid gets, either directly or as a fraction of its cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MineSpec {
    Count(CellCount),
    Density(f32),
}

impl MineSpec {
    /// Resolves to an absolute count for a grid with `total_cells` cells. Density truncates toward zero.
    pub fn resolve(self, total_cells: CellCount) -> Result<CellCount> {
        match self {
            Self::Count(count) if count <= total_cells => Ok(count),
            Self::Count(_) => Err(GameError::InvalidDimensions),
            Self::Density(density) if (0.0..=1.0).contains(&density) => {
                Ok((f32::from(total_cells) * density) as CellCount)
            }
            Self::Density(_) => Err(GameError::InvalidDimensions),
        }
    }
}

/// Construction-time settings for a game. Once built the values are known to describe a valid grid, so every
/// session created from it is infallible.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Coord,
    columns: Coord,
    mines: CellCount,
    cell_size: u16,
}

impl GameConfig {
    pub const DEFAULT_CELL_SIZE: u16 = 100;

    pub fn new(rows: Coord, columns: Coord, mines: MineSpec, cell_size: u16) -> Result<Self> {
        if rows == 0 || columns == 0 || cell_size == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let mines = mines.resolve(mult(rows, columns))?;
        Ok(Self {
            rows,
            columns,
            mines,
            cell_size,
        })
    }

    pub const fn beginner() -> Self {
        Self::preset(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::preset(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::preset(16, 30, 99)
    }

    const fn preset(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    /// Grid size as `(columns, rows)`, matching `(x, y)` coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.columns, self.rows)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub const fn cell_size(&self) -> u16 {
        self.cell_size
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }
}

impl Default for GameConfig {
    /// 12×16 board at a quarter mine density.
    fn default() -> Self {
        Self {
            rows: 12,
            columns: 16,
            mines: 48,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }
}
