use crate::*;
pub use random::*;

mod random;

pub trait MinePlanter {
    fn plant(self, grid: &mut Grid);
}

/// Cells around the first reveal that planting keeps free of mines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SafeZone {
    Unprotected,
    Cell,
    Neighborhood,
}

impl SafeZone {
    pub fn contains(self, center: Coord2, coords: Coord2) -> bool {
        match self {
            Self::Unprotected => false,
            Self::Cell => center == coords,
            Self::Neighborhood => {
                center.0.abs_diff(coords.0) <= 1 && center.1.abs_diff(coords.1) <= 1
            }
        }
    }

    /// Number of in-bounds cells the zone covers on `grid`.
    pub fn size(self, grid: &Grid, center: Coord2) -> CellCount {
        match self {
            Self::Unprotected => 0,
            Self::Cell => 1,
            Self::Neighborhood => {
                let neighbors: CellCount = grid.iter_neighbors(center).count().try_into().unwrap();
                neighbors + 1
            }
        }
    }
}
