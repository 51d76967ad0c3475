use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Draw-and-reject planter: samples uniformly random cells and keeps the ones that are neither mined yet nor
/// inside the safe zone.
///
/// When the configured count cannot fit outside the requested safe zone, it shrinks the zone instead of looping
/// forever.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlanter {
    seed: u64,
    start: Coord2,
    safe_zone: SafeZone,
}

impl RandomMinePlanter {
    pub fn new(seed: u64, start: Coord2, safe_zone: SafeZone) -> Self {
        Self {
            seed,
            start,
            safe_zone,
        }
    }

    fn fitting_safe_zone(&self, grid: &Grid) -> SafeZone {
        use SafeZone::*;

        let total_cells = grid.total_cells();
        let mines = grid.mine_count();
        let fits = |zone: SafeZone| mines + zone.size(grid, self.start) <= total_cells;

        match self.safe_zone {
            Unprotected => Unprotected,
            Neighborhood if fits(Neighborhood) => Neighborhood,
            Neighborhood | Cell if fits(Cell) => {
                if self.safe_zone == Neighborhood {
                    log::warn!("Cannot keep start neighborhood clear, fallback to safe start cell");
                }
                Cell
            }
            Neighborhood | Cell => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Unprotected
            }
        }
    }
}

impl MinePlanter for RandomMinePlanter {
    fn plant(self, grid: &mut Grid) {
        if grid.mines_planted() {
            log::warn!("Mines already planted, ignoring second planting");
            return;
        }

        let total_cells = grid.total_cells();
        let mines = grid.mine_count();
        let (columns, rows) = grid.size();

        // optimize for full boards
        if mines >= total_cells {
            for y in 0..rows {
                for x in 0..columns {
                    grid.set_mine((x, y));
                }
            }
            grid.mark_planted();
            return;
        }

        let safe_zone = self.fitting_safe_zone(grid);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws: u32 = 0;

        while mines_placed < mines {
            let coords = (rng.random_range(0..columns), rng.random_range(0..rows));
            draws += 1;

            if grid.contains_mine(coords) || safe_zone.contains(self.start, coords) {
                continue;
            }

            grid.set_mine(coords);
            mines_placed += 1;
        }
        grid.mark_planted();

        log::debug!(
            "Planted {} mines around safe start {:?} ({:?}) in {} draws",
            mines,
            self.start,
            safe_zone,
            draws
        );

        // double check mine count
        let count = grid.count_mines();
        if count != mines {
            log::warn!(
                "Planted mine count mismatch, actual: {}, requested: {}",
                count,
                mines
            );
        }
    }
}
