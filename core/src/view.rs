//! Render contract: a read-only snapshot of a session that a front end turns into pixels.

use core::time::Duration;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// What a single cell should look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Blank,
    Flagged,
    Mine,
    Numbered(u8),
}

impl CellView {
    /// Picks the visual for `coords`. While playing only what the player uncovered shows; after a win every
    /// cell is shown as its number, flag, or mine; after a loss every mine is exposed.
    pub fn of(grid: &Grid, phase: Phase, coords: Coord2) -> Self {
        let cell = grid[coords];
        let numbered = || Self::Numbered(grid.adjacent_mine_count(coords));

        match phase {
            Phase::Playing if cell.is_revealed() => numbered(),
            Phase::Playing if cell.is_flagged() => Self::Flagged,
            Phase::Playing => Self::Blank,
            Phase::Won if cell.is_flagged() => Self::Flagged,
            Phase::Won if cell.is_mine() => Self::Mine,
            Phase::Won => numbered(),
            Phase::Lost if cell.is_mine() => Self::Mine,
            Phase::Lost if cell.is_flagged() => Self::Flagged,
            Phase::Lost if cell.is_revealed() => numbered(),
            Phase::Lost => Self::Blank,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFrame {
    pub view: CellView,
    /// Pointer is over this cell and the game is still being played.
    pub highlighted: bool,
    /// Checkerboard parity, `(x + y) % 2 == 0`.
    pub even: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    pub phase: Phase,
    pub cells: Array2<CellFrame>,
    pub flag_count: CellCount,
    pub revealed_count: CellCount,
    pub mines_left: i32,
    pub elapsed: Duration,
    pub triggered_mine: Option<Coord2>,
}

impl BoardView {
    pub fn snapshot(session: &GameSession, pointer: Option<Coord2>, now: Instant) -> Self {
        let grid = session.grid();
        let phase = session.phase();
        let (columns, rows) = grid.size();

        let cells = Array2::from_shape_fn((usize::from(rows), usize::from(columns)), |(y, x)| {
            let coords: Coord2 = (x.try_into().unwrap(), y.try_into().unwrap());
            CellFrame {
                view: CellView::of(grid, phase, coords),
                highlighted: phase.is_playing() && pointer == Some(coords),
                even: (x + y) % 2 == 0,
            }
        });

        Self {
            phase,
            cells,
            flag_count: session.flag_count(),
            revealed_count: session.revealed_count(),
            mines_left: session.mines_left(),
            elapsed: session.elapsed_at(now),
            triggered_mine: session.triggered_mine(),
        }
    }

    /// Size as `(columns, rows)`.
    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (columns.try_into().unwrap(), rows.try_into().unwrap())
    }

    pub fn cell_at(&self, coords: Coord2) -> CellFrame {
        self.cells[coords.to_nd_index()]
    }

    /// Rows from top to bottom, each from left to right.
    pub fn iter_rows(&self) -> impl Iterator<Item = ArrayView1<'_, CellFrame>> {
        self.cells.outer_iter()
    }
}

/// Implemented by front ends; called once per frame with a fresh snapshot.
pub trait Renderer {
    fn draw(&mut self, view: &BoardView);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: Coord, columns: Coord, mines: &[Coord2]) -> GameSession {
        GameSession::from_grid(Grid::from_mine_coords(rows, columns, mines).unwrap(), 0)
    }

    #[test]
    fn playing_shows_only_uncovered_cells() {
        // a wall of mines in column 2 keeps the flood from (0, 0) on the left
        let mut session = session(3, 4, &[(2, 0), (2, 1), (2, 2)]);
        session.toggle_flag((2, 1));
        session.reveal((0, 0));
        let view = BoardView::snapshot(&session, Some((1, 1)), Instant::now());

        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.cell_at((0, 0)).view, CellView::Numbered(0));
        assert_eq!(view.cell_at((1, 1)).view, CellView::Numbered(3));
        assert_eq!(view.cell_at((2, 0)).view, CellView::Blank);
        assert_eq!(view.cell_at((2, 1)).view, CellView::Flagged);
        assert_eq!(view.cell_at((3, 1)).view, CellView::Blank);
        assert!(view.cell_at((1, 1)).highlighted);
        assert!(!view.cell_at((0, 0)).highlighted);
        assert_eq!(view.mines_left, 2);
        assert_eq!(view.revealed_count, 6);
        assert_eq!(view.size(), (4, 3));
    }

    #[test]
    fn lost_exposes_every_mine() {
        let mut session = session(2, 3, &[(0, 0), (2, 1)]);
        session.toggle_flag((2, 0));
        session.reveal((1, 1));
        session.reveal((0, 0));
        let view = BoardView::snapshot(&session, Some((1, 0)), Instant::now());

        assert_eq!(view.phase, Phase::Lost);
        assert_eq!(view.triggered_mine, Some((0, 0)));
        assert_eq!(view.cell_at((0, 0)).view, CellView::Mine);
        assert_eq!(view.cell_at((2, 1)).view, CellView::Mine);
        assert_eq!(view.cell_at((2, 0)).view, CellView::Flagged);
        assert_eq!(view.cell_at((1, 1)).view, CellView::Numbered(2));
        assert_eq!(view.cell_at((1, 0)).view, CellView::Blank);
        assert!(view.cells.iter().all(|cell| !cell.highlighted));
    }

    #[test]
    fn won_shows_numbers_flags_and_mines() {
        let mut session = session(1, 3, &[(0, 0), (2, 0)]);
        session.toggle_flag((0, 0));
        assert_eq!(session.reveal((1, 0)), RevealOutcome::Won);
        let view = BoardView::snapshot(&session, None, Instant::now());

        assert_eq!(view.cell_at((0, 0)).view, CellView::Flagged);
        assert_eq!(view.cell_at((1, 0)).view, CellView::Numbered(2));
        assert_eq!(view.cell_at((2, 0)).view, CellView::Mine);
    }

    #[test]
    fn checkerboard_parity_and_row_order() {
        let view = BoardView::snapshot(&session(2, 3, &[]), None, Instant::now());
        let rows: Vec<Vec<bool>> = view
            .iter_rows()
            .map(|row| row.iter().map(|cell| cell.even).collect())
            .collect();

        assert_eq!(rows, vec![vec![true, false, true], vec![false, true, false]]);
    }
}
