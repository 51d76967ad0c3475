use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// A finished session is never resumed, restarting builds a new one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss: the grid plus the counters and timestamps around it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    grid: Grid,
    phase: Phase,
    flag_count: CellCount,
    revealed_count: CellCount,
    seed: u64,
    started_at: Instant,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self::from_grid(Grid::from_config(config), seed)
    }

    /// Starts a session on an existing grid. If the grid already has its mines, the first reveal plants nothing.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            phase: Phase::Playing,
            flag_count: 0,
            revealed_count: 0,
            seed,
            started_at: Instant::now(),
            ended_at: None,
            triggered_mine: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.grid.mine_count()) - i32::from(self.flag_count)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Time played as seen at `now`. Frozen once the session is finished.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.ended_at
            .unwrap_or(now)
            .saturating_duration_since(self.started_at)
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.phase.is_playing() {
            return RevealOutcome::NoChange;
        }

        let cell = self.grid[coords];
        if cell.is_flagged() || cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        if !self.grid.mines_planted() {
            self.grid.plant_mines(coords, self.seed);
        }

        if self.grid.contains_mine(coords) {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end(Phase::Lost);
            return RevealOutcome::HitMine;
        }

        self.grid.reveal(coords);
        self.revealed_count += 1;

        let adjacent_mines = self.grid.adjacent_mine_count(coords);
        log::debug!("Open cell at {:?}, mine count: {}", coords, adjacent_mines);
        if adjacent_mines == 0 {
            self.revealed_count += self.grid.flood_reveal(coords);
        }

        if self.revealed_count == self.grid.safe_cell_count() {
            self.end(Phase::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.phase.is_playing() {
            return MarkOutcome::NoChange;
        }

        let outcome = self.grid.toggle_flag(coords);
        match outcome {
            MarkOutcome::Flagged => self.flag_count += 1,
            MarkOutcome::Unflagged => self.flag_count -= 1,
            MarkOutcome::NoChange => {}
        }
        outcome
    }

    fn end(&mut self, phase: Phase) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = phase;
        self.ended_at = Some(Instant::now());
        log::debug!(
            "Game ended {:?} after {:?}, revealed {} of {}",
            phase,
            self.elapsed(),
            self.revealed_count,
            self.grid.safe_cell_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: Coord, columns: Coord, mines: &[Coord2]) -> GameSession {
        GameSession::from_grid(Grid::from_mine_coords(rows, columns, mines).unwrap(), 0)
    }

    #[test]
    fn flood_from_corner_wins_three_by_three() {
        let mut session = session(3, 3, &[(2, 2)]);

        assert_eq!(session.grid().adjacent_mine_count((0, 0)), 0);
        assert_eq!(session.reveal((0, 0)), RevealOutcome::Won);
        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(session.revealed_count(), 8);
        assert!(!session.grid()[(2, 2)].is_revealed());
    }

    #[test]
    fn zero_mines_reveals_everything_at_once() {
        let config = GameConfig::new(5, 7, MineSpec::Count(0), 10).unwrap();
        let mut session = GameSession::new(&config, 3);

        assert_eq!(session.reveal((3, 2)), RevealOutcome::Won);
        assert_eq!(session.revealed_count(), 35);
    }

    #[test]
    fn single_cell_wins_on_first_reveal() {
        let config = GameConfig::new(1, 1, MineSpec::Count(0), 10).unwrap();
        let mut session = GameSession::new(&config, 0);

        assert_eq!(session.reveal((0, 0)), RevealOutcome::Won);
        assert_eq!(session.phase(), Phase::Won);
    }

    #[test]
    fn first_reveal_plants_around_click() {
        let config = GameConfig::new(9, 9, MineSpec::Count(10), 10).unwrap();
        for seed in 0..20 {
            let mut session = GameSession::new(&config, seed);
            assert!(!session.grid().mines_planted());

            let outcome = session.reveal((4, 4));

            assert!(session.grid().mines_planted());
            assert_ne!(outcome, RevealOutcome::HitMine);
            assert_eq!(session.grid().adjacent_mine_count((4, 4)), 0);
            assert!(session.revealed_count() >= 9);
        }
    }

    #[test]
    fn hitting_mine_loses_and_freezes_time() {
        let mut session = session(3, 3, &[(2, 2)]);

        assert_eq!(session.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(session.reveal((2, 2)), RevealOutcome::HitMine);
        assert_eq!(session.phase(), Phase::Lost);
        assert_eq!(session.triggered_mine(), Some((2, 2)));

        let now = Instant::now();
        let frozen = session.elapsed_at(now);
        assert_eq!(session.elapsed_at(now + Duration::from_secs(60)), frozen);
        assert_eq!(session.elapsed_at(now + Duration::from_secs(3600)), frozen);
    }

    #[test]
    fn elapsed_runs_while_playing() {
        let session = session(2, 2, &[(0, 0)]);
        let now = Instant::now();

        assert!(session.elapsed_at(now + Duration::from_secs(5)) >= Duration::from_secs(5));
    }

    #[test]
    fn finished_session_ignores_moves() {
        let mut session = session(2, 2, &[(0, 0)]);
        session.reveal((0, 0));

        assert_eq!(session.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((1, 1)), MarkOutcome::NoChange);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.phase(), Phase::Lost);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut session = session(2, 2, &[(0, 0)]);

        assert_eq!(session.toggle_flag((0, 0)), MarkOutcome::Flagged);
        assert_eq!(session.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn revealed_cell_is_noop() {
        let mut session = session(2, 3, &[(0, 0)]);

        assert_eq!(session.reveal((2, 1)), RevealOutcome::Revealed);
        let count = session.revealed_count();
        assert_eq!(session.reveal((2, 1)), RevealOutcome::NoChange);
        assert_eq!(session.revealed_count(), count);
    }

    #[test]
    fn flag_toggle_twice_restores_count() {
        let mut session = session(3, 3, &[(0, 0)]);

        assert_eq!(session.toggle_flag((2, 2)), MarkOutcome::Flagged);
        assert_eq!(session.flag_count(), 1);
        assert_eq!(session.mines_left(), 0);
        assert_eq!(session.toggle_flag((2, 2)), MarkOutcome::Unflagged);
        assert_eq!(session.flag_count(), 0);
        assert!(!session.grid()[(2, 2)].is_flagged());
    }

    #[test]
    fn over_flagging_goes_negative() {
        let mut session = session(3, 3, &[(0, 0)]);
        session.toggle_flag((1, 1));
        session.toggle_flag((2, 2));

        assert_eq!(session.mines_left(), -1);
    }

    #[test]
    fn flag_on_revealed_is_noop() {
        let mut session = session(2, 3, &[(0, 0)]);
        session.reveal((2, 1));

        assert_eq!(session.toggle_flag((2, 1)), MarkOutcome::NoChange);
        assert_eq!(session.flag_count(), 0);
    }

    #[test]
    fn flagged_safe_cell_blocks_win_until_revealed() {
        let mut session = session(1, 4, &[(3, 0)]);
        session.toggle_flag((1, 0));

        assert_eq!(session.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(session.revealed_count(), 1);
        assert!(session.grid()[(1, 0)].is_flagged());

        session.toggle_flag((1, 0));
        assert_eq!(session.reveal((1, 0)), RevealOutcome::Won);
        assert_eq!(session.revealed_count(), 3);
    }
}
