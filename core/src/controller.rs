use core::time::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::Instant;

use crate::*;

/// Owns the current session and the configuration it was built from. Every player action goes through here.
///
/// Restarting never resets the session in place: a complete new session is built first and then swapped in.
#[derive(Clone, Debug)]
pub struct GameController {
    config: GameConfig,
    session: GameSession,
    seeds: SmallRng,
}

impl GameController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let session = GameSession::new(&config, seeds.random());
        Self {
            config,
            session,
            seeds,
        }
    }

    /// Starts on a prepared grid; later restarts generate random grids of the same size and mine count.
    pub fn from_grid(grid: Grid, cell_size: u16, seed: u64) -> Result<Self> {
        let config = GameConfig::new(
            grid.rows(),
            grid.columns(),
            MineSpec::Count(grid.mine_count()),
            cell_size,
        )?;
        let mut seeds = SmallRng::seed_from_u64(seed);
        let session = GameSession::from_grid(grid, seeds.random());
        Ok(Self {
            config,
            session,
            seeds,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn handle_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.session.reveal(coords);
        log::debug!("reveal {:?}: {:?}", coords, outcome);
        outcome
    }

    pub fn handle_flag_toggle(&mut self, coords: Coord2) -> MarkOutcome {
        let outcome = self.session.toggle_flag(coords);
        log::debug!("toggle flag {:?}: {:?}", coords, outcome);
        outcome
    }

    pub fn handle_restart(&mut self) {
        let next = GameSession::new(&self.config, self.seeds.random());
        log::debug!(
            "Restarting {:?} game, new seed: {}",
            self.session.phase(),
            next.seed()
        );
        self.session = next;
    }

    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.session.elapsed_at(now)
    }

    /// Applies one action from the input side. Coordinates are checked here so a bad front end gets an error
    /// instead of a panic.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome> {
        let grid = self.session.grid();
        Ok(match action {
            Action::Reveal(coords) => {
                let coords = grid.validate_coords(coords)?;
                ActionOutcome::Reveal(self.handle_reveal(coords))
            }
            Action::ToggleFlag(coords) => {
                let coords = grid.validate_coords(coords)?;
                ActionOutcome::Mark(self.handle_flag_toggle(coords))
            }
            Action::Restart => {
                self.handle_restart();
                ActionOutcome::Restarted
            }
        })
    }

    pub fn board_view(&self, pointer: Option<Coord2>) -> BoardView {
        BoardView::snapshot(&self.session, pointer, Instant::now())
    }

    pub fn render(&self, renderer: &mut impl Renderer, pointer: Option<Coord2>) {
        renderer.draw(&self.board_view(pointer));
    }
}
