//! Game-state engine for Minesweepa: the grid, lazy mine planting, flood-reveal, and the session state machine,
//! plus the contracts a front end uses to feed input in and draw the board.

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use input::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod cell;
mod config;
mod controller;
mod error;
mod generator;
mod grid;
mod input;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Result of [`GameController::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    Restarted,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
            Self::Restarted => true,
        }
    }
}
