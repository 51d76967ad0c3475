use serde::{Deserialize, Serialize};

/// What the player has done to a cell. Exactly one of these holds, so a cell can never be both flagged and
/// revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// A single grid cell: the player-visible cover plus whether a mine sits underneath.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub cover: Cover,
    pub mine: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.cover, Cover::Revealed)
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self.cover, Cover::Hidden | Cover::Flagged)
    }
}
