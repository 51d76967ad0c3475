//! Input contract: turns raw pointer and key state coming from a front end into discrete [`Action`]s.
//!
//! Actions fire on release edges only, once per press-release cycle, so holding a button never repeats a move.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single player move, applied atomically by [`GameController::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Restart,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PointerButtons: u8 {
        const PRIMARY   = 1;
        const SECONDARY = 1 << 1;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// Maps pixel positions on the board onto cell coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerMapper {
    cell_size: u16,
    size: Coord2,
}

impl PointerMapper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cell_size: config.cell_size(),
            size: config.size(),
        }
    }

    /// Cell under the pixel `(px, py)`, measured from the board's top-left corner, or `None` off the board.
    pub fn cell_at(&self, px: i32, py: i32) -> Option<Coord2> {
        if px < 0 || py < 0 {
            return None;
        }
        let cell_size = i32::from(self.cell_size);
        let x = Coord::try_from(px / cell_size).ok()?;
        let y = Coord::try_from(py / cell_size).ok()?;

        (x < self.size.0 && y < self.size.1).then_some((x, y))
    }

    /// Board size in pixels, `(width, height)`.
    pub fn board_pixels(&self) -> (u32, u32) {
        let cell_size = u32::from(self.cell_size);
        (
            u32::from(self.size.0) * cell_size,
            u32::from(self.size.1) * cell_size,
        )
    }
}

/// Release-edge detector for pointer buttons and the restart key.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputTracker {
    pressed: PointerButtons,
    restart_held: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> PointerButtons {
        self.pressed
    }

    /// Feeds the current button state with the cell under the pointer.
    ///
    /// Releasing the primary button alone reveals, releasing the secondary alone toggles a flag. A release off
    /// the board, or of both buttons at once, produces nothing.
    pub fn pointer(&mut self, cell: Option<Coord2>, buttons: PointerButtons) -> Option<Action> {
        let released = self.pressed.difference(buttons);
        self.pressed = buttons;

        if released.is_empty() {
            return None;
        }
        log::trace!("released {:?} over {:?}", released, cell);

        let coords = cell?;
        if released == PointerButtons::PRIMARY {
            Some(Action::Reveal(coords))
        } else if released == PointerButtons::SECONDARY {
            Some(Action::ToggleFlag(coords))
        } else {
            None
        }
    }

    /// Forgets any held buttons, e.g. when the pointer leaves the board.
    pub fn leave(&mut self) {
        self.pressed = PointerButtons::empty();
    }

    pub fn restart_key(&mut self, down: bool) -> Option<Action> {
        let released = self.restart_held && !down;
        self.restart_held = down;
        released.then_some(Action::Restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> PointerMapper {
        PointerMapper::new(&GameConfig::new(3, 4, MineSpec::Count(1), 10).unwrap())
    }

    #[test]
    fn maps_pixels_to_cells() {
        let mapper = mapper();

        assert_eq!(mapper.cell_at(0, 0), Some((0, 0)));
        assert_eq!(mapper.cell_at(9, 9), Some((0, 0)));
        assert_eq!(mapper.cell_at(10, 0), Some((1, 0)));
        assert_eq!(mapper.cell_at(39, 29), Some((3, 2)));
        assert_eq!(mapper.board_pixels(), (40, 30));
    }

    #[test]
    fn off_board_pixels_map_to_nothing() {
        let mapper = mapper();

        assert_eq!(mapper.cell_at(-1, 5), None);
        assert_eq!(mapper.cell_at(5, -1), None);
        assert_eq!(mapper.cell_at(40, 5), None);
        assert_eq!(mapper.cell_at(5, 30), None);
        assert_eq!(mapper.cell_at(i32::MAX, 5), None);
    }

    #[test]
    fn fires_once_per_press_release() {
        let mut tracker = InputTracker::new();

        assert_eq!(tracker.pointer(Some((1, 1)), PointerButtons::PRIMARY), None);
        assert_eq!(tracker.pointer(Some((1, 1)), PointerButtons::PRIMARY), None);
        assert_eq!(
            tracker.pointer(Some((1, 1)), PointerButtons::empty()),
            Some(Action::Reveal((1, 1)))
        );
        assert_eq!(tracker.pointer(Some((1, 1)), PointerButtons::empty()), None);
    }

    #[test]
    fn secondary_release_toggles_flag() {
        let mut tracker = InputTracker::new();

        tracker.pointer(Some((2, 0)), PointerButtons::SECONDARY);
        assert_eq!(
            tracker.pointer(Some((2, 0)), PointerButtons::empty()),
            Some(Action::ToggleFlag((2, 0)))
        );
    }

    #[test]
    fn release_fires_on_cell_under_pointer() {
        let mut tracker = InputTracker::new();

        tracker.pointer(Some((0, 0)), PointerButtons::PRIMARY);
        tracker.pointer(Some((1, 0)), PointerButtons::PRIMARY);
        assert_eq!(
            tracker.pointer(Some((2, 0)), PointerButtons::empty()),
            Some(Action::Reveal((2, 0)))
        );
    }

    #[test]
    fn release_off_board_or_after_leave_does_nothing() {
        let mut tracker = InputTracker::new();

        tracker.pointer(Some((0, 0)), PointerButtons::PRIMARY);
        assert_eq!(tracker.pointer(None, PointerButtons::empty()), None);

        tracker.pointer(Some((0, 0)), PointerButtons::PRIMARY);
        tracker.leave();
        assert_eq!(tracker.pointer(Some((0, 0)), PointerButtons::empty()), None);
    }

    #[test]
    fn releasing_both_buttons_does_nothing() {
        let mut tracker = InputTracker::new();

        tracker.pointer(Some((0, 0)), PointerButtons::all());
        assert_eq!(tracker.pointer(Some((0, 0)), PointerButtons::empty()), None);
    }

    #[test]
    fn restart_fires_on_key_release() {
        let mut tracker = InputTracker::new();

        assert_eq!(tracker.restart_key(true), None);
        assert_eq!(tracker.restart_key(true), None);
        assert_eq!(tracker.restart_key(false), Some(Action::Restart));
        assert_eq!(tracker.restart_key(false), None);
    }
}
