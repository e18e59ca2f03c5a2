use serde::{Deserialize, Serialize};

use crate::*;

/// Result of picking a cell with a [`SwapSelector`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing was held, the cell is now held.
    Selected(Coord2),
    /// The held cell was picked again and released.
    Deselected,
    /// A non-adjacent cell replaced the held one.
    Reselected(Coord2),
    /// An adjacent cell was picked; the pair is ready for
    /// [`CascadeEngine::request_swap`] and nothing is held anymore.
    SwapReady(Coord2, Coord2),
}

/// Two-pick swap input: pick a cell, then pick a neighbor to swap with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSelector {
    held: Option<Coord2>,
}

impl SwapSelector {
    pub const fn new() -> Self {
        Self { held: None }
    }

    pub const fn held(&self) -> Option<Coord2> {
        self.held
    }

    pub fn clear(&mut self) {
        self.held = None;
    }

    pub fn select(&mut self, board: &Board, coords: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let coords = board.validate_coords(coords)?;

        Ok(match self.held.take() {
            None => {
                self.held = Some(coords);
                Selected(coords)
            }
            Some(held) if held == coords => Deselected,
            Some(held) if board.is_adjacent(held, coords) => SwapReady(held, coords),
            Some(_) => {
                self.held = Some(coords);
                Reselected(coords)
            }
        })
    }
}
