#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use detector::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use gravity::*;
pub use refill::*;
pub use selection::*;
pub use types::*;

mod analysis;
mod board;
mod detector;
mod engine;
mod error;
mod generator;
mod gravity;
mod refill;
mod selection;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub type_count: u8,
    /// Revert swaps that do not produce a match instead of keeping them.
    pub require_match_on_swap: bool,
    pub layout_policy: LayoutPolicy,
    /// Most cascade steps resolved for a single swap.
    pub cascade_limit: u16,
}

impl GameConfig {
    pub const MIN_TYPE_COUNT: u8 = 3;
    pub const DEFAULT_CASCADE_LIMIT: u16 = 256;

    pub const fn new(size: Coord2, type_count: u8) -> Self {
        Self {
            size,
            type_count,
            require_match_on_swap: true,
            layout_policy: LayoutPolicy::RerollMatches,
            cascade_limit: Self::DEFAULT_CASCADE_LIMIT,
        }
    }

    pub const fn with_require_match_on_swap(mut self, require_match_on_swap: bool) -> Self {
        self.require_match_on_swap = require_match_on_swap;
        self
    }

    pub const fn with_layout_policy(mut self, layout_policy: LayoutPolicy) -> Self {
        self.layout_policy = layout_policy;
        self
    }

    pub const fn with_cascade_limit(mut self, cascade_limit: u16) -> Self {
        self.cascade_limit = cascade_limit;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 || self.type_count < Self::MIN_TYPE_COUNT {
            Err(GameError::InvalidDimensions)
        } else {
            Ok(())
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new((8, 8), 5)
    }
}
