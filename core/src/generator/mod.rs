use crate::*;
use serde::{Deserialize, Serialize};

pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: &GameConfig) -> Result<Board>;
}

/// How the opening layout treats runs that happen to come out of the draw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutPolicy {
    /// Keep whatever was drawn; the first swap also resolves existing runs.
    AcceptAsIs,
    /// Redraw so that the opening layout is stable.
    #[default]
    RerollMatches,
}
