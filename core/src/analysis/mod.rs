pub use moves::*;

mod moves;
