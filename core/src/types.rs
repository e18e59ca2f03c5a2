use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for cleared-cell tallies and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, row `y = 0` is the bottom of the board.
pub type Coord2 = (Coord, Coord);

/// Opaque token type, always in `[0, type_count)` for the board holding it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub u8);

impl Token {
    pub const fn kind(self) -> u8 {
        self.0
    }
}

impl From<u8> for Token {
    fn from(kind: u8) -> Self {
        Self(kind)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn manhattan_distance(a: Coord2, b: Coord2) -> CellCount {
    a.0.abs_diff(b.0) as CellCount + a.1.abs_diff(b.1) as CellCount
}

/// Two cells are adjacent when they share an edge.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    manhattan_distance(a, b) == 1
}

/// Line direction a run is read along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Step towards increasing coordinates along this axis.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
        }
    }

    pub const fn backwards(self) -> (isize, isize) {
        let (dx, dy) = self.delta();
        (-dx, -dy)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

pub trait RayIterExt {
    fn iter_ray(&self, start: Coord2, delta: (isize, isize)) -> RayIter;
}

impl<T> RayIterExt for Array2<T> {
    fn iter_ray(&self, start: Coord2, delta: (isize, isize)) -> RayIter {
        let (width, height) = self.dim();
        let bounds = (
            Coord::try_from(width).unwrap_or(Coord::MAX),
            Coord::try_from(height).unwrap_or(Coord::MAX),
        );
        RayIter::new(start, delta, bounds)
    }
}

/// Cells reached by repeatedly stepping `delta` away from a start cell, which
/// itself is not yielded. Ends at the first step leaving the board.
#[derive(Clone, Debug)]
pub struct RayIter {
    current: Coord2,
    delta: (isize, isize),
    bounds: Coord2,
    done: bool,
}

impl RayIter {
    pub(crate) fn new(start: Coord2, delta: (isize, isize), bounds: Coord2) -> Self {
        Self {
            current: start,
            delta,
            bounds,
            done: delta == (0, 0),
        }
    }
}

impl Iterator for RayIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match apply_delta(self.current, self.delta, self.bounds) {
            Some(next) => {
                self.current = next;
                Some(next)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl core::iter::FusedIterator for RayIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn adjacency_requires_shared_edge() {
        assert!(is_adjacent((1, 1), (1, 2)));
        assert!(is_adjacent((1, 1), (0, 1)));
        assert!(!is_adjacent((1, 1), (1, 1)));
        assert!(!is_adjacent((1, 1), (2, 2)));
        assert!(!is_adjacent((0, 0), (0, 2)));
    }

    #[test]
    fn ray_stops_at_board_edge() {
        let cells: Array2<u8> = Array2::default([4, 3]);

        let right: Vec<_> = cells.iter_ray((1, 0), (1, 0)).collect();
        let down: Vec<_> = cells.iter_ray((2, 2), (0, -1)).collect();

        assert_eq!(right, [(2, 0), (3, 0)]);
        assert_eq!(down, [(2, 1), (2, 0)]);
        assert_eq!(cells.iter_ray((3, 2), (1, 1)).count(), 0);
    }

    #[test]
    fn ray_is_restartable_by_clone() {
        let cells: Array2<u8> = Array2::default([5, 1]);
        let ray = cells.iter_ray((0, 0), (1, 0));

        assert_eq!(ray.clone().count(), 4);
        assert_eq!(ray.count(), 4);
    }

    #[test]
    fn zero_delta_yields_nothing() {
        let cells: Array2<u8> = Array2::default([2, 2]);
        assert_eq!(cells.iter_ray((0, 0), (0, 0)).count(), 0);
    }
}
