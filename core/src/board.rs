use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of token slots. A slot is only empty between the clearing
/// and refilling phases of a cascade step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "Array2<Option<Token>>",
    try_from = "Array2<Option<Token>>"
)]
pub struct Board {
    cells: Array2<Option<Token>>,
}

impl Board {
    /// Board of the given size with every slot empty.
    pub fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    /// Builds a full board from token kinds, rows listed bottom to top.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let width = Coord::try_from(width).map_err(|_| GameError::InvalidDimensions)?;
        let height = Coord::try_from(rows.len()).map_err(|_| GameError::InvalidDimensions)?;
        let mut board = Self::empty((width, height))?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != usize::from(width) {
                return Err(GameError::InvalidBoardShape);
            }
            for (x, &kind) in row.iter().enumerate() {
                board.cells[[x, y]] = Some(Token(kind));
            }
        }

        Ok(board)
    }

    /// Wraps existing slots, rejecting grids that are empty or wider or taller
    /// than `Coord` can address.
    pub fn from_cells(cells: Array2<Option<Token>>) -> Result<Self> {
        let (width, height) = cells.dim();
        let fits = |len: usize| len > 0 && Coord::try_from(len).is_ok();
        if !fits(width) || !fits(height) {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        // every constructor checks the dimensions against `Coord`
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Option<Token>> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn set(&mut self, coords: Coord2, token: Option<Token>) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords] = token;
        Ok(())
    }

    pub fn is_adjacent(&self, a: Coord2, b: Coord2) -> bool {
        is_adjacent(a, b)
    }

    /// Cells stepping away from `coords` by `delta` until the edge of the board.
    pub fn neighbors_in_direction(&self, coords: Coord2, delta: (isize, isize)) -> RayIter {
        self.cells.iter_ray(coords, delta)
    }

    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let a = self.validate_coords(a)?;
        let b = self.validate_coords(b)?;
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
        Ok(())
    }

    /// Every coordinate in row-major order, bottom row first.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.coords().filter(|&coords| self[coords].is_none()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Checks that every token is a valid kind for `type_count` types.
    pub fn validate_tokens(&self, type_count: u8) -> Result<()> {
        if self.cells.iter().flatten().all(|token| token.0 < type_count) {
            Ok(())
        } else {
            Err(GameError::InvalidToken)
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Option<Token>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Array2<Option<Token>>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Option<Token>>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Array2<Option<Token>> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

/// Top row first, `.` for an empty slot.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in (0..height).rev() {
            for x in 0..width {
                let symbol = match self[(x, y)] {
                    Some(token) => char::from_digit(token.0.into(), 36).unwrap_or('?'),
                    None => '.',
                };
                write!(f, "{symbol}")?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
