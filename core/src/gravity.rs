use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// A token sliding down within its column during compaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallMove {
    pub column: Coord,
    pub from_row: Coord,
    pub to_row: Coord,
}

impl FallMove {
    pub const fn distance(&self) -> Coord {
        self.from_row - self.to_row
    }
}

/// Slides every token towards row 0 within its column, keeping the order of
/// the survivors, so all empty slots end up at the top of each column.
pub fn compact(board: &mut Board) -> Vec<FallMove> {
    let (width, height) = board.size();
    let mut moves = Vec::new();

    for x in 0..width {
        let mut write_row = 0;
        for y in 0..height {
            let Some(token) = board[(x, y)] else {
                continue;
            };
            if y != write_row {
                board[(x, write_row)] = Some(token);
                board[(x, y)] = None;
                moves.push(FallMove {
                    column: x,
                    from_row: y,
                    to_row: write_row,
                });
            }
            write_row += 1;
        }

        debug_assert!(
            (write_row..height).all(|y| board[(x, y)].is_none()),
            "column {x} has a token above a gap after compaction"
        );
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survivors_keep_their_order() {
        let mut board = Board::from_rows(&[[1u8], [0], [2], [0], [3]]).unwrap();
        board[(0, 1)] = None;
        board[(0, 3)] = None;

        let moves = compact(&mut board);

        assert_eq!(board[(0, 0)], Some(Token(1)));
        assert_eq!(board[(0, 1)], Some(Token(2)));
        assert_eq!(board[(0, 2)], Some(Token(3)));
        assert_eq!(board[(0, 3)], None);
        assert_eq!(board[(0, 4)], None);
        assert_eq!(
            moves,
            [
                FallMove { column: 0, from_row: 2, to_row: 1 },
                FallMove { column: 0, from_row: 4, to_row: 2 },
            ]
        );
        assert_eq!(moves[1].distance(), 2);
    }

    #[test]
    fn columns_are_compacted_independently() {
        let mut board = Board::from_rows(&[[0u8, 1, 2], [1, 2, 0], [2, 0, 1]]).unwrap();
        board[(0, 0)] = None;
        board[(2, 1)] = None;
        board[(2, 2)] = None;

        let moves = compact(&mut board);

        assert_eq!(moves.len(), 2);
        assert_eq!(board.empty_cells(), [(2, 1), (0, 2), (2, 2)]);
        assert_eq!(board[(0, 0)], Some(Token(1)));
        assert_eq!(board[(0, 1)], Some(Token(2)));
        assert_eq!(board[(1, 2)], Some(Token(0)));
        assert_eq!(board[(2, 0)], Some(Token(2)));
    }

    #[test]
    fn full_or_top_cleared_columns_do_not_move() {
        let mut board = Board::from_rows(&[[0u8, 1], [1, 0], [0, 1]]).unwrap();
        board[(1, 2)] = None;

        assert!(compact(&mut board).is_empty());
        assert_eq!(board.empty_cells(), [(1, 2)]);
    }

    #[test]
    fn no_gap_below_a_token_after_compaction() {
        let mut board = Board::from_rows(&[[0u8, 1, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [3, 0, 1, 2]])
            .unwrap();
        for coords in [(0, 0), (0, 2), (1, 1), (2, 0), (2, 1), (2, 2), (3, 3)] {
            board[coords] = None;
        }

        compact(&mut board);

        for x in 0..4 {
            let filled = (0..4).take_while(|&y| board[(x, y)].is_some()).count() as Coord;
            assert!((filled..4).all(|y| board[(x, y)].is_none()), "column {x}: {board}");
        }
    }
}
