use alloc::vec::Vec;

use crate::*;

/// Every adjacent pair whose swap would leave a match on the board, each pair
/// listed once with the lower or left cell first.
///
/// On a board that already holds a run every swap qualifies, since detection
/// after the swap would find that run.
pub fn find_valid_swaps(board: &Board) -> Vec<(Coord2, Coord2)> {
    let size = board.size();
    let already_matched = !is_stable(board);
    let mut scratch = board.clone();
    let mut swaps = Vec::new();

    for coords in board.coords() {
        for axis in Axis::ALL {
            let Some(other) = apply_delta(coords, axis.delta(), size) else {
                continue;
            };
            if already_matched || swap_makes_match(&mut scratch, coords, other) {
                swaps.push((coords, other));
            }
        }
    }

    swaps
}

pub fn has_valid_move(board: &Board) -> bool {
    if !is_stable(board) {
        return true;
    }

    let size = board.size();
    let mut scratch = board.clone();
    board.coords().any(|coords| {
        Axis::ALL.into_iter().any(|axis| {
            apply_delta(coords, axis.delta(), size)
                .is_some_and(|other| swap_makes_match(&mut scratch, coords, other))
        })
    })
}

/// Only the two swapped cells can start a new run on a stable board.
fn swap_makes_match(scratch: &mut Board, a: Coord2, b: Coord2) -> bool {
    if scratch[a] == scratch[b] {
        return false;
    }

    let (first, second) = (scratch[a], scratch[b]);
    scratch[a] = second;
    scratch[b] = first;
    let found = forms_match_at(scratch, a) || forms_match_at(scratch, b);
    scratch[a] = first;
    scratch[b] = second;
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u8]]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn finds_the_swap_that_completes_a_row() {
        let board = board(&[&[0, 1, 0], &[1, 0, 2], &[2, 3, 1]]);

        let swaps = find_valid_swaps(&board);

        assert!(swaps.contains(&((1, 0), (1, 1))));
        assert!(!swaps.contains(&((0, 2), (1, 2))));
        assert!(has_valid_move(&board));
    }

    #[test]
    fn every_reported_swap_produces_a_match() {
        let board = board(&[&[0, 1, 2, 0], &[1, 2, 0, 1], &[1, 0, 1, 2], &[2, 1, 2, 0]]);

        for (a, b) in find_valid_swaps(&board) {
            let mut swapped = board.clone();
            swapped.swap(a, b).unwrap();
            assert!(!is_stable(&swapped), "{a:?} <-> {b:?}");
        }
    }

    #[test]
    fn dead_board_has_no_moves() {
        let board = board(&[&[0, 1], &[1, 0]]);

        assert!(find_valid_swaps(&board).is_empty());
        assert!(!has_valid_move(&board));
    }

    #[test]
    fn scratch_swap_leaves_the_board_intact() {
        let original = board(&[&[0, 1, 0], &[1, 0, 2], &[2, 3, 1]]);
        let mut scratch = original.clone();

        assert!(swap_makes_match(&mut scratch, (1, 0), (1, 1)));
        assert_eq!(scratch, original);
    }

    #[test]
    fn unstable_board_accepts_any_adjacent_swap() {
        let board = board(&[&[1, 1, 1], &[0, 2, 0]]);

        assert_eq!(find_valid_swaps(&board).len(), 7);
        assert!(has_valid_move(&board));
    }
}
