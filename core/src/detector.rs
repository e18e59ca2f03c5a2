use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Shortest run that counts as a match.
pub const MIN_RUN: usize = 3;

/// Maximal run of one token kind along a single row or column, at least
/// [`MIN_RUN`] cells long. Cells are ordered by increasing coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub token: Token,
    pub axis: Axis,
    pub cells: SmallVec<[Coord2; 5]>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Reports every run of [`MIN_RUN`] or more on both axes. A walk only starts
/// at the first cell of a run, so each run is reported exactly once.
pub fn find_runs(board: &Board) -> Vec<MatchGroup> {
    let size = board.size();
    let mut groups = Vec::new();

    for origin in board.coords() {
        let Some(token) = board[origin] else {
            continue;
        };

        for axis in Axis::ALL {
            let continues_run = apply_delta(origin, axis.backwards(), size)
                .is_some_and(|prev| board[prev] == Some(token));
            if continues_run {
                continue;
            }

            let mut cells: SmallVec<[Coord2; 5]> = smallvec![origin];
            cells.extend(
                board
                    .neighbors_in_direction(origin, axis.delta())
                    .take_while(|&coords| board[coords] == Some(token)),
            );

            if cells.len() >= MIN_RUN {
                groups.push(MatchGroup { token, axis, cells });
            }
        }
    }

    groups
}

/// Deduplicated union of all cells in the given runs.
pub fn merge_groups(groups: &[MatchGroup]) -> BTreeSet<Coord2> {
    groups
        .iter()
        .flat_map(|group| group.cells.iter().copied())
        .collect()
}

/// Every cell that is part of a run of [`MIN_RUN`] or more, on either axis.
pub fn detect_matches(board: &Board) -> BTreeSet<Coord2> {
    merge_groups(&find_runs(board))
}

/// Whether the board has no run of [`MIN_RUN`] or more anywhere.
pub fn is_stable(board: &Board) -> bool {
    find_runs(board).is_empty()
}

/// Length of the same-token run through `coords` along `axis`, counting the
/// cell itself. Empty cells have no run.
pub fn run_length_at(board: &Board, coords: Coord2, axis: Axis) -> usize {
    let Some(token) = board[coords] else {
        return 0;
    };

    let same = |&cell: &Coord2| board[cell] == Some(token);
    let forward = board
        .neighbors_in_direction(coords, axis.delta())
        .take_while(same)
        .count();
    let backward = board
        .neighbors_in_direction(coords, axis.backwards())
        .take_while(same)
        .count();

    1 + forward + backward
}

/// Whether `coords` is part of a match on either axis.
pub fn forms_match_at(board: &Board, coords: Coord2) -> bool {
    Axis::ALL
        .into_iter()
        .any(|axis| run_length_at(board, coords, axis) >= MIN_RUN)
}
