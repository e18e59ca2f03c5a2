use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Source of fresh token kinds for generation and refills.
pub trait TokenSource {
    /// Returns a token kind in `[0, type_count)`.
    fn next_token(&mut self, type_count: u8) -> Token;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self, type_count: u8) -> Token {
        (**self).next_token(type_count)
    }
}

/// Pseudo-random tokens from a seeded [`rand::rngs::SmallRng`].
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: rand::rngs::SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TokenSource for SeededSource {
    fn next_token(&mut self, type_count: u8) -> Token {
        use rand::prelude::*;

        assert!(type_count > 0, "cannot draw from zero token types");
        Token(self.rng.random_range(0..type_count))
    }
}

/// Replays a fixed script of token kinds, wrapping around at the end. Values
/// are reduced modulo the requested type count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedSource {
    script: Vec<u8>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        let script = script.into();
        assert!(!script.is_empty(), "token script must not be empty");
        Self { script, cursor: 0 }
    }

    /// Number of tokens handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TokenSource for ScriptedSource {
    fn next_token(&mut self, type_count: u8) -> Token {
        assert!(type_count > 0, "cannot draw from zero token types");
        let kind = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        Token(kind % type_count)
    }
}

/// A freshly spawned token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refill {
    pub cell: Coord2,
    pub token: Token,
}

/// Draws a new token for each of `empty_cells`, in the given order.
///
/// # Panics
///
/// When a target cell is outside the board or already holds a token.
pub fn refill<S: TokenSource + ?Sized>(
    board: &mut Board,
    empty_cells: &[Coord2],
    source: &mut S,
    type_count: u8,
) -> Vec<Refill> {
    let refills: Vec<Refill> = empty_cells
        .iter()
        .map(|&cell| {
            assert!(
                board.contains(cell) && board[cell].is_none(),
                "refill target {cell:?} is not an empty cell"
            );
            let token = source.next_token(type_count);
            assert!(
                token.0 < type_count,
                "token source returned {token:?} for {type_count} types"
            );
            board[cell] = Some(token);
            Refill { cell, token }
        })
        .collect();

    assert!(
        refills.iter().all(|refill| board[refill.cell].is_some()),
        "refill left an empty cell"
    );
    refills
}

/// Refills every empty cell of the board, bottom row first.
pub fn refill_all<S: TokenSource + ?Sized>(
    board: &mut Board,
    source: &mut S,
    type_count: u8,
) -> Vec<Refill> {
    let empty_cells = board.empty_cells();
    let refills = refill(board, &empty_cells, source, type_count);
    assert!(board.is_full(), "board still has empty cells after refill");
    refills
}
