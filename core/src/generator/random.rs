use smallvec::SmallVec;

use super::*;

/// Fills the board cell by cell from a [`TokenSource`], bottom row first.
#[derive(Debug)]
pub struct RandomLayoutGenerator<S> {
    source: S,
    policy: LayoutPolicy,
}

impl<S: TokenSource> RandomLayoutGenerator<S> {
    pub fn new(source: S, policy: LayoutPolicy) -> Self {
        Self { source, policy }
    }
}

impl<S: TokenSource> LayoutGenerator for RandomLayoutGenerator<S> {
    fn generate(mut self, config: &GameConfig) -> Result<Board> {
        use LayoutPolicy::*;

        let mut board = Board::empty(config.size)?;
        let type_count = config.type_count;

        for coords in board.coords() {
            let token = match self.policy {
                AcceptAsIs => self.source.next_token(type_count),
                RerollMatches => {
                    let allowed = allowed_tokens(&board, coords, type_count);
                    if allowed.is_empty() {
                        log::warn!("No token avoids a run at {coords:?}, drawing freely");
                        self.source.next_token(type_count)
                    } else {
                        let pick = self.source.next_token(allowed.len() as u8);
                        allowed[usize::from(pick.0)]
                    }
                }
            };
            board[coords] = Some(token);
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Generated {}x{} layout, {} cells already matched",
                config.size.0,
                config.size.1,
                detect_matches(&board).len()
            );
        }
        Ok(board)
    }
}

/// Token kinds that would not complete a run with the two cells to the left or
/// the two cells below, which are the only ones filled so far.
fn allowed_tokens(board: &Board, coords: Coord2, type_count: u8) -> SmallVec<[Token; 8]> {
    let (x, y) = coords;
    let pair = |a: Coord2, b: Coord2| match (board[a], board[b]) {
        (Some(first), Some(second)) if first == second => Some(first),
        _ => None,
    };
    let left = (x >= 2).then(|| pair((x - 1, y), (x - 2, y))).flatten();
    let below = (y >= 2).then(|| pair((x, y - 1), (x, y - 2))).flatten();

    (0..type_count)
        .map(Token)
        .filter(|&token| Some(token) != left && Some(token) != below)
        .collect()
}
