use alloc::vec;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the engine is in resolving a swap. Outside of
/// [`CascadeEngine::request_swap`] it is always [`Phase::Idle`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingSwap,
    ValidatingSwap,
    Reverting,
    Detecting,
    Clearing,
    Compacting,
    Refilling,
}

/// Observable diff of one clear, compact and refill pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// The swap that triggered the cascade, only set on its first step.
    pub swap: Option<(Coord2, Coord2)>,
    /// Runs found before clearing. Intersecting runs share cells.
    pub matches: Vec<MatchGroup>,
    /// Union of all matched cells, each listed once, bottom row first.
    pub cleared: Vec<Coord2>,
    pub falls: Vec<FallMove>,
    pub refills: Vec<Refill>,
    /// Set on the last step when `cascade_limit` cut the cascade short, which
    /// leaves runs on the board.
    pub truncated: bool,
}

impl CascadeStep {
    fn swap_only(a: Coord2, b: Coord2) -> Self {
        Self {
            swap: Some((a, b)),
            ..Default::default()
        }
    }

    /// Score contribution of this step.
    pub fn cleared_count(&self) -> CellCount {
        self.cleared.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn has_matches(&self) -> bool {
        !self.cleared.is_empty()
    }
}

/// Owns the board and resolves swaps into complete cascades.
#[derive(Clone, Debug)]
pub struct CascadeEngine<S> {
    config: GameConfig,
    board: Board,
    source: S,
    phase: Phase,
    total_cleared: Saturating<u32>,
    swaps_made: Saturating<u32>,
}

impl<S: TokenSource> CascadeEngine<S> {
    /// Creates an engine with a generated opening layout.
    pub fn new(config: GameConfig, mut source: S) -> Result<Self> {
        config.validate()?;
        let board =
            RandomLayoutGenerator::new(&mut source, config.layout_policy).generate(&config)?;
        Ok(Self::with_board(config, board, source))
    }

    /// Creates an engine around a caller-supplied layout, kept as-is.
    pub fn from_board(board: Board, config: GameConfig, source: S) -> Result<Self> {
        config.validate()?;
        if board.size() != config.size || !board.is_full() {
            return Err(GameError::InvalidBoardShape);
        }
        board.validate_tokens(config.type_count)?;
        Ok(Self::with_board(config, board, source))
    }

    fn with_board(config: GameConfig, board: Board, source: S) -> Self {
        Self {
            config,
            board,
            source,
            phase: Phase::default(),
            total_cleared: Saturating(0),
            swaps_made: Saturating(0),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn token_at(&self, coords: Coord2) -> Result<Option<Token>> {
        self.board.get(coords)
    }

    /// Cells cleared over the whole session.
    pub fn total_cleared(&self) -> u32 {
        self.total_cleared.0
    }

    /// Swaps that were kept on the board.
    pub fn swaps_made(&self) -> u32 {
        self.swaps_made.0
    }

    pub fn is_stable(&self) -> bool {
        is_stable(&self.board)
    }

    pub fn valid_swaps(&self) -> Vec<(Coord2, Coord2)> {
        find_valid_swaps(&self.board)
    }

    pub fn has_valid_move(&self) -> bool {
        has_valid_move(&self.board)
    }

    /// Swaps two adjacent cells and resolves the resulting cascade until the
    /// board is stable, returning one step per clear pass.
    ///
    /// Rejected requests leave the board untouched. A swap that produces no
    /// match is reverted with an empty step list, unless the configuration
    /// keeps such swaps, in which case it is reported as a lone step.
    ///
    /// The board is stable afterwards unless the cascade hit `cascade_limit`,
    /// which is flagged by [`CascadeStep::truncated`] on the last step.
    pub fn request_swap(&mut self, a: Coord2, b: Coord2) -> Result<Vec<CascadeStep>> {
        self.enter(Phase::AwaitingSwap);
        self.enter(Phase::ValidatingSwap);
        if let Err(err) = self.validate_swap(a, b) {
            log::debug!("Rejected swap {a:?} <-> {b:?}: {err}");
            self.enter(Phase::Idle);
            return Err(err);
        }

        self.board.swap(a, b)?;

        self.enter(Phase::Detecting);
        let groups = find_runs(&self.board);

        let steps = if !groups.is_empty() {
            self.swaps_made += 1;
            self.resolve(Some((a, b)), groups)
        } else if self.config.require_match_on_swap {
            self.enter(Phase::Reverting);
            self.board.swap(a, b)?;
            log::debug!("Swap {a:?} <-> {b:?} made no match, reverted");
            Vec::new()
        } else {
            self.swaps_made += 1;
            log::debug!("Swap {a:?} <-> {b:?} made no match, kept");
            vec![CascadeStep::swap_only(a, b)]
        };

        self.enter(Phase::Idle);
        Ok(steps)
    }

    fn validate_swap(&self, a: Coord2, b: Coord2) -> Result<()> {
        self.board.validate_coords(a)?;
        self.board.validate_coords(b)?;
        if self.board.is_adjacent(a, b) {
            Ok(())
        } else {
            Err(GameError::NotAdjacent)
        }
    }

    /// Runs clear passes until detection comes back empty. `groups` must hold
    /// the runs on the current board.
    fn resolve(
        &mut self,
        mut swap: Option<(Coord2, Coord2)>,
        mut groups: Vec<MatchGroup>,
    ) -> Vec<CascadeStep> {
        let limit = usize::from(self.config.cascade_limit.max(1));
        let mut steps = Vec::new();

        loop {
            steps.push(self.clear_pass(swap.take(), groups));

            self.enter(Phase::Detecting);
            groups = find_runs(&self.board);
            if groups.is_empty() {
                break;
            }
            if steps.len() >= limit {
                log::warn!(
                    "Cascade stopped after {} steps with {} runs left on the board",
                    steps.len(),
                    groups.len()
                );
                if let Some(last) = steps.last_mut() {
                    last.truncated = true;
                }
                break;
            }
        }

        log::debug!(
            "Cascade resolved in {} steps, {} cells cleared",
            steps.len(),
            steps.iter().map(|step| step.cleared.len()).sum::<usize>()
        );
        steps
    }

    fn clear_pass(
        &mut self,
        swap: Option<(Coord2, Coord2)>,
        groups: Vec<MatchGroup>,
    ) -> CascadeStep {
        self.enter(Phase::Clearing);
        let mut cleared: Vec<Coord2> = merge_groups(&groups).into_iter().collect();
        cleared.sort_unstable_by_key(|&(x, y)| (y, x));
        for &cell in &cleared {
            self.board[cell] = None;
        }

        self.enter(Phase::Compacting);
        let falls = compact(&mut self.board);

        self.enter(Phase::Refilling);
        let refills = refill_all(&mut self.board, &mut self.source, self.config.type_count);
        debug_assert_eq!(refills.len(), cleared.len());

        let step = CascadeStep {
            swap,
            matches: groups,
            cleared,
            falls,
            refills,
            truncated: false,
        };
        self.total_cleared += u32::from(step.cleared_count());
        log::debug!(
            "Cleared {} cells in {} runs, {} fell, {} refilled",
            step.cleared.len(),
            step.matches.len(),
            step.falls.len(),
            step.refills.len()
        );
        step
    }

    fn enter(&mut self, phase: Phase) {
        log::trace!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
