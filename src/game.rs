use std::time::Duration;

use serde::Serialize;

use crate::ai::Searcher;
use crate::board::{Board, mask_to_indices};
use crate::config::SessionConfig;
use crate::error::{OthelloError, Result};
use crate::types::{GameResult, GameState, Phase, Position, Side};

/// Chooses a move for the automated player.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Position>;
}

/// Alpha-beta search to a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector {
    depth: u8,
    timeout: Option<Duration>,
}

impl MinimaxSelector {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            timeout: None,
        }
    }

    pub fn with_timeout(depth: u8, timeout: Duration) -> Self {
        Self {
            depth,
            timeout: Some(timeout),
        }
    }
}

impl From<&SessionConfig> for MinimaxSelector {
    fn from(config: &SessionConfig) -> Self {
        match config.timeout_ms {
            Some(ms) => Self::with_timeout(config.depth, Duration::from_millis(ms)),
            None => Self::new(config.depth),
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Position> {
        let mut searcher = match self.timeout {
            Some(timeout) => Searcher::with_timeout(self.depth, timeout),
            None => Searcher::new(self.depth),
        };
        searcher.search(board, side).best_move
    }
}

/// What a single applied move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub side: Side,
    pub position: Position,
    pub flipped: Vec<u8>,
    /// `true` when the opponent had no reply and `side` moves again.
    pub skipped: bool,
    pub phase: Phase,
}

/// One game between a human and the automated player.
///
/// Owns the authoritative board and whose turn it is; search only ever sees copies.
pub struct GameSession {
    board: Board,
    current_side: Side,
    human_side: Side,
    phase: Phase,
    last_move: Option<Position>,
    flipped: Vec<u8>,
    skipped: bool,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let selector = MinimaxSelector::from(&config);
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(config: SessionConfig, selector: Box<dyn MoveSelector>) -> Result<Self> {
        config.validate()?;

        let mut session = Self {
            board: Board::new(),
            current_side: Side::Dark,
            human_side: config.human_side,
            phase: Phase::AwaitingHumanMove,
            last_move: None,
            flipped: Vec::new(),
            skipped: false,
            selector,
        };
        session.phase = session.phase_for(session.current_side);
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn human_side(&self) -> Side {
        self.human_side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.phase == Phase::GameOver {
            return Vec::new();
        }
        self.board.legal_positions(self.current_side)
    }

    pub fn play_human(&mut self, row: usize, col: usize) -> Result<MoveOutcome> {
        self.ensure_turn(self.human_side)?;
        self.apply(row, col, self.human_side)
    }

    pub fn play_automated(&mut self) -> Result<MoveOutcome> {
        let side = self.human_side.opponent();
        self.ensure_turn(side)?;

        let selected = self
            .selector
            .select_move(&self.board, side)
            .ok_or_else(|| OthelloError::IllegalSelection("no move returned".to_string()))?;

        self.apply(selected.row as usize, selected.col as usize, side)
            .map_err(|err| OthelloError::IllegalSelection(err.to_string()))
    }

    pub fn state(&self) -> GameState {
        let (dark_count, light_count) = self.board.disc_counts();
        GameState {
            board: self.board.to_array().to_vec(),
            current_side: self.current_side,
            phase: self.phase,
            dark_count,
            light_count,
            last_move: self.last_move,
            flipped: self.flipped.clone(),
            skipped: self.skipped,
        }
    }

    /// Final score, available once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        if self.phase != Phase::GameOver {
            return None;
        }
        let (dark_count, light_count) = self.board.disc_counts();
        Some(GameResult {
            winner: if dark_count > light_count {
                Some(Side::Dark)
            } else if light_count > dark_count {
                Some(Side::Light)
            } else {
                None
            },
            dark_count,
            light_count,
        })
    }

    fn ensure_turn(&self, side: Side) -> Result<()> {
        if self.phase == Phase::GameOver {
            return Err(OthelloError::GameOver);
        }
        if self.current_side != side {
            return Err(OthelloError::NotYourTurn(side));
        }
        Ok(())
    }

    fn apply(&mut self, row: usize, col: usize, side: Side) -> Result<MoveOutcome> {
        let flips = self.board.apply_move(row, col, side)?;
        let position = Position {
            row: row as u8,
            col: col as u8,
        };

        self.last_move = Some(position);
        self.flipped = mask_to_indices(flips);
        self.advance_turn(side);

        Ok(MoveOutcome {
            side,
            position,
            flipped: self.flipped.clone(),
            skipped: self.skipped,
            phase: self.phase,
        })
    }

    fn advance_turn(&mut self, mover: Side) {
        if self.board.is_terminal() {
            self.skipped = false;
            self.phase = Phase::GameOver;
            let (dark, light) = self.board.disc_counts();
            log::info!("game over: dark={dark} light={light}");
            return;
        }

        let opponent = mover.opponent();
        if self.board.has_legal_move(opponent) {
            self.current_side = opponent;
            self.skipped = false;
        } else {
            log::trace!("{opponent:?} has no legal move, {mover:?} plays again");
            self.current_side = mover;
            self.skipped = true;
        }
        self.phase = self.phase_for(self.current_side);
    }

    fn phase_for(&self, side: Side) -> Phase {
        if side == self.human_side {
            Phase::AwaitingHumanMove
        } else {
            Phase::AwaitingAutomatedMove
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_side: Side) {
        self.board = board;
        self.current_side = current_side;
        self.phase = self.phase_for(current_side);
        self.last_move = None;
        self.flipped.clear();
        self.skipped = false;
    }
}
