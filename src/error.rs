use thiserror::Error;

use crate::types::Side;

/// Errors reported by the engine when a caller breaks the rules contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },

    #[error("illegal move for {side:?} at ({row}, {col})")]
    InvalidMove { row: usize, col: usize, side: Side },

    #[error("dark and light masks overlap: {0:#018x}")]
    OverlappingDiscs(u64),

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Side),

    /// The automated player produced no move, or a move the board rejects.
    #[error("automated player selected an illegal move: {0}")]
    IllegalSelection(String),

    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OthelloError>;
