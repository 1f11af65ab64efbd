use serde::{Deserialize, Serialize};

/// One of the two competing players. Dark always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub(crate) fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / 8) as u8,
            col: (idx % 8) as u8,
        }
    }
}

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingHumanMove,
    AwaitingAutomatedMove,
    GameOver,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells, row-major: 0=empty, 1=dark, 2=light.
    pub board: Vec<u8>,
    pub current_side: Side,
    pub phase: Phase,
    pub dark_count: u8,
    pub light_count: u8,
    pub last_move: Option<Position>,
    /// Cells flipped by the last move (0..=63).
    pub flipped: Vec<u8>,
    /// `true` when the side after the last move had to pass.
    pub skipped: bool,
}

/// Final result after game over. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub dark_count: u8,
    pub light_count: u8,
}
