use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::SessionConfig;
pub use error::{OthelloError, Result};
pub use game::{GameSession, MinimaxSelector, MoveOutcome, MoveSelector};
pub use types::{Cell, GameResult, GameState, Phase, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
