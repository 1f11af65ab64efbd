use serde::{Deserialize, Serialize};

use crate::error::{OthelloError, Result};
use crate::types::Side;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 3;

/// Values collected by the setup screen and passed unchanged into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub human_side: Side,
    pub depth: u8,
    /// Optional wall-clock budget for the automated player, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human_side: Side::Dark,
            depth: MAX_DEPTH,
            timeout_ms: None,
        }
    }
}

impl SessionConfig {
    pub fn new(human_side: Side, depth: u8) -> Self {
        Self {
            human_side,
            depth,
            timeout_ms: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            return Err(OthelloError::InvalidConfig(format!(
                "depth must be between {MIN_DEPTH} and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(OthelloError::InvalidConfig(
                "timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ai_side(&self) -> Side {
        self.human_side.opponent()
    }
}
