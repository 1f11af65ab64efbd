use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::game::GameSession;

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// Browser-facing handle around a [`GameSession`].
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a `SessionConfig` object; `undefined` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            session: GameSession::new(config)?,
        })
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.legal_moves())
    }

    pub fn play(&mut self, row: usize, col: usize) -> Result<JsValue, JsError> {
        let outcome = self.session.play_human(row, col)?;
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let outcome = self.session.play_automated()?;
        to_js(&outcome)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.state())
    }

    /// `null` until the game is over.
    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.result())
    }
}
