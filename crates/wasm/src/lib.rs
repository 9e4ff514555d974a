//! blokus-wasm - WebAssembly entry points and bindings for browser hosts.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use blokus_core::{Coord, PieceCatalogue, PieceId, Placement, PlayerId};
use blokus_engine::{Game, GameConfig, GameMode, GameStatus};
use blokus_eval::{evaluate, EvalWeights};
use blokus_search::{suggest_move, GreedySearch, SearchBudget};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsPlacement {
    pub piece: u8,
    pub orientation: u8,
    pub row: i16,
    pub col: i16,
}

impl From<&Placement> for JsPlacement {
    fn from(p: &Placement) -> Self {
        Self {
            piece: p.piece.0,
            orientation: p.orientation,
            row: p.anchor.row,
            col: p.anchor.col,
        }
    }
}

impl From<JsPlacement> for Placement {
    fn from(js: JsPlacement) -> Self {
        Placement::new(PieceId(js.piece), js.orientation, Coord::new(js.row, js.col))
    }
}

#[derive(Serialize)]
pub struct JsScoredPlacement {
    #[serde(flatten)]
    pub placement: JsPlacement,
    pub score: f32,
}

#[derive(Serialize)]
pub struct JsPiece {
    pub id: u8,
    pub name: &'static str,
    pub area: usize,
    /// Per orientation, its (row, col) cells.
    pub orientations: Vec<Vec<(i16, i16)>>,
}

#[derive(Serialize)]
pub struct JsFinalScores {
    pub scores: Vec<i32>,
    pub ranking: Vec<u8>,
    pub winner: Option<u8>,
    pub coverage: f32,
}

#[wasm_bindgen]
pub struct JsGame {
    inner: Game,
}

#[wasm_bindgen]
impl JsGame {
    /// Start a preset game: "duo", "four_player", "total_allocation" or "challenge".
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<JsGame, JsError> {
        let mode = mode_from_str(mode).ok_or_else(|| JsError::new("unknown game mode"))?;
        Self::start(GameConfig::for_mode(mode))
    }

    /// Start from a serialized `GameConfig`.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<JsGame, JsError> {
        let config: GameConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Self::start(config)
    }

    /// Restore a game saved with `toJson`; the state is checked on the way in.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(state: JsValue) -> Result<JsGame, JsError> {
        let inner: Game =
            serde_wasm_bindgen::from_value(state).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    fn start(config: GameConfig) -> Result<JsGame, JsError> {
        let inner = Game::new_game(config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn status(&self) -> String {
        match self.inner.status() {
            GameStatus::NotStarted => "NotStarted",
            GameStatus::InProgress => "InProgress",
            GameStatus::Finished => "Finished",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = activePlayer)]
    pub fn active_player(&self) -> Option<u8> {
        self.inner.active_player().map(|p| p.0)
    }

    pub fn width(&self) -> u8 {
        self.inner.position().board().width()
    }

    pub fn height(&self) -> u8 {
        self.inner.position().board().height()
    }

    /// Board rows, '.' for empty and the owner's digit otherwise.
    #[wasm_bindgen(js_name = boardRows)]
    pub fn board_rows(&self) -> JsValue {
        to_js(&self.inner.board_snapshot().rows())
    }

    /// Owner of a cell, or None when empty or off the board.
    pub fn owner(&self, row: i16, col: i16) -> Option<u8> {
        self.inner
            .position()
            .board()
            .owner(Coord::new(row, col))
            .map(|p| p.0)
    }

    /// Remaining piece ids of `player`.
    pub fn remaining(&self, player: u8) -> Vec<u8> {
        self.inner
            .position()
            .player(PlayerId(player))
            .map(|seat| seat.remaining.iter().map(|id| id.0).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, player: u8) -> JsValue {
        let moves: Vec<JsPlacement> = self
            .inner
            .legal_moves(PlayerId(player))
            .map(|p| JsPlacement::from(&p))
            .collect();
        to_js(&moves)
    }

    #[wasm_bindgen(js_name = isLegal)]
    pub fn is_legal(&self, player: u8, piece: u8, orientation: u8, row: i16, col: i16) -> bool {
        let placement = Placement::new(PieceId(piece), orientation, Coord::new(row, col));
        self.inner.is_legal(PlayerId(player), &placement)
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(
        &mut self,
        player: u8,
        piece: u8,
        orientation: u8,
        row: i16,
        col: i16,
    ) -> Result<(), JsError> {
        let placement = Placement::new(PieceId(piece), orientation, Coord::new(row, col));
        self.inner
            .apply_move(PlayerId(player), placement)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Suggested placement for `player`, or null.
    #[wasm_bindgen(js_name = suggestMove)]
    pub fn suggest_move(&self, player: u8, depth: u8, beam_width: usize, max_nodes: usize) -> JsValue {
        let budget = SearchBudget::new(depth, beam_width, max_nodes);
        let weights = EvalWeights::for_mode(self.inner.config().mode);
        match suggest_move(&self.inner, PlayerId(player), &budget, &weights) {
            Some(placement) => to_js(&JsPlacement::from(&placement)),
            None => JsValue::NULL,
        }
    }

    /// Best `n` placements by one-ply score, best first.
    #[wasm_bindgen(js_name = topMoves)]
    pub fn top_moves(&self, player: u8, n: usize) -> JsValue {
        let config = self.inner.config();
        let search = GreedySearch::new(EvalWeights::for_mode(config.mode));
        let results: Vec<JsScoredPlacement> = search
            .find_top_moves(self.inner.position(), config, PlayerId(player), n)
            .iter()
            .map(|(placement, score)| JsScoredPlacement {
                placement: JsPlacement::from(placement),
                score: *score,
            })
            .collect();
        to_js(&results)
    }

    pub fn evaluate(&self, player: u8) -> f32 {
        let config = self.inner.config();
        evaluate(
            self.inner.position(),
            PlayerId(player),
            config,
            &EvalWeights::for_mode(config.mode),
        )
    }

    /// Final scores once finished, otherwise null.
    #[wasm_bindgen(js_name = finalScores)]
    pub fn final_scores(&self) -> JsValue {
        match self.inner.final_scores() {
            Some(s) => to_js(&JsFinalScores {
                scores: s.scores.clone(),
                ranking: s.ranking.iter().map(|p| p.0).collect(),
                winner: s.winner.map(|p| p.0),
                coverage: s.coverage,
            }),
            None => JsValue::NULL,
        }
    }

    /// Accepted moves in order, as `{ player, placement }` records.
    pub fn history(&self) -> JsValue {
        to_js(&self.inner.move_history())
    }

    /// Whole game state, for the host to persist.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner)
    }
}

/// The standard piece catalogue with every orientation.
#[wasm_bindgen(js_name = pieceCatalogue)]
pub fn piece_catalogue() -> JsValue {
    let pieces: Vec<JsPiece> = PieceCatalogue::standard()
        .iter()
        .map(|piece| JsPiece {
            id: piece.id().0,
            name: piece.name(),
            area: piece.area(),
            orientations: piece
                .orientations()
                .iter()
                .map(|o| o.cells().iter().map(|c| (c.row, c.col)).collect())
                .collect(),
        })
        .collect();
    to_js(&pieces)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|_| JsValue::NULL)
}

fn mode_from_str(mode: &str) -> Option<GameMode> {
    match mode {
        "duo" => Some(GameMode::Duo),
        "four_player" => Some(GameMode::FourPlayer),
        "total_allocation" => Some(GameMode::TotalAllocation),
        "challenge" => Some(GameMode::Challenge),
        _ => None,
    }
}
