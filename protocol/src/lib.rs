//! Wire format for driving a game session from another process.
//!
//! Boards travel as row-major lists of tile kinds, coordinates as `[row, col]` pairs.

use fruitfall_core::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("No game in progress")]
    NoSession,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    NewGame {
        #[serde(default)]
        config: GameConfig,
        seed: u64,
    },
    Select {
        row: Coord,
        col: Coord,
    },
    Snapshot,
    Hint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireSnapshot {
    pub size: Coord,
    pub tiles: Vec<Option<TileKind>>,
    pub score: Score,
    pub selection: Option<[Coord; 2]>,
    pub state: SessionState,
}

impl WireSnapshot {
    /// Rebuilds the board, failing when the tile list does not fill a `size × size` square.
    pub fn to_grid(&self) -> Result<Grid> {
        let size = usize::from(self.size);
        let cells: Vec<Cell> = self
            .tiles
            .iter()
            .map(|tile| tile.map_or(Cell::Empty, Cell::Tile))
            .collect();
        let cells = Array2::from_shape_vec([size, size], cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Grid::from_cells(cells)?)
    }
}

impl From<&Snapshot> for WireSnapshot {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            size: snapshot.size(),
            tiles: snapshot.tiles_row_major(),
            score: snapshot.score,
            selection: snapshot.selection.map(|(row, col)| [row, col]),
            state: snapshot.state(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireOutcome {
    Selected,
    Reselected,
    NotAdjacent,
    Reverted,
    Accepted {
        score_delta: Score,
        passes: PassCount,
        cap_reached: bool,
    },
}

impl From<SelectOutcome> for WireOutcome {
    fn from(outcome: SelectOutcome) -> Self {
        match outcome {
            SelectOutcome::Selected(_) => Self::Selected,
            SelectOutcome::Reselected(_) => Self::Reselected,
            SelectOutcome::Swapped(SwapOutcome::NotAdjacent) => Self::NotAdjacent,
            SelectOutcome::Swapped(SwapOutcome::Reverted) => Self::Reverted,
            SelectOutcome::Swapped(SwapOutcome::Accepted(report)) => Self::Accepted {
                score_delta: report.score_delta,
                passes: report.passes,
                cap_reached: report.cap_reached,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State {
        snapshot: WireSnapshot,
    },
    SelectResult {
        outcome: WireOutcome,
        snapshot: WireSnapshot,
    },
    Hint {
        swap: Option<[[Coord; 2]; 2]>,
    },
    Error {
        message: String,
    },
}

pub fn decode(json: &str) -> Result<ClientMessage> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode(message: &ServerMessage) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

/// Owns at most one session and answers client messages against it.
#[derive(Debug, Default)]
pub struct GameHost {
    session: Option<GameSession>,
}

impl GameHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn handle(&mut self, message: ClientMessage) -> Result<ServerMessage> {
        match message {
            ClientMessage::NewGame { config, seed } => {
                let session = GameSession::new(config, seed)?;
                log::debug!("Host started game with seed {}", seed);
                let snapshot = WireSnapshot::from(&session.snapshot());
                self.session = Some(session);
                Ok(ServerMessage::State { snapshot })
            }
            ClientMessage::Select { row, col } => {
                let session = self.session.as_mut().ok_or(ProtocolError::NoSession)?;
                let outcome = session.select((row, col))?;
                Ok(ServerMessage::SelectResult {
                    outcome: outcome.into(),
                    snapshot: WireSnapshot::from(&session.snapshot()),
                })
            }
            ClientMessage::Snapshot => {
                let session = self.session.as_ref().ok_or(ProtocolError::NoSession)?;
                Ok(ServerMessage::State {
                    snapshot: WireSnapshot::from(&session.snapshot()),
                })
            }
            ClientMessage::Hint => {
                let session = self.session.as_ref().ok_or(ProtocolError::NoSession)?;
                let swap = session
                    .valid_moves()
                    .first()
                    .map(|swap| [[swap.from.0, swap.from.1], [swap.to.0, swap.to.1]]);
                Ok(ServerMessage::Hint { swap })
            }
        }
    }

    /// JSON in, JSON out, failures are reported as an error message instead of being returned.
    pub fn handle_json(&mut self, json: &str) -> String {
        let reply = decode(json)
            .and_then(|message| self.handle(message))
            .unwrap_or_else(|err| {
                log::debug!("Rejected client message: {}", err);
                ServerMessage::Error {
                    message: err.to_string(),
                }
            });
        match encode(&reply) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to encode reply: {}", err);
                String::from(r#"{"type":"error","message":"failed to encode reply"}"#)
            }
        }
    }
}
