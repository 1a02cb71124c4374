#![no_std]

extern crate alloc;

use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use matcher::*;
pub use session::*;
pub use tile::*;
pub use tileset::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod grid;
mod matcher;
mod session;
mod tile;
mod tileset;
mod types;

pub const DEFAULT_SIZE: Coord = 8;
pub const MIN_SIZE: Coord = 3;
pub const POINTS_PER_MATCH: Score = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord,
    pub tiles: TileSet,
    pub points_per_match: Score,
    /// Cascade passes allowed per resolution, `None` uses `size * size`.
    pub pass_cap: Option<PassCount>,
    pub start_board: StartBoard,
    /// Clear and credit any matches on a generated opening board before the first pick.
    pub settle_on_start: bool,
    /// Keep a grid snapshot of every cascade pass for replay.
    pub record_cascade: bool,
}

impl GameConfig {
    pub fn new(size: Coord, tiles: TileSet) -> Self {
        Self {
            size,
            tiles,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(GameError::BoardTooSmall);
        }
        if self.tiles.len() < TileSet::MIN_KINDS {
            return Err(GameError::TooFewTileKinds);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Pass cap in effect, never less than one pass.
    pub fn effective_pass_cap(&self) -> PassCount {
        self.pass_cap.unwrap_or_else(|| self.total_cells()).max(1)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tiles: TileSet::standard(),
            points_per_match: POINTS_PER_MATCH,
            pass_cap: None,
            start_board: StartBoard::Random,
            settle_on_start: true,
            record_cascade: false,
        }
    }
}

/// Outcome of trying to swap two cells
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// Cells do not share an edge, nothing happened
    NotAdjacent,
    /// Swap produced no match and was undone
    Reverted,
    /// Swap produced at least one match and the board was resolved
    Accepted(ResolveReport),
}

impl SwapOutcome {
    /// Whether this outcome changed the board
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub const fn score_delta(self) -> Score {
        match self {
            Self::Accepted(report) => report.score_delta,
            Self::NotAdjacent | Self::Reverted => 0,
        }
    }
}

/// Outcome of picking a cell
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// First pick of a swap
    Selected(Coord2),
    /// Second pick was not adjacent and became the new first pick
    Reselected(Coord2),
    /// Second pick was adjacent, a swap was attempted
    Swapped(SwapOutcome),
}

impl SelectOutcome {
    pub const fn swap_accepted(self) -> bool {
        matches!(self, Self::Swapped(SwapOutcome::Accepted(_)))
    }

    pub const fn score_delta(self) -> Score {
        match self {
            Self::Swapped(outcome) => outcome.score_delta(),
            Self::Selected(_) | Self::Reselected(_) => 0,
        }
    }
}
