use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a session between turns, everything a renderer needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: Score,
    pub selection: Option<Coord2>,
}

impl Snapshot {
    pub fn new(grid: Grid, score: Score, selection: Option<Coord2>) -> Result<Self> {
        let snapshot = Self {
            grid,
            score,
            selection,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_session<S: TileSource>(session: &GameSession<S>) -> Self {
        Self {
            grid: session.grid().clone(),
            score: session.score(),
            selection: session.selection(),
        }
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_selection(self.selection)
    }

    /// Tile kinds in row-major order, `None` only for a board caught mid-cascade.
    pub fn tiles_row_major(&self) -> Vec<Option<TileKind>> {
        self.grid.iter_row_major().map(Cell::kind).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.grid.is_full() {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some(selection) = self.selection {
            self.grid.validate_coords(selection)?;
        }
        Ok(())
    }
}
