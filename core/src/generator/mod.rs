use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Supplies tiles for the initial board and for refills after a cascade pass.
pub trait TileSource {
    fn draw(&mut self, tiles: &TileSet) -> TileKind;
}

impl<S: TileSource + ?Sized> TileSource for &mut S {
    fn draw(&mut self, tiles: &TileSet) -> TileKind {
        (**self).draw(tiles)
    }
}

/// Replays a fixed sequence of kinds, starting over once exhausted.
///
/// Kinds outside the tile set are still handed out as listed.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedTileSource {
    script: VecDeque<TileKind>,
}

impl ScriptedTileSource {
    pub fn new(script: &[TileKind]) -> Result<Self> {
        if script.is_empty() {
            return Err(GameError::EmptyScript);
        }
        Ok(Self {
            script: script.iter().copied().collect(),
        })
    }

    /// Kinds left before the script starts over.
    pub fn upcoming(&self) -> Vec<TileKind> {
        self.script.iter().copied().collect()
    }
}

impl TileSource for ScriptedTileSource {
    fn draw(&mut self, _tiles: &TileSet) -> TileKind {
        // never empty, checked on construction
        let kind = self.script[0];
        self.script.rotate_left(1);
        kind
    }
}

pub trait BoardGenerator {
    fn generate<S: TileSource + ?Sized>(self, config: &GameConfig, source: &mut S) -> Grid;
}

/// How much care goes into the initial board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartBoard {
    /// Every cell drawn independently, the board may already contain matches.
    #[default]
    Random,
    /// No run of three on the initial board.
    MatchFree,
    /// Match free and at least one swap that scores.
    Playable,
}

