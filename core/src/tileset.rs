use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// The alphabet of tile kinds a game draws from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TileKind>", into = "Vec<TileKind>")]
pub struct TileSet {
    kinds: Vec<TileKind>,
}

impl TileSet {
    pub const MIN_KINDS: usize = 3;

    pub fn new(kinds: &[TileKind]) -> Result<Self> {
        if kinds.len() < Self::MIN_KINDS {
            return Err(GameError::TooFewTileKinds);
        }
        for (i, kind) in kinds.iter().enumerate() {
            if kinds[..i].contains(kind) {
                return Err(GameError::DuplicateTileKind);
            }
        }
        Ok(Self {
            kinds: kinds.to_vec(),
        })
    }

    /// All six kinds.
    pub fn standard() -> Self {
        Self {
            kinds: TileKind::ALL.to_vec(),
        }
    }

    /// The first `count` kinds of the standard alphabet.
    pub fn first(count: usize) -> Result<Self> {
        Self::new(&TileKind::ALL[..count.min(TileKind::ALL.len())])
    }

    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn contains(&self, kind: TileKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn get(&self, index: usize) -> Option<TileKind> {
        self.kinds.get(index).copied()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<TileKind>> for TileSet {
    type Error = GameError;

    fn try_from(kinds: Vec<TileKind>) -> Result<Self> {
        Self::new(&kinds)
    }
}

impl From<TileSet> for Vec<TileKind> {
    fn from(tiles: TileSet) -> Self {
        tiles.kinds
    }
}
