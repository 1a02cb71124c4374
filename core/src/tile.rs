use serde::{Deserialize, Serialize};

/// Kind of a tile, two tiles match when their kinds are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Apple,
    Grape,
    Orange,
    Lemon,
    Cherry,
    Strawberry,
}

impl TileKind {
    pub const ALL: [TileKind; 6] = [
        Self::Apple,
        Self::Grape,
        Self::Orange,
        Self::Lemon,
        Self::Cherry,
        Self::Strawberry,
    ];

    /// Glyph a renderer can draw for this kind.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Apple => "🍎",
            Self::Grape => "🍇",
            Self::Orange => "🍊",
            Self::Lemon => "🍋",
            Self::Cherry => "🍒",
            Self::Strawberry => "🍓",
        }
    }
}

/// Content of a single board cell.
///
/// `Empty` only exists while a cascade is being resolved, a settled board is always full.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Tile(TileKind),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn kind(self) -> Option<TileKind> {
        match self {
            Self::Empty => None,
            Self::Tile(kind) => Some(kind),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<TileKind> for Cell {
    fn from(kind: TileKind) -> Self {
        Self::Tile(kind)
    }
}
