use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Board must be at least 3 cells wide")]
    BoardTooSmall,
    #[error("At least 3 distinct tile kinds are required")]
    TooFewTileKinds,
    #[error("Tile kind listed more than once")]
    DuplicateTileKind,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board holds a tile kind outside the tile set")]
    UnknownTileKind,
    #[error("Tile script has no entries")]
    EmptyScript,
}

pub type Result<T> = core::result::Result<T, GameError>;
