/// Single coordinate axis used for board size, rows and columns.
pub type Coord = u8;

/// Count type used for cell counts and cascade pass counts.
pub type CellCount = u16;

/// Number of cascade passes run by a single resolution.
pub type PassCount = u16;

/// Accumulated points.
pub type Score = u32;

/// Two-dimensional coordinates `(row, col)`, row 0 is the top of the board.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether two cells share an edge (Manhattan distance of exactly one).
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}
