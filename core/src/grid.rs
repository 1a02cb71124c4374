use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of cells, pure storage plus the structural operations used by a cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Board of `size × size` empty cells, only useful as a target for `fill_empties`.
    pub fn empty(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Builds a full board from rows listed top to bottom.
    pub fn from_rows<R: AsRef<[TileKind]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Array2::default([size, size]);
        for (row, kinds) in rows.iter().enumerate() {
            let kinds = kinds.as_ref();
            if kinds.len() != size {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, &kind) in kinds.iter().enumerate() {
                cells[[row, col]] = Cell::Tile(kind);
            }
        }
        Self::from_cells(cells)
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        let size = self.size();
        mult(size, size)
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    /// Exchanges two cells, callers are responsible for only swapping adjacent cells.
    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let a = self.validate_coords(a)?;
        let b = self.validate_coords(b)?;
        debug_assert!(is_adjacent(a, b), "swap of non-adjacent cells {a:?} {b:?}");
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
        Ok(())
    }

    pub fn clear_all<I>(&mut self, coords: I) -> Result<()>
    where
        I: IntoIterator<Item = Coord2>,
    {
        for pos in coords {
            self.set(pos, Cell::Empty)?;
        }
        Ok(())
    }

    /// Lets the tiles of a column fall to the bottom, gaps end up at the top.
    pub fn compact_column(&mut self, col: Coord) -> Result<()> {
        self.validate_coords((0, col))?;
        let mut column = self.cells.column_mut(col.into());
        let len = column.len();

        // walk upwards, moving each tile to the lowest free slot
        let mut write = len;
        for read in (0..len).rev() {
            let cell = column[read];
            if cell.is_empty() {
                continue;
            }
            write -= 1;
            if write != read {
                column[write] = cell;
                column[read] = Cell::Empty;
            }
        }
        Ok(())
    }

    pub fn compact(&mut self) {
        for col in 0..self.size() {
            // in bounds by construction
            let _ = self.compact_column(col);
        }
    }

    /// Replaces every empty cell with a newly drawn tile, returns how many were filled.
    pub fn fill_empties<S>(&mut self, tiles: &TileSet, source: &mut S) -> CellCount
    where
        S: TileSource + ?Sized,
    {
        let mut filled = 0;
        for cell in self.cells.iter_mut() {
            if cell.is_empty() {
                *cell = Cell::Tile(source.draw(tiles));
                filled += 1;
            }
        }
        filled
    }

    pub fn empty_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_empty())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Cells in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}
