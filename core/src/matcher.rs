use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest run of equal tiles that counts as a match.
pub const MIN_RUN: Coord = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row, left to right.
    Horizontal,
    /// Along a column, top to bottom.
    Vertical,
}

/// Maximal run of at least [`MIN_RUN`] equal tiles along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub kind: TileKind,
    pub axis: Axis,
    pub start: Coord2,
    pub len: Coord,
}

impl Match {
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let Self {
            axis, start, len, ..
        } = *self;
        // stops at the coordinate limit instead of wrapping
        (0..len).map_while(move |offset| match axis {
            Axis::Horizontal => Some((start.0, start.1.checked_add(offset)?)),
            Axis::Vertical => Some((start.0.checked_add(offset)?, start.1)),
        })
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (start_row, start_col) = self.start;
        let (line, along, line_start, along_start) = match self.axis {
            Axis::Horizontal => (row, col, start_row, start_col),
            Axis::Vertical => (col, row, start_col, start_row),
        };
        line == line_start && along.checked_sub(along_start).is_some_and(|offset| offset < self.len)
    }
}

/// Every maximal run on the board: all row runs top to bottom, then all column runs left to right.
///
/// Crossing runs are reported separately, one cell may belong to two matches.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut matches = Vec::new();
    let size = grid.size();
    for row in 0..size {
        scan_line(grid, Axis::Horizontal, row, &mut matches);
    }
    for col in 0..size {
        scan_line(grid, Axis::Vertical, col, &mut matches);
    }
    matches
}

/// Cheaper than `find_matches` when only the existence of a match matters.
pub fn has_match(grid: &Grid) -> bool {
    let size = grid.size();
    (0..size).any(|line| {
        first_run(grid, Axis::Horizontal, line).is_some()
            || first_run(grid, Axis::Vertical, line).is_some()
    })
}

/// Union of the cells covered by `matches`, each cell listed once.
pub fn matched_cells(matches: &[Match]) -> BTreeSet<Coord2> {
    matches.iter().flat_map(Match::cells).collect()
}

fn line_coords(axis: Axis, line: Coord, offset: Coord) -> Coord2 {
    match axis {
        Axis::Horizontal => (line, offset),
        Axis::Vertical => (offset, line),
    }
}

/// Walks one line, calling `on_run` for each maximal run until it returns `false`.
fn for_each_run(grid: &Grid, axis: Axis, line: Coord, mut on_run: impl FnMut(Match) -> bool) {
    let size = grid.size();
    let mut offset = 0;
    while offset < size {
        let start = line_coords(axis, line, offset);
        let Some(kind) = grid[start].kind() else {
            offset += 1;
            continue;
        };

        let mut len = 1;
        while offset + len < size && grid[line_coords(axis, line, offset + len)].kind() == Some(kind) {
            len += 1;
        }

        if len >= MIN_RUN {
            let run = Match {
                kind,
                axis,
                start,
                len,
            };
            if !on_run(run) {
                return;
            }
        }
        offset += len;
    }
}

fn scan_line(grid: &Grid, axis: Axis, line: Coord, matches: &mut Vec<Match>) {
    for_each_run(grid, axis, line, |run| {
        matches.push(run);
        true
    });
}

fn first_run(grid: &Grid, axis: Axis, line: Coord) -> Option<Match> {
    let mut found = None;
    for_each_run(grid, axis, line, |run| {
        found = Some(run);
        false
    });
    found
}
