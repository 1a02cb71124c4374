use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Swap of two adjacent cells, `from` always precedes `to` in row-major order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapMove {
    pub from: Coord2,
    pub to: Coord2,
}

/// Every swap that would leave at least one match on the board, in row-major order of `from`.
pub fn find_valid_moves(grid: &Grid) -> Vec<SwapMove> {
    let mut moves = Vec::new();
    for_each_valid_move(grid, |candidate| {
        moves.push(candidate);
        true
    });
    moves
}

pub fn has_valid_move(grid: &Grid) -> bool {
    let mut found = false;
    for_each_valid_move(grid, |_| {
        found = true;
        false
    });
    found
}

/// Tries each right and down swap on a scratch copy, stops once `on_move` returns `false`.
fn for_each_valid_move(grid: &Grid, mut on_move: impl FnMut(SwapMove) -> bool) {
    let mut scratch = grid.clone();
    let size = grid.size();

    for row in 0..size {
        for col in 0..size {
            let from = (row, col);
            let right = (col + 1 < size).then_some((row, col + 1));
            let down = (row + 1 < size).then_some((row + 1, col));
            for to in right.into_iter().chain(down) {
                // swapping equal tiles changes nothing
                if grid[from] == grid[to] {
                    continue;
                }
                if scratch.swap(from, to).is_err() {
                    continue;
                }
                let valid = has_match(&scratch);
                // swapping back is always in bounds, the first swap succeeded
                let _ = scratch.swap(from, to);
                if valid && !on_move(SwapMove { from, to }) {
                    return;
                }
            }
        }
    }
}
