use rand::prelude::*;

use super::*;

/// Redraws allowed per cell before falling back to the first kind that does not match.
const MAX_REDRAWS: usize = 16;

/// Whole boards generated before a `Playable` request gives up.
const MAX_PLAYABLE_ATTEMPTS: usize = 32;

/// Tile source backed by a seeded small PRNG.
#[derive(Clone, Debug)]
pub struct RandomTileSource {
    seed: u64,
    rng: SmallRng,
}

impl RandomTileSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TileSource for RandomTileSource {
    fn draw(&mut self, tiles: &TileSet) -> TileKind {
        let kinds = tiles.kinds();
        kinds[self.rng.random_range(0..kinds.len())]
    }
}

/// Generation strategy that fills the board from a tile source, optionally steering away from initial matches and
/// dead boards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    start_board: StartBoard,
}

impl RandomBoardGenerator {
    pub fn new(start_board: StartBoard) -> Self {
        Self { start_board }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate<S: TileSource + ?Sized>(self, config: &GameConfig, source: &mut S) -> Grid {
        use StartBoard::*;

        match self.start_board {
            Random => {
                let mut grid = Grid::empty(config.size);
                grid.fill_empties(&config.tiles, source);
                grid
            }
            MatchFree => fill_match_free(config, source),
            Playable => {
                let mut grid = fill_match_free(config, source);
                for attempt in 1..MAX_PLAYABLE_ATTEMPTS {
                    if has_valid_move(&grid) {
                        log::debug!("Playable board found after {} attempts", attempt);
                        return grid;
                    }
                    grid = fill_match_free(config, source);
                }
                if !has_valid_move(&grid) {
                    log::warn!(
                        "No playable board after {} attempts, keeping a dead board",
                        MAX_PLAYABLE_ATTEMPTS
                    );
                }
                grid
            }
        }
    }
}

/// Whether placing `kind` at `coords` completes a run with the two cells to its left or the two above.
fn completes_run(grid: &Grid, (row, col): Coord2, kind: TileKind) -> bool {
    let same = |pos: Coord2| grid[pos].kind() == Some(kind);
    (col >= 2 && same((row, col - 1)) && same((row, col - 2)))
        || (row >= 2 && same((row - 1, col)) && same((row - 2, col)))
}

/// Fills row by row, redrawing any tile that would complete a run.
fn fill_match_free<S: TileSource + ?Sized>(config: &GameConfig, source: &mut S) -> Grid {
    let size = config.size;
    let tiles = &config.tiles;
    let mut grid = Grid::empty(size);

    for row in 0..size {
        for col in 0..size {
            let coords = (row, col);
            let mut kind = source.draw(tiles);
            let mut redraws = 0;
            while completes_run(&grid, coords, kind) && redraws < MAX_REDRAWS {
                kind = source.draw(tiles);
                redraws += 1;
            }
            if completes_run(&grid, coords, kind) {
                // at most two kinds are blocked and there are at least three
                if let Some(&fallback) = tiles
                    .kinds()
                    .iter()
                    .find(|&&candidate| !completes_run(&grid, coords, candidate))
                {
                    log::trace!("Redraws exhausted at {:?}, using {:?}", coords, fallback);
                    kind = fallback;
                }
            }
            // in bounds by construction
            let _ = grid.set(coords, Cell::Tile(kind));
        }
    }
    grid
}
