use alloc::vec::Vec;
use core::mem;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> AwaitingSecondPick (first pick)
/// - AwaitingSecondPick -> AwaitingSecondPick (non-adjacent pick replaces the selection)
/// - AwaitingSecondPick -> Idle (adjacent pick, swap accepted or reverted)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cell selected
    Idle,
    /// A cell is selected, the next pick decides between swap and re-pick
    AwaitingSecondPick,
}

impl SessionState {
    pub const fn from_selection(selection: Option<Coord2>) -> Self {
        match selection {
            None => Self::Idle,
            Some(_) => Self::AwaitingSecondPick,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Represents a game from the first board to whenever the host drops it
#[derive(Clone, Debug)]
pub struct GameSession<S = RandomTileSource> {
    config: GameConfig,
    engine: ResolutionEngine,
    grid: Grid,
    selection: Option<Coord2>,
    score: Saturating<Score>,
    source: S,
    cascade: Vec<CascadePass>,
}

impl GameSession<RandomTileSource> {
    /// New game on a freshly generated board, the same seed always deals the same game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_source(config, RandomTileSource::new(seed))
    }
}

impl<S: TileSource> GameSession<S> {
    pub fn with_source(config: GameConfig, mut source: S) -> Result<Self> {
        config.validate()?;
        let grid = RandomBoardGenerator::new(config.start_board).generate(&config, &mut source);
        log::debug!(
            "New {}x{} game with {} tile kinds",
            config.size,
            config.size,
            config.tiles.len()
        );

        let mut session = Self::assemble(config, grid, source);
        if session.config.settle_on_start {
            let report = session.settle();
            if report.passes > 0 {
                log::debug!(
                    "Opening board settled in {} passes for {} points",
                    report.passes,
                    report.score_delta
                );
            }
        }
        Ok(session)
    }

    /// Game on a given board, which must be full, match the configured size and only hold configured kinds.
    ///
    /// The board is taken as is, `settle_on_start` only applies to generated boards.
    pub fn from_grid(config: GameConfig, grid: Grid, source: S) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.size || !grid.is_full() {
            return Err(GameError::InvalidBoardShape);
        }
        let foreign = grid
            .iter_row_major()
            .filter_map(Cell::kind)
            .any(|kind| !config.tiles.contains(kind));
        if foreign {
            return Err(GameError::UnknownTileKind);
        }
        Ok(Self::assemble(config, grid, source))
    }

    fn assemble(config: GameConfig, grid: Grid, source: S) -> Self {
        Self {
            engine: ResolutionEngine::from_config(&config),
            config,
            grid,
            selection: None,
            score: Saturating(0),
            source,
            cascade: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn selection(&self) -> Option<Coord2> {
        self.selection
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_selection(self.selection)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    /// Feeds one pick of the two-pick swap gesture into the state machine.
    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let coords = self.grid.validate_coords(coords)?;

        Ok(match self.selection {
            None => {
                self.selection = Some(coords);
                log::debug!("Selected {:?}", coords);
                Selected(coords)
            }
            Some(first) if is_adjacent(first, coords) => Swapped(self.swap_and_resolve(first, coords)?),
            Some(first) => {
                self.selection = Some(coords);
                log::debug!("Selection moved from {:?} to {:?}", first, coords);
                Reselected(coords)
            }
        })
    }

    /// Swaps two cells directly, bypassing the selection gesture.
    ///
    /// Any pending selection is dropped, even when the cells are not adjacent.
    pub fn attempt_swap(&mut self, a: Coord2, b: Coord2) -> Result<SwapOutcome> {
        let a = self.grid.validate_coords(a)?;
        let b = self.grid.validate_coords(b)?;

        if !is_adjacent(a, b) {
            self.selection = None;
            return Ok(SwapOutcome::NotAdjacent);
        }
        self.swap_and_resolve(a, b)
    }

    /// Resolves whatever matches the current board holds, crediting them to the score.
    ///
    /// Generated boards are settled on construction unless `settle_on_start` is off.
    pub fn settle(&mut self) -> ResolveReport {
        let report = self.resolve();
        self.score += report.score_delta;
        report
    }

    pub fn valid_moves(&self) -> Vec<SwapMove> {
        find_valid_moves(&self.grid)
    }

    pub fn has_valid_move(&self) -> bool {
        has_valid_move(&self.grid)
    }

    /// Passes of the last resolution that cleared anything, empty unless `record_cascade` is set.
    pub fn take_cascade(&mut self) -> Vec<CascadePass> {
        mem::take(&mut self.cascade)
    }

    fn swap_and_resolve(&mut self, a: Coord2, b: Coord2) -> Result<SwapOutcome> {
        self.selection = None;
        self.grid.swap(a, b)?;

        let report = self.resolve();
        if report.passes == 0 {
            self.grid.swap(a, b)?;
            log::debug!("Swap {:?} <-> {:?} made no match, reverted", a, b);
            return Ok(SwapOutcome::Reverted);
        }

        self.score += report.score_delta;
        log::debug!(
            "Swap {:?} <-> {:?} scored {} over {} passes, total {}",
            a,
            b,
            report.score_delta,
            report.passes,
            self.score
        );
        Ok(SwapOutcome::Accepted(report))
    }

    fn resolve(&mut self) -> ResolveReport {
        let tiles = &self.config.tiles;
        if !self.config.record_cascade {
            return self.engine.resolve(&mut self.grid, tiles, &mut self.source);
        }

        let (report, cascade) = self.engine.resolve_traced(&mut self.grid, tiles, &mut self.source);
        // a reverted swap keeps the previous trace
        if report.passes > 0 {
            self.cascade = cascade;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileKind::*;

    /// Board without matches where swapping (0, 2) and (0, 3) lines up three apples.
    fn one_move_grid() -> Grid {
        Grid::from_rows(&[
            [Apple, Apple, Grape, Apple],
            [Grape, Orange, Lemon, Cherry],
            [Lemon, Grape, Orange, Lemon],
            [Orange, Lemon, Grape, Apple],
        ])
        .unwrap()
    }

    fn session(grid: Grid, refill: &[TileKind]) -> GameSession<ScriptedTileSource> {
        let config = GameConfig::new(grid.size(), TileSet::standard());
        let source = ScriptedTileSource::new(refill).unwrap();
        GameSession::from_grid(config, grid, source).unwrap()
    }

    #[test]
    fn first_pick_selects() {
        let mut session = session(one_move_grid(), &[Strawberry]);

        let outcome = session.select((0, 2)).unwrap();

        assert_eq!(outcome, SelectOutcome::Selected((0, 2)));
        assert_eq!(session.state(), SessionState::AwaitingSecondPick);
        assert_eq!(session.selection(), Some((0, 2)));
    }

    #[test]
    fn non_adjacent_pick_moves_selection() {
        let mut session = session(one_move_grid(), &[Strawberry]);
        session.select((0, 0)).unwrap();

        let outcome = session.select((0, 2)).unwrap();

        assert_eq!(outcome, SelectOutcome::Reselected((0, 2)));
        assert_eq!(session.selection(), Some((0, 2)));
        assert_eq!(session.grid(), &one_move_grid());
    }

    #[test]
    fn swap_without_match_is_reverted() {
        let mut session = session(one_move_grid(), &[Strawberry]);
        session.select((1, 0)).unwrap();

        let outcome = session.select((1, 1)).unwrap();

        assert_eq!(outcome, SelectOutcome::Swapped(SwapOutcome::Reverted));
        assert_eq!(session.grid(), &one_move_grid());
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn swap_with_match_scores_and_refills() {
        let mut session = session(one_move_grid(), &[Strawberry, Cherry, Strawberry]);
        session.select((0, 2)).unwrap();

        let outcome = session.select((0, 3)).unwrap();

        assert!(outcome.swap_accepted());
        assert_eq!(outcome.score_delta(), POINTS_PER_MATCH);
        assert_eq!(session.score(), POINTS_PER_MATCH);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.grid().is_full());
        assert!(!has_match(session.grid()));
        // the grape that moved over stays put
        assert_eq!(session.grid()[(0, 3)], Cell::Tile(Grape));
    }

    #[test]
    fn out_of_bounds_pick_fails_without_side_effects() {
        let mut session = session(one_move_grid(), &[Strawberry]);
        session.select((0, 0)).unwrap();

        assert_eq!(session.select((4, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.selection(), Some((0, 0)));
    }

    #[test]
    fn direct_swap_of_distant_cells_is_not_adjacent() {
        let mut session = session(one_move_grid(), &[Strawberry]);
        session.select((3, 3)).unwrap();

        let outcome = session.attempt_swap((0, 0), (0, 2)).unwrap();

        assert_eq!(outcome, SwapOutcome::NotAdjacent);
        assert_eq!(session.selection(), None);
        assert_eq!(session.grid(), &one_move_grid());
    }

    #[test]
    fn settle_clears_initial_matches() {
        let grid = Grid::from_rows(&[
            [Apple, Grape, Orange, Apple],
            [Grape, Orange, Apple, Grape],
            [Apple, Grape, Orange, Apple],
            [Grape, Grape, Grape, Orange],
        ])
        .unwrap();
        let mut session = session(grid, &[Lemon, Cherry, Strawberry]);

        let report = session.settle();

        assert_eq!(report.passes, 1);
        assert_eq!(session.score(), POINTS_PER_MATCH);
        assert!(!has_match(session.grid()));
    }

    #[test]
    fn cascade_is_recorded_when_enabled() {
        let config = GameConfig {
            size: 4,
            record_cascade: true,
            ..Default::default()
        };
        let source = ScriptedTileSource::new(&[Strawberry, Cherry, Strawberry]).unwrap();
        let mut session = GameSession::from_grid(config, one_move_grid(), source).unwrap();

        session.attempt_swap((0, 2), (0, 3)).unwrap();
        let cascade = session.take_cascade();

        assert_eq!(cascade.len(), 1);
        assert_eq!(&cascade[0].grid, session.grid());
        assert!(session.take_cascade().is_empty());
    }

    #[test]
    fn reverted_swap_keeps_last_cascade() {
        let config = GameConfig {
            size: 4,
            record_cascade: true,
            ..Default::default()
        };
        let source = ScriptedTileSource::new(&[Strawberry, Cherry, Strawberry]).unwrap();
        let mut session = GameSession::from_grid(config, one_move_grid(), source).unwrap();
        assert!(session.attempt_swap((0, 2), (0, 3)).unwrap().has_update());

        let outcome = session.attempt_swap((3, 0), (3, 1)).unwrap();

        assert_eq!(outcome, SwapOutcome::Reverted);
        let cascade = session.take_cascade();
        assert_eq!(cascade.len(), 1);
        assert_eq!(cascade[0].matches[0].kind, Apple);
    }

    #[test]
    fn from_grid_rejects_kinds_outside_tile_set() {
        let config = GameConfig::new(4, TileSet::first(3).unwrap());
        let source = ScriptedTileSource::new(&[Apple]).unwrap();

        assert_eq!(
            GameSession::from_grid(config, one_move_grid(), source).err(),
            Some(GameError::UnknownTileKind)
        );
    }

    #[test]
    fn generated_games_open_without_matches() {
        for seed in 0..50 {
            let session = GameSession::new(GameConfig::default(), seed).unwrap();

            assert!(!has_match(session.grid()), "seed {seed} opened with a match");
        }
    }

    #[test]
    fn swapping_identical_tiles_is_reverted_on_a_fresh_game() {
        for seed in 0..50 {
            let mut session = GameSession::new(GameConfig::default(), seed).unwrap();
            let size = session.size();
            let pair = (0..size)
                .flat_map(|row| (0..size - 1).map(move |col| ((row, col), (row, col + 1))))
                .find(|&(a, b)| session.grid()[a] == session.grid()[b]);
            let Some((a, b)) = pair else {
                continue;
            };
            let before = session.grid().clone();
            let score = session.score();

            let outcome = session.attempt_swap(a, b).unwrap();

            assert_eq!(outcome, SwapOutcome::Reverted, "seed {seed}");
            assert_eq!(session.grid(), &before);
            assert_eq!(session.score(), score);
        }
    }

    #[test]
    fn opening_matches_stay_when_settling_is_off() {
        let config = GameConfig {
            settle_on_start: false,
            ..Default::default()
        };
        let unsettled = (0..50).filter(|&seed| {
            let session = GameSession::new(config.clone(), seed).unwrap();
            session.score() == 0 && has_match(session.grid())
        });

        assert!(unsettled.count() > 0);
    }

    #[test]
    fn from_grid_rejects_size_mismatch() {
        let config = GameConfig::new(5, TileSet::standard());
        let source = ScriptedTileSource::new(&[Apple]).unwrap();

        assert_eq!(
            GameSession::from_grid(config, one_move_grid(), source).err(),
            Some(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn seeded_sessions_deal_the_same_board() {
        let a = GameSession::new(GameConfig::default(), 1234).unwrap();
        let b = GameSession::new(GameConfig::default(), 1234).unwrap();

        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.size(), DEFAULT_SIZE);
    }

    #[test]
    fn construction_rejects_bad_config() {
        let config = GameConfig::new(2, TileSet::standard());

        assert_eq!(GameSession::new(config, 0).err(), Some(GameError::BoardTooSmall));
    }
}
