use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of resolving a board until it is stable or the pass cap stops it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveReport {
    pub score_delta: Score,
    /// Passes that cleared at least one match, zero when the board was already stable.
    pub passes: PassCount,
    /// The cap stopped the loop while matches were still on the board.
    pub cap_reached: bool,
}

/// One clear, fall and refill step of a cascade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadePass {
    /// 1-based pass number.
    pub pass: PassCount,
    pub matches: Vec<Match>,
    pub score_delta: Score,
    /// Board after the refill of this pass.
    pub grid: Grid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEngine {
    points_per_match: Score,
    pass_cap: PassCount,
}

impl ResolutionEngine {
    pub const fn new(points_per_match: Score, pass_cap: PassCount) -> Self {
        Self {
            points_per_match,
            pass_cap,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.points_per_match, config.effective_pass_cap())
    }

    pub const fn points_per_match(&self) -> Score {
        self.points_per_match
    }

    pub const fn pass_cap(&self) -> PassCount {
        self.pass_cap
    }

    /// Clears matches, lets tiles fall and refills until no match is left.
    pub fn resolve<S>(&self, grid: &mut Grid, tiles: &TileSet, source: &mut S) -> ResolveReport
    where
        S: TileSource + ?Sized,
    {
        self.run(grid, tiles, source, |_, _, _, _| {})
    }

    /// Same as [`Self::resolve`] but also returns a snapshot of every pass.
    pub fn resolve_traced<S>(
        &self,
        grid: &mut Grid,
        tiles: &TileSet,
        source: &mut S,
    ) -> (ResolveReport, Vec<CascadePass>)
    where
        S: TileSource + ?Sized,
    {
        let mut trace = Vec::new();
        let report = self.run(grid, tiles, source, |pass, matches, score_delta, grid| {
            trace.push(CascadePass {
                pass,
                matches,
                score_delta,
                grid: grid.clone(),
            });
        });
        (report, trace)
    }

    fn run<S, F>(&self, grid: &mut Grid, tiles: &TileSet, source: &mut S, mut on_pass: F) -> ResolveReport
    where
        S: TileSource + ?Sized,
        F: FnMut(PassCount, Vec<Match>, Score, &Grid),
    {
        let mut report = ResolveReport::default();

        loop {
            let matches = find_matches(grid);
            if matches.is_empty() {
                break;
            }
            if report.passes >= self.pass_cap {
                log::warn!(
                    "Cascade stopped after {} passes with {} matches left",
                    report.passes,
                    matches.len()
                );
                report.cap_reached = true;
                break;
            }

            // every match of the pass is credited before anything is cleared
            let match_count = Score::try_from(matches.len()).unwrap_or(Score::MAX);
            let pass_delta = self.points_per_match.saturating_mul(match_count);
            report.score_delta = report.score_delta.saturating_add(pass_delta);

            let cleared = grid.clear_all(matched_cells(&matches));
            debug_assert!(cleared.is_ok(), "matches outside the board");
            grid.compact();
            let filled = grid.fill_empties(tiles, source);
            report.passes += 1;

            log::trace!(
                "Cascade pass {}: {} matches, {} cells refilled, +{}",
                report.passes,
                matches.len(),
                filled,
                pass_delta
            );
            on_pass(report.passes, matches, pass_delta, grid);
        }

        report
    }
}
