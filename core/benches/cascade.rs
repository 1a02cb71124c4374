use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fruitfall_core::*;

fn random_grid(size: Coord, seed: u64) -> Grid {
    let tiles = TileSet::standard();
    let mut grid = Grid::empty(size);
    grid.fill_empties(&tiles, &mut RandomTileSource::new(seed));
    grid
}

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    for size in [8, 16] {
        let grid = random_grid(size, 1);
        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter(|| find_matches(black_box(&grid)))
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let tiles = TileSet::standard();
    let engine = ResolutionEngine::new(POINTS_PER_MATCH, 64);
    let grid = random_grid(8, 2);

    c.bench_function("resolve_8x8", |b| {
        b.iter_batched(
            || (grid.clone(), RandomTileSource::new(3)),
            |(mut grid, mut source)| engine.resolve(&mut grid, &tiles, &mut source),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_valid_moves(c: &mut Criterion) {
    let config = GameConfig {
        start_board: StartBoard::MatchFree,
        ..Default::default()
    };
    let grid = RandomBoardGenerator::new(StartBoard::MatchFree).generate(&config, &mut RandomTileSource::new(4));

    c.bench_function("find_valid_moves_8x8", |b| {
        b.iter(|| find_valid_moves(black_box(&grid)))
    });
}

criterion_group!(benches, bench_find_matches, bench_resolve, bench_valid_moves);
criterion_main!(benches);
