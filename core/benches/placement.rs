use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minegrid_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const TIERS: [(&str, Dim, Dim, usize); 3] = [
    ("beginner", 9, 9, 10),
    ("intermediate", 16, 16, 40),
    ("expert", 16, 30, 99),
];

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for (name, rows, columns, mines) in TIERS {
        let config = GameConfig::new(rows, columns, mines).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        group.bench_function(name, |b| {
            b.iter(|| place_mines(black_box(config), 0, &mut rng).unwrap())
        });
    }
    group.finish();
}

fn first_click(c: &mut Criterion) {
    // a single mine in the corner: the first click floods the whole grid
    let config = GameConfig::new(200, 200, 1).unwrap();
    c.bench_function("flood_200x200", |b| {
        b.iter(|| {
            let mut game = Game::with_generator(PresetMineGenerator::new([39_999]));
            game.start(config).unwrap();
            black_box(game.open(0).unwrap())
        })
    });
}

criterion_group!(benches, placement, first_click);
criterion_main!(benches);
