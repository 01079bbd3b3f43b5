use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use vitrine_core::engine::seeded_rng;
use vitrine_core::model::RankingEntity;
use vitrine_core::ranking::{PairwiseRanking, RankingConfig, Side};
use vitrine_core::rating::{elo_update, DEFAULT_K_FACTOR};

fn make_entities(n: usize) -> Vec<RankingEntity> {
    (0..n)
        .map(|i| RankingEntity::new(format!("e{i}"), format!("Entity {i}")))
        .collect()
}

fn bench_elo_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("elo_update");

    group.bench_function("equal", |b| {
        b.iter(|| elo_update(black_box(1500), black_box(1500), black_box(DEFAULT_K_FACTOR)))
    });

    group.bench_function("upset", |b| {
        b.iter(|| elo_update(black_box(1200), black_box(1800), black_box(DEFAULT_K_FACTOR)))
    });

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking_session");

    for n in [4, 20, 200] {
        let config = RankingConfig {
            max_rounds: 50,
            ..RankingConfig::default()
        };
        group.bench_function(format!("candidates={n},rounds=50"), |b| {
            b.iter_batched(
                || {
                    PairwiseRanking::with_rng(make_entities(n), config.clone(), seeded_rng(7))
                        .expect("valid ranking")
                },
                |mut ranking| {
                    while !ranking.finished() {
                        ranking.choose_side(Side::Left);
                    }
                    black_box(ranking.champion().map(|c| c.rating))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_elo_update, bench_full_session);
criterion_main!(benches);
