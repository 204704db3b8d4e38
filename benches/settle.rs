use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

use poker_night::core::Money;
use poker_night::settlement::{Balance, settle};

/// `count` random balances that sum to zero.
fn make_balances(count: usize, seed: u64) -> Vec<Balance> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut balances: Vec<Balance> = (0..count - 1)
        .map(|idx| {
            Balance::new(
                format!("player-{idx}"),
                Money::from_cents(rng.random_range(-100_000..100_000)),
            )
        })
        .collect();
    let total: Money = balances.iter().map(|b| b.net).sum();
    balances.push(Balance::new("last", -total));
    balances
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle");

    for count in [4, 10, 50, 500] {
        let balances = make_balances(count, 420);
        group.bench_with_input(BenchmarkId::new("greedy", count), &balances, |b, balances| {
            b.iter(|| settle(std::hint::black_box(balances)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_settle);
criterion_main!(benches);
