use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use courtside::{
    Competitor, Court, GroupingEngine, PairingEngine, RoundRobinEngine, RoundRobinOptions,
    SchedulingConstraints, SchedulingEngine,
    round_robin::DynamicKnockout,
    security::MatchCodeRegistry,
};
use std::hint::black_box;

/// Helper to build a field spread over `clubs` clubs
fn field(n: usize, clubs: usize) -> Vec<Competitor> {
    (0..n)
        .map(|i| Competitor::new(format!("p{i}"), format!("Player {i:03}"), 16, format!("club-{}", i % clubs)))
        .collect()
}

/// Field where one club dominates, the slow case for the pairing search
fn lopsided_field(n: usize) -> Vec<Competitor> {
    (0..n)
        .map(|i| {
            let club = if i % 3 == 0 { format!("small-{i}") } else { "big".to_string() };
            Competitor::new(format!("p{i}"), format!("Player {i:03}"), 16, club)
        })
        .collect()
}

fn bench_grouping(c: &mut Criterion) {
    let competitors = field(256, 12);
    c.bench_function("group_256_into_16", |b| {
        b.iter(|| GroupingEngine::new().group(black_box(&competitors), 16))
    });
}

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing");
    let engine = PairingEngine::new();

    for size in [8, 16, 24, 32] {
        let balanced = field(size, 4);
        group.bench_with_input(BenchmarkId::new("balanced", size), &balanced, |b, f| {
            b.iter(|| engine.pair(black_box(f)))
        });

        let lopsided = lopsided_field(size);
        group.bench_with_input(BenchmarkId::new("lopsided", size), &lopsided, |b, f| {
            b.iter(|| engine.pair(black_box(f)))
        });
    }

    group.finish();
}

fn bench_round_robin(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_robin");
    let engine = RoundRobinEngine::new();

    for size in [8, 32, 64] {
        let competitors = field(size, 5);
        group.bench_with_input(BenchmarkId::new("standard", size), &competitors, |b, f| {
            b.iter(|| engine.generate(black_box(f), &RoundRobinOptions::default()))
        });
    }

    let competitors = field(32, 5);
    let options = RoundRobinOptions::dynamic(DynamicKnockout::new(2, 4, 8));
    group.bench_function("dynamic_knockout_32", |b| {
        b.iter(|| {
            let mut resolver = |f: &courtside::Fixture| Some((f.home.name.len() as u32, f.away.id.len() as u32));
            engine.generate_with_results(black_box(&competitors), &options, &mut resolver)
        })
    });

    group.finish();
}

fn bench_scheduling(c: &mut Criterion) {
    let fixtures = RoundRobinEngine::new()
        .generate(&field(24, 6), &RoundRobinOptions::default())
        .map(|r| r.rounds.concat())
        .unwrap_or_default();
    let courts: Vec<_> = (0..6).map(|i| Court::new(format!("c{i}"), format!("Court {i}"))).collect();
    let start = NaiveDate::from_ymd_opt(2025, 1, 4)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    c.bench_function("schedule_276_matches_6_courts", |b| {
        b.iter(|| {
            SchedulingEngine::new(SchedulingConstraints::default())
                .schedule(black_box(&fixtures), &courts, start)
        })
    });
}

fn bench_match_codes(c: &mut Criterion) {
    let ids = vec!["a".to_string(), "b".to_string()];
    c.bench_function("issue_and_consume_code", |b| {
        let mut registry = MatchCodeRegistry::new();
        b.iter(|| {
            if let Ok(issued) = registry.issue("m", &ids, Some("c1"), "t") {
                let _ = registry.consume(black_box(&issued.code));
            }
        })
    });
}

criterion_group!(
    fixture_generation,
    bench_grouping,
    bench_pairing,
    bench_round_robin,
);

criterion_group!(allocation, bench_scheduling, bench_match_codes);

criterion_main!(fixture_generation, allocation);
