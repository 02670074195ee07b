use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stockroom_amount_set::{AmountSet, ElementBehavior};

fn filled(size: u32) -> AmountSet<u32> {
    let mut set = AmountSet::new(ElementBehavior::natural());
    // Interleave so inserts land in the middle, not only at the tail.
    for n in (0..size).rev().step_by(2).chain((0..size).step_by(2)) {
        let _ = set.insert(&n);
    }
    set
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("amount_set_insert");
    for size in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(filled(size)));
        });
    }
    group.finish();
}

fn bench_change_amount(c: &mut Criterion) {
    let mut group = c.benchmark_group("amount_set_change_amount");
    for size in [100u32, 1_000, 10_000] {
        let mut set = filled(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                for n in (0..size).step_by(7) {
                    let _ = set.change_amount(black_box(&n), 1.0);
                }
            });
        });
    }
    group.finish();
}

fn bench_duplicate(c: &mut Criterion) {
    let set = filled(10_000);
    c.bench_function("amount_set_duplicate_10000", |b| {
        b.iter(|| black_box(set.duplicate()));
    });
}

criterion_group!(benches, bench_insert, bench_change_amount, bench_duplicate);
criterion_main!(benches);
