use bank_seed::config::RecordCounts;
use bank_seed::generator::Generator;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn scaled(factor: usize) -> RecordCounts {
    RecordCounts {
        branches: factor,
        employees: 10 * factor,
        customers: 160 * factor,
        accounts: 240 * factor,
        transactions: 800 * factor,
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for factor in [1, 5, 25] {
        let counts = scaled(factor);
        group.throughput(Throughput::Elements(counts.total() as u64));
        group.bench_with_input(
            BenchmarkId::new("dataset", format!("{}_rows", counts.total())),
            &counts,
            |b, &counts| b.iter(|| black_box(Generator::new(42, counts).generate().unwrap())),
        );
    }

    group.finish();
}

fn bench_unique_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_columns");
    let counts = RecordCounts {
        branches: 5,
        employees: 50,
        customers: 5000,
        accounts: 0,
        transactions: 0,
    };
    group.throughput(Throughput::Elements(counts.customers as u64));

    group.bench_function("customers_with_unique_email_and_ssn", |b| {
        b.iter(|| black_box(Generator::new(7, counts).generate().unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_unique_columns);

criterion_main!(benches);
