//! Benchmarks for address validation and allocation

use asset_inventory::validator::parse_ipv4;
use asset_inventory::{AddressPool, Department, DepartmentRegistry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::net::Ipv4Addr;

fn registry(allocated: u8) -> DepartmentRegistry {
    let registry = DepartmentRegistry::default();
    let dept = Department::parse("IT", "10.0.0.1-254")
        .unwrap()
        .with_allocated((1..=allocated).map(|n| Ipv4Addr::new(10, 0, 0, n)));
    registry.register(dept).unwrap();
    registry
}

/// Benchmark strict IPv4 parsing
fn bench_parse_ipv4(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ipv4");

    for candidate in ["192.168.1.10", "192.168.01.10", "not an address"] {
        group.bench_with_input(BenchmarkId::from_parameter(candidate), candidate, |b, s| {
            b.iter(|| parse_ipv4(black_box(s)))
        });
    }

    group.finish();
}

/// Benchmark full validation against a populated department
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for allocated in [0u8, 100, 250] {
        let registry = registry(allocated);
        group.bench_with_input(BenchmarkId::new("allocated", allocated), &registry, |b, r| {
            b.iter(|| r.validate(black_box("10.0.0.252"), black_box("IT")))
        });
    }

    group.finish();
}

/// Benchmark filling a department one address at a time
fn bench_fill_department(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_department");
    group.throughput(Throughput::Elements(254));

    group.bench_function("record_allocation", |b| {
        b.iter_batched(
            || registry(0),
            |registry| {
                for n in 1..=254u8 {
                    registry
                        .record_allocation("IT", Ipv4Addr::new(10, 0, 0, n))
                        .unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Benchmark free-address listing
fn bench_free_addresses(c: &mut Criterion) {
    let dept = Department::parse("IT", "10.0.0.1-254")
        .unwrap()
        .with_allocated((1..=200u8).map(|n| Ipv4Addr::new(10, 0, 0, n)));

    c.bench_function("free_addresses", |b| b.iter(|| black_box(&dept).free_addresses()));
}

criterion_group!(
    benches,
    bench_parse_ipv4,
    bench_validate,
    bench_fill_department,
    bench_free_addresses,
);
criterion_main!(benches);
