//! Performance benchmarks for CIDR block algebra and section derivations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ipaddr_algebra::{AddressComparator, AddressKind, DivisionGrouping};
use ipnet::{Ipv4Net, Ipv6Net};
use std::str::FromStr;

/// Benchmark minimal prefix and single-block detection
fn bench_block_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_queries");

    for prefix in [8u8, 20, 28].iter() {
        let net = Ipv4Net::from_str(&format!("10.100.0.0/{}", prefix)).unwrap();
        let grouping = DivisionGrouping::from(net);
        group.bench_with_input(BenchmarkId::new("ipv4_prefix", prefix), prefix, |b, _| {
            b.iter(|| {
                black_box((
                    grouping.min_prefix_len_for_block(),
                    grouping.prefix_len_for_single_block(),
                ))
            });
        });
    }

    let v6 = DivisionGrouping::from(Ipv6Net::from_str("2001:db8::/48").unwrap());
    group.bench_function("ipv6_prefix_48", |b| {
        b.iter(|| black_box(v6.prefix_len_for_single_block()));
    });

    group.finish();
}

/// Benchmark section derivations
fn bench_derivations(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivations");
    let addr = DivisionGrouping::from_values(
        AddressKind::V6,
        8,
        |i| 0x2001 + i as u64,
        |i| 0x2001 + i as u64,
        Some(52),
    )
    .unwrap();

    group.bench_function("network_section", |b| {
        b.iter(|| black_box(addr.network_section().unwrap()));
    });
    group.bench_function("to_zero_host", |b| {
        b.iter(|| black_box(addr.to_zero_host().unwrap()));
    });
    group.bench_function("to_prefix_block", |b| {
        b.iter(|| black_box(addr.to_prefix_block().unwrap()));
    });

    let mask = DivisionGrouping::network_mask(AddressKind::V6, 52).unwrap();
    group.bench_function("check_for_prefix_mask", |b| {
        b.iter(|| black_box(mask.check_for_prefix_mask()));
    });
    group.bench_function("mask", |b| {
        b.iter(|| black_box(addr.mask(&mask).unwrap()));
    });

    group.finish();
}

/// Benchmark sorting groupings
fn bench_sort(c: &mut Criterion) {
    let groupings: Vec<DivisionGrouping> = (0..256u64)
        .map(|i| {
            let ranges = [(10, 10), (i % 7, i % 7 + (i % 3)), (i, i), (0, 255)];
            DivisionGrouping::from_values(AddressKind::V4, 4, |d| ranges[d].0, |d| ranges[d].1, None)
                .unwrap()
        })
        .collect();

    c.bench_function("sort_256_groupings", |b| {
        b.iter_batched(
            || groupings.clone(),
            |mut batch| {
                AddressComparator::default().sort(&mut batch);
                black_box(batch)
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_block_queries, bench_derivations, bench_sort);
criterion_main!(benches);
