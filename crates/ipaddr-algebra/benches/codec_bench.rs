//! Performance benchmarks for the numeric string codec

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipaddr_algebra::codec::{render_division, render_range};
use ipaddr_algebra::{AddressKind, Division, DivisionGrouping, RenderOptions};
use num_bigint::BigUint;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Benchmark native-width rendering across radixes
fn bench_fixed_radix(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_fixed");
    let division = Division::new(0x1234_5678_9abc, 0x1234_5678_9abc, None, 48).unwrap();

    for radix in [2u32, 10, 16, 36, 85].iter() {
        let options = RenderOptions::default().with_radix(*radix);
        group.bench_with_input(BenchmarkId::new("radix", radix), radix, |b, _| {
            b.iter(|| black_box(render_division(black_box(&division), &options).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark big-integer rendering by halving
fn bench_large_radix(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_large");
    let value = BigUint::parse_bytes(b"20010db885a3000000008a2e03707334", 16).unwrap();

    for radix in [10u32, 16, 85].iter() {
        let options = RenderOptions::default().with_radix(*radix);
        group.bench_with_input(BenchmarkId::new("radix", radix), radix, |b, _| {
            b.iter(|| black_box(render_range(&value, &value, 128, &options).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark split-digit rendering of reverse DNS nibbles
fn bench_split_digits(c: &mut Criterion) {
    let options = RenderOptions::default()
        .with_radix(16)
        .with_expand(true)
        .with_split_digits(true)
        .with_reverse_digits(true);
    let division = Division::new(0x0d00, 0x0dff, None, 16).unwrap();

    c.bench_function("render_split_nibbles", |b| {
        b.iter(|| black_box(render_division(&division, &options).unwrap()));
    });
}

/// Benchmark canonical rendering of whole addresses
fn bench_canonical_groupings(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_grouping");
    let v4 = DivisionGrouping::from(Ipv4Addr::from_str("192.168.100.42").unwrap());
    let v6 = DivisionGrouping::from(Ipv6Addr::from_str("2001:db8:85a3::8a2e:370:7334").unwrap());
    let mac = DivisionGrouping::from_values(AddressKind::Mac, 6, |i| i as u64 * 17, |i| i as u64 * 17, None)
        .unwrap();

    group.throughput(Throughput::Elements(1));
    for (name, grouping) in [("ipv4", &v4), ("ipv6", &v6), ("mac", &mac)] {
        group.bench_function(name, |b| b.iter(|| black_box(grouping.to_string())));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fixed_radix,
    bench_large_radix,
    bench_split_digits,
    bench_canonical_groupings
);
criterion_main!(benches);
