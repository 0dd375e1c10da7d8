//! # Parcel-Chain Ledger Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | transfer | One batch write per call, independent of history length |
//! | split | Linear in allocation count |
//! | verify_chain | Linear in event count |
//! | authenticate | One Ed25519 strict verification |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pc_01_identity::{Ed25519IdentityAdapter, IdentityAdapter, RequestSigner};
use pc_03_property_ledger::{
    Allocation, LedgerConfig, PropertyRegistryApi, ProvenanceLogApi, ShareLedgerApi,
};
use pc_tests::fixtures::{make_ledger, metadata_h1, TestLedger};
use rand::Rng;
use shared_types::{Address, PropertyId};
use std::time::Duration;

const OWNER: Address = Address([0x01; 20]);

/// Large enough that no benchmark run drains the owner.
const BENCH_DENOMINATOR: u64 = 1 << 40;

fn ledger_with_property() -> (TestLedger, PropertyId) {
    let (mut ledger, _, docs1) =
        make_ledger(LedgerConfig::default().with_denominator(BENCH_DENOMINATOR));
    let p = ledger
        .create(OWNER, metadata_h1(), docs1)
        .expect("fixture property");
    (ledger, p)
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-03-transfer");
    group.measurement_time(Duration::from_secs(5));

    let (mut ledger, p) = ledger_with_property();
    let mut rng = rand::thread_rng();

    group.bench_function("transfer_one_unit", |b| {
        b.iter(|| {
            let to = Address([rng.gen_range(2..=255u8); 20]);
            ledger
                .transfer(p, OWNER, black_box(to), 1)
                .expect("owner holds enough units");
        })
    });

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-03-split");

    for legs in [1usize, 8, 64] {
        let allocations: Vec<_> = (0..legs)
            .map(|i| Allocation::new(Address([(i % 250) as u8 + 2; 20]), 1))
            .collect();
        let (mut ledger, p) = ledger_with_property();

        group.throughput(Throughput::Elements(legs as u64));
        group.bench_with_input(BenchmarkId::new("split", legs), &allocations, |b, allocations| {
            b.iter(|| {
                ledger
                    .split(p, OWNER, black_box(allocations))
                    .expect("owner holds enough units")
            })
        });
    }

    group.finish();
}

fn bench_verify_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-03-verify-chain");

    for events in [10usize, 100, 1_000] {
        let (mut ledger, p) = ledger_with_property();
        for i in 1..events {
            let to = Address([(i % 250) as u8 + 2; 20]);
            ledger.transfer(p, OWNER, to, 1).expect("owner holds enough units");
        }

        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::new("verify_chain", events), &p, |b, p| {
            b.iter(|| assert!(ledger.verify_chain(*p).expect("chain readable")))
        });
    }

    group.finish();
}

fn bench_authenticate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-01-identity");

    let signer = RequestSigner::from_seed([7; 32]);
    let adapter = Ed25519IdentityAdapter::new();
    let request = signer.sign(vec![0x42; 128]);

    group.bench_function("authenticate", |b| {
        b.iter(|| black_box(adapter.authenticate(&request).is_ok()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_transfer,
    bench_split,
    bench_verify_chain,
    bench_authenticate
);
criterion_main!(benches);
