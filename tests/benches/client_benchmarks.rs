//! # Mochimo Client Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Transport | envelope encode / decode with checksum |
//! | Registry | weighted sampling over large pools |
//! | Codec | block decode with a full body |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mc_01_transport::{checksum, Envelope, Opcode};
use mc_02_peer_registry::domain::weighted_sample;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_types::{
    Address, Block, BlockHeader, BlockTrailer, Destination, Peer, TxEntry, TxHeader, TxTrailer,
    WotsValidation,
};

// ============================================================================
// Transport
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc-01-envelope");

    for size in [0usize, 1024, 16 * 1024] {
        let env = Envelope::new(Opcode::SendFile).with_payload(vec![0xA5; size]);
        let bytes = env.encode().unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &env, |b, env| {
            b.iter(|| black_box(env.encode().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Envelope::decode(bytes).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("checksum", size), &bytes, |b, bytes| {
            b.iter(|| black_box(checksum(bytes)))
        });
    }
    group.finish();
}

// ============================================================================
// Registry
// ============================================================================

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc-02-sampling");

    for pool_size in [16usize, 256, 4096] {
        let pool: Vec<Peer> = (0..pool_size)
            .map(|i| {
                let host = format!("10.{}.{}.{}", i >> 16, (i >> 8) & 0xFF, i & 0xFF);
                Peer::with_latency(host, (i % 2000) as u32 + 1)
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        group.throughput(Throughput::Elements(pool_size as u64));
        group.bench_with_input(BenchmarkId::new("sample_10", pool_size), &pool, |b, pool| {
            b.iter(|| black_box(weighted_sample(pool, 10, &mut rng)))
        });
    }
    group.finish();
}

// ============================================================================
// Codec
// ============================================================================

fn tx(seed: u8) -> TxEntry {
    TxEntry {
        header: TxHeader {
            options: [0; 4],
            source: Address::new([seed; 20], [seed; 20]),
            change: Address::new([8; 20], [8; 20]),
            send_total: 10,
            change_total: 0,
            fee_total: 500,
            blocks_to_live: 0,
        },
        destinations: vec![Destination {
            tag: [7; 20],
            reference: [0; 16],
            amount: 10,
        }],
        wots: WotsValidation::default(),
        trailer: TxTrailer::default(),
    }
}

fn bench_block_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-block");

    for count in [1usize, 100, 1000] {
        let block = Block {
            header: BlockHeader {
                hdrlen: 32,
                miner_tag: [5; 20],
                miner_reward: 5_000_000_000,
            },
            body: (0..count).map(|i| tx(i as u8)).collect(),
            trailer: BlockTrailer::default(),
        };
        let bytes = block.encode().unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", count), &bytes, |b, bytes| {
            b.iter(|| black_box(Block::decode(bytes).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_envelope, bench_sampling, bench_block_decode);
criterion_main!(benches);
