// Signing & recovery benchmarks for the transfer protocol.
//
// Covers secp256k1 keypair generation, canonical encoding, keccak digesting
// with and without the stamp, digest signing, and identity recovery.

use criterion::{criterion_group, criterion_main, Criterion};

use transfer_protocol::crypto::hash::{keccak256, message_digest, stamped_digest};
use transfer_protocol::crypto::keys::TransferKeypair;
use transfer_protocol::crypto::signatures::{recover_identity, sign_digest};
use transfer_protocol::transaction::signing::sign_transfer;
use transfer_protocol::transaction::types::TransferRecord;

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/keypair_generate", |b| {
        b.iter(TransferKeypair::generate);
    });
}

fn bench_canonical_encoding(c: &mut Criterion) {
    let record = TransferRecord::new("Bill", "Aaron", 1000);

    c.bench_function("transfer/canonical_bytes", |b| {
        b.iter(|| record.canonical_bytes().unwrap());
    });
}

fn bench_digest(c: &mut Criterion) {
    let record = TransferRecord::new("Bill", "Aaron", 1000);
    let canonical = record.canonical_bytes().unwrap();

    c.bench_function("keccak/raw_digest", |b| {
        b.iter(|| keccak256(&canonical));
    });

    c.bench_function("keccak/stamped_digest", |b| {
        b.iter(|| stamped_digest(&canonical));
    });
}

fn bench_sign_digest(c: &mut Criterion) {
    let keypair = TransferKeypair::generate();
    let digest = stamped_digest(b"transfer 500 from alice to bob");

    c.bench_function("secp256k1/sign_digest", |b| {
        b.iter(|| sign_digest(&digest, &keypair).unwrap());
    });
}

fn bench_recover_identity(c: &mut Criterion) {
    let keypair = TransferKeypair::generate();
    let digest = stamped_digest(b"transfer 500 from alice to bob");
    let signature = sign_digest(&digest, &keypair).unwrap();

    c.bench_function("secp256k1/recover_identity", |b| {
        b.iter(|| recover_identity(&digest, &signature).unwrap());
    });
}

fn bench_sign_transfer_end_to_end(c: &mut Criterion) {
    let keypair = TransferKeypair::generate();
    let record = TransferRecord::new("Bill", "Aaron", 1000);

    c.bench_function("transfer/sign_end_to_end", |b| {
        b.iter(|| sign_transfer(&record, &keypair, true).unwrap());
    });
}

fn bench_unstamped_vs_stamped(c: &mut Criterion) {
    let canonical = TransferRecord::new("Bill", "Aaron", 1000)
        .canonical_bytes()
        .unwrap();

    c.bench_function("keccak/message_digest_stamped", |b| {
        b.iter(|| message_digest(&canonical, true));
    });

    c.bench_function("keccak/message_digest_unstamped", |b| {
        b.iter(|| message_digest(&canonical, false));
    });
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_canonical_encoding,
    bench_digest,
    bench_sign_digest,
    bench_recover_identity,
    bench_sign_transfer_end_to_end,
    bench_unstamped_vs_stamped,
);
criterion_main!(benches);
