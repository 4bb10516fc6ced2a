use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};
use rand::thread_rng;
use rayon::prelude::*;
use stake_voting::{cast_vote, decrypt, decrypt_parallel, Ciphertext, GroupParams, KeyPair, Vote};

fn create_votes(params: &GroupParams, keys: &KeyPair, num_voters: u64) -> Vec<Vote> {
    (0..num_voters)
        .into_par_iter()
        .map(|i| cast_vote(params, i % 2, &keys.public_key, &mut thread_rng()).unwrap())
        .collect()
}

fn benchmark_stake_voting(c: &mut Criterion) {
    let params = GroupParams::secp256r1();
    let keys = KeyPair::generate(&params, &mut thread_rng()).unwrap();

    let mut group = c.benchmark_group("Stake voting (P-256)");
    group.sample_size(10);

    group.bench_function("(Authority) key generation", |b| {
        b.iter(|| black_box(KeyPair::generate(&params, &mut thread_rng()).unwrap()));
    });

    for v in [0u64, 1] {
        group.bench_with_input(BenchmarkId::new("(Voter) encrypt + proof", v), &v, |b, v| {
            b.iter(|| black_box(cast_vote(&params, *v, &keys.public_key, &mut thread_rng()).unwrap()));
        });
    }

    let vote = cast_vote(&params, 1, &keys.public_key, &mut thread_rng()).unwrap();
    group.bench_function("(Ledger) proof verification", |b| {
        b.iter(|| assert!(vote.verify(&params, &keys.public_key)));
    });

    for num_voters in [100u64, 1_000] {
        let votes = create_votes(&params, &keys, num_voters);

        group.bench_with_input(BenchmarkId::new("(Ledger) batch verification", num_voters), &votes, |b, votes| {
            b.iter(|| assert!(votes.par_iter().all(|vote| vote.verify(&params, &keys.public_key))));
        });

        let tally: Ciphertext = votes.iter().map(|vote| vote.ciphertext).sum();
        group.bench_with_input(BenchmarkId::new("(Authority) tally decryption", num_voters), &tally, |b, tally| {
            b.iter(|| black_box(decrypt(&params, tally, keys.private_key(), num_voters).unwrap()));
        });

        for workers in [2usize, 8] {
            group.bench_with_input(
                BenchmarkId::new("(Authority) parallel tally decryption", format!("voters: {}, workers: {}", num_voters, workers)),
                &tally,
                |b, tally| {
                    b.iter(|| black_box(decrypt_parallel(&params, tally, keys.private_key(), num_voters, workers).unwrap()));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, benchmark_stake_voting);
criterion_main!(benches);
