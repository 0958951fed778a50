// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pegdesign::{PamMotif, ParallelKernel, ScalarKernel, ScanKernel};

fn random_dna(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

fn bench_scan(c: &mut Criterion) {
    let seq = random_dna(1_000_000);
    let motif = PamMotif::parse("NGG").unwrap();

    let mut group = c.benchmark_group("find_pam_sites_1mb");
    group.bench_function("scalar", |b| {
        b.iter(|| ScalarKernel.find_pam_sites(black_box(&seq), &motif))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| ParallelKernel.find_pam_sites(black_box(&seq), &motif))
    });
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
