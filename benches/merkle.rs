use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use ledger_attest::{encode_record, verify_inclusion, MerkleTree};

fn make_leaves(count: usize) -> Vec<[u8; 32]> {
    (0..count)
        .map(|i| encode_record(&format!("0x{:040x}", i), (i as i64) * 10).expect("non-negative"))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let sizes = [256usize, 4096, 65_536];
    let mut group = c.benchmark_group("tree_build");
    for &size in &sizes {
        let leaves = make_leaves(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter_batched(
                || leaves.clone(),
                |leaves| MerkleTree::from_leaves(leaves).expect("non-empty"),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_prove(c: &mut Criterion) {
    let sizes = [256usize, 4096, 65_536];
    let mut group = c.benchmark_group("prove");
    for &size in &sizes {
        let leaves = make_leaves(size);
        let tree = MerkleTree::from_leaves(leaves.clone()).expect("non-empty");
        let target = leaves[size / 2];
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| tree.prove(&target).expect("present"));
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let sizes = [256usize, 4096, 65_536];
    let mut group = c.benchmark_group("verify");
    for &size in &sizes {
        let leaves = make_leaves(size);
        let tree = MerkleTree::from_leaves(leaves.clone()).expect("non-empty");
        let target = leaves[size / 2];
        let proof = tree.prove(&target).expect("present");
        let root = tree.root();
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(target, proof, root),
            |b, (leaf, proof, root)| {
                b.iter(|| verify_inclusion(leaf, proof, root));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_prove, bench_verify);
criterion_main!(benches);
