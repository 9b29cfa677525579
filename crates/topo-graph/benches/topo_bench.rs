use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, Criterion};
use topo_graph::{render, topo_sort, GraphBuilder};
use topo_hash::ObjectId;
use topo_ref::BranchMap;

fn oid(n: u32) -> ObjectId {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&n.wrapping_mul(2_654_435_761).to_be_bytes());
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    ObjectId::from_bytes(bytes)
}

/// A mainline of `len` commits with a two-commit side branch merged every 10.
fn synthetic_history(len: u32) -> (HashMap<ObjectId, Vec<ObjectId>>, BranchMap) {
    let mut parents = HashMap::new();
    let mut next_side = len;
    for i in 1..len {
        let mut ps = vec![oid(i - 1)];
        if i % 10 == 0 {
            let side_a = next_side;
            let side_b = next_side + 1;
            next_side += 2;
            parents.insert(oid(side_a), vec![oid(i - 5)]);
            parents.insert(oid(side_b), vec![oid(side_a)]);
            ps.push(oid(side_b));
        }
        parents.insert(oid(i), ps);
    }
    let mut branches = BranchMap::new();
    branches.insert(oid(len - 1), "main");
    branches.insert(oid(len / 2), "release");
    (parents, branches)
}

fn bench_build(c: &mut Criterion) {
    let (parents, branches) = synthetic_history(10_000);
    c.bench_function("build_10k", |b| {
        b.iter(|| GraphBuilder::new(&parents).build(&branches).unwrap())
    });
}

fn bench_sort_and_render(c: &mut Criterion) {
    let (parents, branches) = synthetic_history(10_000);
    let graph = GraphBuilder::new(&parents).build(&branches).unwrap();
    c.bench_function("topo_sort_10k", |b| b.iter(|| topo_sort(&graph).unwrap()));
    c.bench_function("render_10k", |b| {
        let order = topo_sort(&graph).unwrap();
        b.iter(|| render(&order))
    });
}

criterion_group!(benches, bench_build, bench_sort_and_render);
criterion_main!(benches);
