// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_treemap::{Node, PixelRect, Style, Treemap, layout};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// A directory-like tree: `fanout` children per level, heavy-tailed leaf sizes.
fn gen_tree(rng: &mut Rng, depth: u32, fanout: usize) -> Node {
    if depth == 0 {
        let size = 1_i64 << (rng.next_u64() % 24);
        return Node::leaf(size + (rng.next_u64() % 1024) as i64, "bin");
    }
    let children = (0..fanout)
        .map(|i| {
            if i % 3 == 0 {
                Node::leaf((rng.next_u64() % 65_536) as i64, "txt")
            } else {
                gen_tree(rng, depth - 1, fanout)
            }
        })
        .collect();
    Node::container(children)
}

fn gen_sorted_weights(rng: &mut Rng, n: usize) -> Vec<u64> {
    let mut w: Vec<u64> = (0..n).map(|_| 1 + rng.next_u64() % 1_000_000).collect();
    w.sort_unstable_by(|a, b| b.cmp(a));
    w
}

fn bench_packers(c: &mut Criterion) {
    let mut group = c.benchmark_group("packers");
    let bounds = PixelRect::from_size(1920, 1080).to_rect();
    for &n in &[16usize, 256, 4096] {
        let weights = gen_sorted_weights(&mut Rng::new(0xCAFE_F00D_DEAD_BEEF), n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("squarify_n{}", n), |b| {
            b.iter(|| black_box(layout::squarify(black_box(&weights), bounds)))
        });
        group.bench_function(format!("classic_n{}", n), |b| {
            b.iter(|| black_box(layout::classic(black_box(&weights), bounds, true)))
        });
    }
    group.finish();
}

fn bench_tree_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_layout");
    for &(depth, fanout) in &[(3u32, 8usize), (4, 10)] {
        let tree = gen_tree(&mut Rng::new(0xBADC_F00D_1234_5678), depth, fanout);
        for style in [Style::Classic, Style::Squarified] {
            let mut treemap = Treemap::new();
            group.bench_function(format!("{style:?}_d{depth}_f{fanout}"), |b| {
                b.iter(|| {
                    treemap.layout(&tree, PixelRect::from_size(1920, 1080), style);
                    black_box(treemap.len());
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_packers, bench_tree_layout);
criterion_main!(benches);
