// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_treemap::{
    Category, Color, ColorAssigner, Highlight, Node, Options, PixelBuffer, PixelRect, Style,
    Treemap,
};

const TAGS: [&str; 6] = ["rs", "png", "txt", "md", "toml", "bin"];

fn gen_tree(depth: u32, fanout: usize, salt: usize) -> Node {
    if depth == 0 {
        return Node::leaf(((salt * 7919) % 10_000 + 1) as i64, TAGS[salt % TAGS.len()]);
    }
    Node::container(
        (0..fanout)
            .map(|i| gen_tree(depth - 1, fanout, salt * fanout + i))
            .collect(),
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let (w, h) = (1280u32, 800u32);
    group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));

    let tree = gen_tree(3, 9, 1);
    let mut treemap = Treemap::new();
    treemap.layout(&tree, PixelRect::from_size(w, h), Style::Squarified);
    let mut colors = ColorAssigner::default();
    colors.set_ranking(TAGS);

    let cushions = Options::default();
    let flat = Options {
        height: 0,
        ..Default::default()
    };
    let grid = Options {
        grid: true,
        ..Default::default()
    };
    for (name, options) in [("cushion", cushions), ("flat", flat), ("grid", grid)] {
        let mut target = PixelBuffer::new(w, h, Color::BLACK);
        group.bench_function(name, |b| {
            b.iter(|| {
                treemap.render_into(&mut target, &options, &colors, &Highlight::None);
                black_box(target.pixels().len());
            })
        });
    }

    let mut target = PixelBuffer::new(w, h, Color::BLACK);
    group.bench_function("category_highlight", |b| {
        b.iter(|| {
            treemap.render_into(
                &mut target,
                &cushions,
                &colors,
                &Highlight::Category(Category::Tag("rs")),
            );
            black_box(target.pixels().len());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
