// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap basics.
//!
//! Lay out a small directory-like hierarchy, hit-test a point, and render it with and
//! without a category highlight.
//!
//! Run:
//! - `cargo run -p understory_demos --example treemap_basics`

use kurbo::Point;
use understory_treemap::{
    Category, ColorAssigner, Highlight, Node, NodeCategory, Options, PixelRect, Style, Treemap,
};

fn main() {
    let root = Node::container(vec![
        Node::container(vec![
            Node::leaf(4_200, "rs"),
            Node::leaf(1_300, "toml"),
            Node::leaf(0, "lock"),
        ]),
        Node::leaf(9_000, "png"),
        Node::container(vec![Node::leaf(2_500, "rs"), Node::leaf(800, "md")]),
        Node::leaf_with(1_000, NodeCategory::FreeSpace),
    ]);

    let options = Options {
        style: Style::Squarified,
        grid: true,
        ..Default::default()
    };
    let mut treemap = Treemap::new();
    treemap.layout_with(&root, PixelRect::from_size(320, 200), &options);
    println!("{treemap:?}");

    for leaf in treemap.leaves() {
        println!(
            "leaf {:?}: rect {:?}, depth {:?}",
            treemap.item_path(leaf).unwrap_or_default(),
            treemap.rect(leaf),
            treemap.depth(leaf)
        );
    }

    // The zero-weight file is still addressable, just without area.
    let lock = treemap.node_for_item_path(&[0, 2]).unwrap();
    assert!(treemap.rect(lock).unwrap().is_empty());

    let hit = treemap.hit_test_point(Point::new(10.0, 10.0)).unwrap();
    println!("hit {:?} via {} nodes", treemap.item_path(hit.node), hit.path.len());
    assert_eq!(hit.path.first().copied(), treemap.root());

    // Rank tags by aggregate size so the largest gets the first palette color.
    let mut colors = ColorAssigner::default();
    colors.set_ranking(["png", "rs", "toml", "md"]);

    let plain = treemap.render(&options, &colors, &Highlight::None);
    let lit = treemap.render(&options, &colors, &Highlight::Category(Category::Tag("rs")));
    let changed = plain
        .pixels()
        .iter()
        .zip(lit.pixels())
        .filter(|(a, b)| a != b)
        .count();
    println!(
        "rendered {}x{}; highlighting \"rs\" changed {changed} pixels",
        plain.width(),
        plain.height()
    );
    assert!(changed > 0, "highlight should recolor the rs leaves");
}
