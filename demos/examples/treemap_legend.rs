// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend swatches.
//!
//! Render one preview swatch per palette color and check that each matches a leaf of
//! the same size and color in a real treemap.
//!
//! Run:
//! - `cargo run -p understory_demos --example treemap_legend`

use understory_treemap::{
    ColorAssigner, DEFAULT_PALETTE, Highlight, Node, Options, PREVIEW_SIZE, PixelRect, Style,
    Treemap, render_preview,
};

fn main() {
    let options = Options::default();
    let (w, h) = PREVIEW_SIZE;

    let tags: Vec<String> = (0..DEFAULT_PALETTE.len()).map(|i| format!("tag{i}")).collect();
    let mut colors = ColorAssigner::default();
    colors.set_ranking(tags.iter().map(String::as_str));

    for (rank, color) in DEFAULT_PALETTE.iter().copied().enumerate() {
        let swatch = render_preview(color, &options);

        let mut single = Treemap::new();
        single.layout(
            &Node::container(vec![Node::leaf(1, tags[rank].as_str())]),
            PixelRect::from_size(w, h),
            Style::Classic,
        );
        let leaf = single.render(&options, &colors, &Highlight::None);

        println!("rank {rank:2}: {color:?} -> corner {:?}", swatch.pixels().first());
        assert_eq!(swatch, leaf, "swatch and leaf differ for rank {rank}");
    }
}
