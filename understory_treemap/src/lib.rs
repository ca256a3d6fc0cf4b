// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_treemap --heading-base-level=0

//! Understory Treemap: squarified and row-packed treemaps with cushion shading.
//!
//! Understory Treemap turns a weighted hierarchy (for example a directory tree with file sizes)
//! into nested rectangles whose areas are proportional to weight, and paints each leaf as a
//! shaded "cushion" so the nesting stays readable.
//!
//! - Lays out a hierarchy into device-pixel rectangles with [`Style::Squarified`] or
//!   [`Style::Classic`] packing.
//! - Renders the layout into an owned RGB [`PixelBuffer`] with configurable lighting, grid lines,
//!   and category or item highlights.
//! - Keeps the rectangle tree for hit testing until the next layout.
//!
//! ## Not a scanner or a widget
//!
//! This crate never walks a file system and never owns a window. The caller provides a read-only
//! snapshot through [`TreemapItem`], a viewport, and [`Options`], and gets pixels and a hit-test
//! structure back. Scheduling, caching frames, and blitting are up to the caller.
//!
//! ## API overview
//!
//! - [`Treemap`]: the laid-out rectangle tree.
//!   - [`Treemap::layout`] replaces the layout; [`NodeId`]s from earlier layouts become stale.
//!     [`Treemap::layout_with`] takes the style from [`Options`].
//!   - [`Treemap::render`] and [`Treemap::render_into`] paint cushions.
//!   - [`Treemap::hit_test_point`] resolves a point to the deepest node and its path.
//! - [`TreemapItem`]: the accessor trait for the hierarchy; [`Node`] is a simple owned model.
//! - [`Options`]: shading and grid options with the classic defaults; [`Style`] picks the packer.
//! - [`ColorAssigner`]: maps ranked category tags to a palette.
//! - [`Highlight`]: per-render category or item highlight.
//! - [`render_preview`]: a legend swatch that matches a leaf of the same color exactly.
//! - [`layout`]: the pure packing functions, usable without a [`Treemap`].
//!
//! ## Layout guarantees
//!
//! - Laid-out children exactly tile their parent; rounding never opens gaps or overlaps.
//! - Zero-weight items get a zero-area rectangle and remain addressable through their parent.
//! - A single positive child fills its parent.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_treemap::{ColorAssigner, Highlight, Node, Options, PixelRect, Style, Treemap};
//!
//! let root = Node::container(vec![
//!     Node::leaf(60, "txt"),
//!     Node::leaf(40, "exe"),
//! ]);
//!
//! let mut treemap = Treemap::new();
//! treemap.layout(&root, PixelRect::from_size(100, 50), Style::Squarified);
//!
//! // The larger item takes the left 60 columns.
//! let hit = treemap.hit_test_point(Point::new(59.5, 10.0)).unwrap();
//! assert_eq!(treemap.item_path(hit.node), Some(vec![0]));
//! assert_eq!(treemap.rect(hit.node), Some(PixelRect::new(0, 0, 60, 50)));
//!
//! let mut colors = ColorAssigner::default();
//! colors.set_ranking(["txt", "exe"]);
//! let image = treemap.render(&Options::default(), &colors, &Highlight::None);
//! assert_eq!((image.width(), image.height()), (100, 50));
//! ```
//!
//! See the `treemap_basics` demo for a runnable version with printed output.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buffer;
mod color;
mod item;
pub mod layout;
mod options;
mod raster;
mod shade;
mod tree;
mod types;

pub use buffer::{BufferSizeError, PixelBuffer};
pub use color::{ColorAssigner, DEFAULT_PALETTE, Highlight};
pub use item::{Category, Node, NodeCategory, TreemapItem};
pub use options::{Options, Style};
pub use raster::{PREVIEW_SIZE, paint_preview, render_preview, render_preview_sized};
pub use shade::{Cushion, LIGHT_HEIGHT};
pub use tree::{Hit, Treemap};
pub use types::{Color, NodeFlags, NodeId, PixelRect};
