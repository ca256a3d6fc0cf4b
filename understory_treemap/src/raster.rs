// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software rasterization of a laid-out treemap, and single-cushion previews.

use alloc::vec::Vec;

use crate::buffer::PixelBuffer;
use crate::color::{ColorAssigner, Highlight};
use crate::item::Category;
use crate::options::Options;
use crate::shade::Cushion;
use crate::tree::{LeafCategory, Treemap};
use crate::types::{Color, PixelRect};

/// Size of a legend swatch rendered by [`render_preview`].
pub const PREVIEW_SIZE: (u32, u32) = (24, 16);

/// Paint one cushion over `rect`.
///
/// With grid lines enabled the rightmost column and bottom row become grid pixels and
/// the cushion is fitted to the remaining area.
fn paint_leaf(target: &mut PixelBuffer, rect: PixelRect, base: Color, cushion: &Cushion, options: &Options) {
    let clip = rect.intersect(&target.rect());
    if clip.is_empty() {
        return;
    }
    let inner = if options.grid {
        PixelRect::new(rect.left, rect.top, rect.right - 1, rect.bottom - 1)
    } else {
        rect
    };
    let flat = cushion.is_flat().then(|| cushion.flat(base));
    for y in clip.top..clip.bottom {
        for x in clip.left..clip.right {
            let color = if !inner.contains(x, y) {
                options.grid_color
            } else if let Some(flat) = flat {
                flat
            } else {
                cushion.shade(x, y, &inner, base)
            };
            target.set(x, y, color);
        }
    }
}

/// Paint a single cushion of `color` over `rect`, exactly as a leaf of that size and
/// color is painted by [`Treemap::render_into`].
pub fn paint_preview(target: &mut PixelBuffer, rect: PixelRect, color: Color, options: &Options) {
    let options = options.clamped();
    paint_leaf(target, rect, color, &Cushion::new(&options), &options);
}

/// Render a `width × height` swatch of a single cushion.
pub fn render_preview_sized(width: u32, height: u32, color: Color, options: &Options) -> PixelBuffer {
    let mut out = PixelBuffer::new(width, height, Color::BLACK);
    let rect = out.rect();
    paint_preview(&mut out, rect, color, options);
    out
}

/// Render a legend swatch of [`PREVIEW_SIZE`].
pub fn render_preview(color: Color, options: &Options) -> PixelBuffer {
    render_preview_sized(PREVIEW_SIZE.0, PREVIEW_SIZE.1, color, options)
}

impl Treemap {
    /// Render the current layout into a new buffer of the layout's size.
    ///
    /// Pixel `(0, 0)` of the result is the top-left corner of the layout bounds, so a
    /// layout placed at an offset still renders into a buffer of exactly its own size.
    /// Pixels not covered by any cushion are black.
    pub fn render(&self, options: &Options, colors: &ColorAssigner, highlight: &Highlight<'_>) -> PixelBuffer {
        let b = self.bounds;
        let mut out = PixelBuffer::new(b.width(), b.height(), Color::BLACK);
        self.paint(&mut out, (b.left, b.top), options, colors, highlight);
        out
    }

    /// Render the current layout into a caller-provided target in device coordinates.
    ///
    /// Only pixels covered by cushions, grid lines, or the highlight frame are written,
    /// and writes outside the target are clipped. This never mutates the treemap, so
    /// several highlight variants can be rendered from one layout.
    pub fn render_into(
        &self,
        target: &mut PixelBuffer,
        options: &Options,
        colors: &ColorAssigner,
        highlight: &Highlight<'_>,
    ) {
        self.paint(target, (0, 0), options, colors, highlight);
    }

    /// Paint with device pixel `origin` mapped to target pixel `(0, 0)`.
    fn paint(
        &self,
        target: &mut PixelBuffer,
        origin: (i32, i32),
        options: &Options,
        colors: &ColorAssigner,
        highlight: &Highlight<'_>,
    ) {
        if self.nodes.is_empty() {
            return;
        }
        let (dx, dy) = (origin.0.saturating_neg(), origin.1.saturating_neg());
        let options = options.clamped();
        let cushion = Cushion::new(&options);

        let tag_colors: Vec<Color> = self
            .tags
            .iter()
            .map(|t| colors.base_color(Category::Tag(t.as_str()), highlight, &options))
            .collect();
        let unknown = colors.base_color(Category::Unknown, highlight, &options);
        let free_space = colors.base_color(Category::FreeSpace, highlight, &options);
        let container = colors.base_color(Category::None, highlight, &options);

        let mut leaves = Vec::new();
        self.collect_painted(0, &mut leaves);
        for idx in leaves {
            let node = &self.nodes[idx as usize];
            let base = match node.category {
                LeafCategory::Tag(t) => tag_colors[t as usize],
                LeafCategory::Unknown => unknown,
                LeafCategory::FreeSpace => free_space,
                LeafCategory::None => container,
            };
            paint_leaf(target, node.rect.offset(dx, dy), base, &cushion, &options);
        }

        let framed = match highlight {
            Highlight::Item(id) => core::slice::from_ref(id),
            Highlight::Items(ids) => *ids,
            _ => &[],
        };
        for id in framed {
            match self.get(*id) {
                Some(node) => target.frame_rect(node.rect.offset(dx, dy), options.highlight_color),
                None => log::debug!("ignoring highlight of stale node {id:?}"),
            }
        }
        log::trace!("rendered {self:?} into {}x{}", target.width(), target.height());
    }
}
