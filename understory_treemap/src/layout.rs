// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing algorithms.
//!
//! Both functions take weights sorted in descending order, all strictly positive, and
//! return one float rectangle per weight in input order. The rectangles partition
//! `bounds` exactly: neighbors share edges bit-for-bit and the last item of each row
//! (and the last row) snaps to the far edge, so snapping with
//! [`PixelRect::from_rect`](crate::PixelRect::from_rect) keeps the partition.
//!
//! Rows are grown greedily. The next item joins the current row as long as the row's
//! worst aspect ratio does not increase; a tie extends the row.

use alloc::vec::Vec;
use core::ops::Range;
use kurbo::Rect;
use smallvec::SmallVec;

/// `max(w / h, h / w)`; infinite for degenerate boxes.
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if width <= 0.0 || height <= 0.0 {
        return f64::INFINITY;
    }
    if width > height {
        width / height
    } else {
        height / width
    }
}

/// A closed row and the geometry it was measured against.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Indices of the row's items in the input weights.
    pub items: Range<usize>,
    /// Length of the side the row was laid along.
    pub span: f64,
    /// Square pixels covered by one unit of weight.
    pub scale: f64,
}

/// Worst aspect ratio of `row` when laid along a side of length `span`, where one unit
/// of weight covers `scale` square pixels.
pub fn worst(row: &[f64], span: f64, scale: f64) -> f64 {
    let row_weight: f64 = row.iter().sum();
    let thickness = row_weight * scale / span;
    row.iter()
        .map(|&w| aspect_ratio(span * w / row_weight, thickness))
        .fold(0.0, f64::max)
}

/// Grow a row starting at `start`. Returns the exclusive end and the row weight.
fn grow_row(weights: &[f64], start: usize, span: f64, scale: f64) -> (usize, f64) {
    let mut end = start + 1;
    let mut current = worst(&weights[start..end], span, scale);
    while end < weights.len() {
        let candidate = worst(&weights[start..=end], span, scale);
        if candidate > current {
            break;
        }
        current = candidate;
        end += 1;
    }
    (end, weights[start..end].iter().sum())
}

/// Split `[from, to)` proportionally to `weights[range]`, calling `place` with each
/// item's `(lo, hi)` in order. The last item ends exactly at `to`.
fn split_span(
    weights: &[f64],
    range: Range<usize>,
    total: f64,
    from: f64,
    to: f64,
    mut place: impl FnMut(f64, f64),
) {
    let length = to - from;
    let last = range.end.saturating_sub(1);
    let mut acc = 0.0;
    let mut lo = from;
    for i in range {
        acc += weights[i];
        let hi = if i == last {
            to
        } else {
            from + length * acc / total
        };
        place(lo, hi);
        lo = hi;
    }
}

fn to_f64(weights: &[u64]) -> SmallVec<[f64; 32]> {
    #[allow(
        clippy::cast_precision_loss,
        reason = "weights are byte sizes; relative precision of f64 is ample for pixel layout"
    )]
    weights.iter().map(|&w| w as f64).collect()
}

fn degenerate(bounds: Rect) -> bool {
    !(bounds.width() > 0.0 && bounds.height() > 0.0)
}

/// Squarified layout (Bruls, Huizing, van Wijk).
///
/// Each row is laid along the shorter side of the remaining rectangle; its thickness is
/// the row's share of the remaining weight times the longer side.
pub fn squarify(weights: &[u64], bounds: Rect) -> Vec<Rect> {
    squarify_rows(weights, bounds).0
}

/// Like [`squarify`], also returning the rows in the order they were closed.
pub fn squarify_rows(weights: &[u64], bounds: Rect) -> (Vec<Rect>, Vec<Row>) {
    let w = to_f64(weights);
    let n = w.len();
    let mut out = Vec::with_capacity(n);
    let mut rows = Vec::new();
    if n == 0 {
        return (out, rows);
    }
    if degenerate(bounds) {
        out.resize(n, bounds);
        return (out, rows);
    }

    let mut remaining = bounds;
    let mut remaining_weight: f64 = w.iter().sum();
    let mut start = 0;
    while start < n {
        let width = remaining.width();
        let height = remaining.height();
        // Rows are columns when the remaining space is wider than tall.
        let column = width >= height;
        let (span, long) = if column {
            (height, width)
        } else {
            (width, height)
        };
        let scale = width * height / remaining_weight;
        let (end, row_weight) = grow_row(&w, start, span, scale);
        let thickness = if end == n {
            long
        } else {
            long * row_weight / remaining_weight
        };

        if column {
            let x1 = if end == n {
                remaining.x1
            } else {
                remaining.x0 + thickness
            };
            split_span(&w, start..end, row_weight, remaining.y0, remaining.y1, |lo, hi| {
                out.push(Rect::new(remaining.x0, lo, x1, hi));
            });
            remaining.x0 = x1;
        } else {
            let y1 = if end == n {
                remaining.y1
            } else {
                remaining.y0 + thickness
            };
            split_span(&w, start..end, row_weight, remaining.x0, remaining.x1, |lo, hi| {
                out.push(Rect::new(lo, remaining.y0, hi, y1));
            });
            remaining.y0 = y1;
        }

        rows.push(Row {
            items: start..end,
            span,
            scale,
        });
        remaining_weight -= row_weight;
        start = end;
    }
    (out, rows)
}

/// Whether a container at `depth` uses horizontal rows in [`classic`] layout.
///
/// Rows run along the longer axis; square containers alternate by depth, starting
/// with horizontal rows at even depths.
pub fn classic_horizontal(bounds: Rect, depth: u32) -> bool {
    let (w, h) = (bounds.width(), bounds.height());
    if w != h { w > h } else { depth % 2 == 0 }
}

/// Classic row-packing layout.
///
/// Rows span the whole container along one axis (the width when `horizontal`) and are
/// stacked along the other. A row's thickness is its share of the total weight.
pub fn classic(weights: &[u64], bounds: Rect, horizontal: bool) -> Vec<Rect> {
    classic_rows(weights, bounds, horizontal).0
}

/// Like [`classic`], also returning the rows in stacking order.
pub fn classic_rows(weights: &[u64], bounds: Rect, horizontal: bool) -> (Vec<Rect>, Vec<Row>) {
    let w = to_f64(weights);
    let n = w.len();
    let mut out = Vec::with_capacity(n);
    let mut rows = Vec::new();
    if n == 0 {
        return (out, rows);
    }
    if degenerate(bounds) {
        out.resize(n, bounds);
        return (out, rows);
    }

    let (span, extent) = if horizontal {
        (bounds.width(), bounds.height())
    } else {
        (bounds.height(), bounds.width())
    };
    let (extent_from, extent_to) = if horizontal {
        (bounds.y0, bounds.y1)
    } else {
        (bounds.x0, bounds.x1)
    };
    let total: f64 = w.iter().sum();
    let scale = span * extent / total;

    let mut start = 0;
    let mut consumed = 0.0;
    let mut row_lo = extent_from;
    while start < n {
        let (end, row_weight) = grow_row(&w, start, span, scale);
        consumed += row_weight;
        let row_hi = if end == n {
            extent_to
        } else {
            extent_from + extent * consumed / total
        };
        if horizontal {
            split_span(&w, start..end, row_weight, bounds.x0, bounds.x1, |lo, hi| {
                out.push(Rect::new(lo, row_lo, hi, row_hi));
            });
        } else {
            split_span(&w, start..end, row_weight, bounds.y0, bounds.y1, |lo, hi| {
                out.push(Rect::new(row_lo, lo, row_hi, hi));
            });
        }
        rows.push(Row {
            items: start..end,
            span,
            scale,
        });
        row_lo = row_hi;
        start = end;
    }
    (out, rows)
}
