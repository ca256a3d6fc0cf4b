// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the treemap: node identifiers, flags, pixel rectangles, and colors.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

/// Identifier for a node in a [`Treemap`](crate::Treemap) layout.
///
/// This is a small, copyable handle made of a slot index and the layout epoch
/// that produced it.
///
/// ## Semantics
///
/// - Every call to [`Treemap::layout`](crate::Treemap::layout) starts a new epoch.
/// - A `NodeId` from an earlier epoch is stale, even if its slot index is still in range.
/// - Stale ids never alias a node of the current layout because the epoch must match.
///
/// Use [`Treemap::is_alive`](crate::Treemap::is_alive) to check whether an id still refers
/// to the current layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, epoch: u32) -> Self {
        Self(idx, epoch)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node layout state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node is painted as a single cushion (no laid-out children).
        const LEAF      = 0b0000_0001;
        /// The item has children, but they were not laid out (no weight or no room).
        const COLLAPSED = 0b0000_0010;
        /// The item's clamped weight is zero.
        const EMPTY     = 0b0000_0100;
    }
}

/// An axis-aligned rectangle in device pixels.
///
/// The rectangle is half-open: it covers columns `left..right` and rows `top..bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Leftmost covered column.
    pub left: i32,
    /// Topmost covered row.
    pub top: i32,
    /// One past the rightmost covered column.
    pub right: i32,
    /// One past the bottommost covered row.
    pub bottom: i32,
}

impl PixelRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle at the origin with the given size.
    pub const fn from_size(width: u32, height: u32) -> Self {
        #[allow(
            clippy::cast_possible_wrap,
            reason = "viewport sizes are far below i32::MAX"
        )]
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Snap a float rectangle to the pixel grid by rounding each edge.
    ///
    /// Rectangles sharing an edge in float space share it after snapping, so a float
    /// partition stays a partition.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.round();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "edges come from an i32 rectangle and stay within it"
        )]
        Self::new(r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32)
    }

    /// Width in pixels; zero for inverted rectangles.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left).max(0).unsigned_abs()
    }

    /// Height in pixels; zero for inverted rectangles.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0).unsigned_abs()
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether the pixel `(x, y)` lies inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// The overlap of two rectangles, or an empty rectangle at `self`'s origin.
    pub fn intersect(&self, other: &Self) -> Self {
        let r = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() {
            Self::new(self.left, self.top, self.left, self.top)
        } else {
            r
        }
    }

    /// This rectangle moved by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// An empty rectangle at this rectangle's top-left corner.
    pub fn collapsed(&self) -> Self {
        Self::new(self.left, self.top, self.left, self.top)
    }

    /// Float view of this rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// An opaque 8-bit RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, rounding and saturating to `0..=255`.
    pub fn scale(self, factor: f64) -> Self {
        Self::rgb(
            scale_channel(self.r, factor),
            scale_channel(self.g, factor),
            scale_channel(self.b, factor),
        )
    }
}

fn scale_channel(c: u8, factor: f64) -> u8 {
    let v = (f64::from(c) * factor).round().clamp(0.0, 255.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to the u8 range above"
    )]
    let v = v as u8;
    v
}
