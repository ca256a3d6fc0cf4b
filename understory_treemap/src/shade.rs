// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cushion shading.
//!
//! Every painted rectangle carries a synthetic height field: a four-sided pyramid whose
//! apex sits over the rectangle's center at height
//! `height × scale_factor × min(width, height)`. Each pixel is lit by a directional light
//!
//! ```text
//! intensity = ambient + (1 - ambient) * max(0, n · L)
//! color     = base * brightness * intensity
//! ```
//!
//! where `n` is the normal of the pyramid face under the pixel center and
//! `L = normalize(light_source_x, light_source_y, LIGHT_HEIGHT)`. A flat height field or
//! full ambient light skips the directional term entirely.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::options::Options;
use crate::types::{Color, PixelRect};

/// Vertical component of the light vector before normalization.
///
/// With offsets in `[-2, 2]` this ranges from nearly grazing to straight overhead.
pub const LIGHT_HEIGHT: f64 = 1.0;

/// Precomputed shading parameters for one set of [`Options`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cushion {
    brightness: f64,
    ambient: f64,
    apex_scale: f64,
    light: [f64; 3],
}

impl Cushion {
    /// Build shading parameters from (clamped) options.
    pub fn new(options: &Options) -> Self {
        let o = options.clamped();
        let (lx, ly, lz) = (
            o.light_source_x_fraction(),
            o.light_source_y_fraction(),
            LIGHT_HEIGHT,
        );
        let len = (lx * lx + ly * ly + lz * lz).sqrt();
        Self {
            brightness: o.brightness_fraction(),
            ambient: o.ambient_light_fraction(),
            apex_scale: o.height_fraction() * o.scale_factor_fraction(),
            light: [lx / len, ly / len, lz / len],
        }
    }

    /// Whether this shading paints every pixel of a rectangle the same color.
    pub fn is_flat(&self) -> bool {
        self.apex_scale <= 0.0 || self.ambient >= 1.0
    }

    /// Light intensity in `[0, 1]` at pixel `(x, y)` of `rect`, sampled at the pixel center.
    pub fn intensity_at(&self, x: i32, y: i32, rect: &PixelRect) -> f64 {
        if self.is_flat() || rect.is_empty() {
            return 1.0;
        }
        let w = f64::from(rect.width());
        let h = f64::from(rect.height());
        let half_w = w / 2.0;
        let half_h = h / 2.0;
        let apex = self.apex_scale * w.min(h);

        let dx = f64::from(x - rect.left) + 0.5 - half_w;
        let dy = f64::from(y - rect.top) + 0.5 - half_h;
        let (u, v) = (dx / half_w, dy / half_h);

        // Height falls off linearly from the apex towards the edge of the face under the
        // point; the surface normal is (-dz/dx, -dz/dy, 1).
        let (nx, ny) = if u.abs() >= v.abs() {
            (apex * sign(dx) / half_w, 0.0)
        } else {
            (0.0, apex * sign(dy) / half_h)
        };
        let len = (nx * nx + ny * ny + 1.0).sqrt();
        let cos = (nx * self.light[0] + ny * self.light[1] + self.light[2]) / len;
        self.ambient + (1.0 - self.ambient) * cos.max(0.0)
    }

    /// Final color of pixel `(x, y)` of `rect` with base color `base`.
    pub fn shade(&self, x: i32, y: i32, rect: &PixelRect, base: Color) -> Color {
        base.scale(self.brightness * self.intensity_at(x, y, rect))
    }

    /// The color of a flat fill: `base × brightness`.
    pub fn flat(&self, base: Color) -> Color {
        base.scale(self.brightness)
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
