// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering options and packing style.

use crate::types::Color;

/// Packing algorithm used to subdivide a container among its children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// Row packing: rows span the container's longer axis and stack across the shorter one.
    #[default]
    Classic,
    /// Squarified packing: rows are laid along the shorter side of the remaining space.
    Squarified,
}

impl Style {
    /// Map a persisted integer to a style, falling back to [`Style::Classic`].
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Squarified,
            _ => Self::Classic,
        }
    }

    /// The persisted integer for this style.
    pub fn index(self) -> i32 {
        match self {
            Self::Classic => 0,
            Self::Squarified => 1,
        }
    }
}

/// Treemap layout and shading options.
///
/// Percent fields have documented ranges. The engine clamps every value on each call
/// (see [`Options::clamped`]), so out-of-range input never panics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Packing algorithm, read by [`Treemap::layout_with`](crate::Treemap::layout_with).
    ///
    /// Rendering ignores it; [`Treemap::layout`](crate::Treemap::layout) takes the style
    /// directly.
    pub style: Style,
    /// Draw 1-pixel grid lines between leaves.
    pub grid: bool,
    /// Color of the grid lines.
    pub grid_color: Color,
    /// Overall brightness, `0..=100`.
    pub brightness: i32,
    /// Cushion height factor, `0..=100`.
    pub height: i32,
    /// Cushion scale factor, `0..=100`.
    pub scale_factor: i32,
    /// Ambient light share, `0..=100`.
    pub ambient_light: i32,
    /// Horizontal light offset, `-200..=200`. Negative values light from the left.
    pub light_source_x: i32,
    /// Vertical light offset, `-200..=200`. Negative values light from the top.
    pub light_source_y: i32,
    /// Color used for category and item highlights.
    pub highlight_color: Color,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            style: Style::Classic,
            grid: false,
            grid_color: Color::BLACK,
            brightness: 88,
            height: 38,
            scale_factor: 91,
            ambient_light: 13,
            light_source_x: -100,
            light_source_y: -100,
            highlight_color: Color::WHITE,
        }
    }
}

impl Options {
    /// Return a copy with every numeric field clamped to its documented range.
    pub fn clamped(&self) -> Self {
        let out = Self {
            brightness: self.brightness.clamp(0, 100),
            height: self.height.clamp(0, 100),
            scale_factor: self.scale_factor.clamp(0, 100),
            ambient_light: self.ambient_light.clamp(0, 100),
            light_source_x: self.light_source_x.clamp(-200, 200),
            light_source_y: self.light_source_y.clamp(-200, 200),
            ..*self
        };
        if out != *self {
            log::debug!("treemap options clamped: {self:?} -> {out:?}");
        }
        out
    }

    /// Brightness as a fraction in `[0, 1]`.
    pub fn brightness_fraction(&self) -> f64 {
        percent(self.brightness, 0, 100)
    }

    /// Height factor as a fraction in `[0, 1]`.
    pub fn height_fraction(&self) -> f64 {
        percent(self.height, 0, 100)
    }

    /// Scale factor as a fraction in `[0, 1]`.
    pub fn scale_factor_fraction(&self) -> f64 {
        percent(self.scale_factor, 0, 100)
    }

    /// Ambient light as a fraction in `[0, 1]`.
    pub fn ambient_light_fraction(&self) -> f64 {
        percent(self.ambient_light, 0, 100)
    }

    /// Horizontal light offset as a fraction in `[-2, 2]`.
    pub fn light_source_x_fraction(&self) -> f64 {
        percent(self.light_source_x, -200, 200)
    }

    /// Vertical light offset as a fraction in `[-2, 2]`.
    pub fn light_source_y_fraction(&self) -> f64 {
        percent(self.light_source_y, -200, 200)
    }
}

fn percent(v: i32, min: i32, max: i32) -> f64 {
    f64::from(v.clamp(min, max)) / 100.0
}
