// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base colors for leaves and highlight overrides.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::item::Category;
use crate::options::Options;
use crate::types::{Color, NodeId};

/// Default cushion palette, most prominent color first.
pub const DEFAULT_PALETTE: [Color; 13] = [
    Color::rgb(0, 0, 255),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(255, 255, 0),
    Color::rgb(150, 150, 255),
    Color::rgb(255, 150, 150),
    Color::rgb(150, 255, 150),
    Color::rgb(150, 255, 255),
    Color::rgb(255, 150, 255),
    Color::rgb(255, 255, 150),
    Color::rgb(255, 255, 255),
];

/// Which part of the treemap, if any, is highlighted.
///
/// The states are mutually exclusive and are evaluated per render call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Highlight<'a> {
    /// No highlight.
    #[default]
    None,
    /// Every leaf of this category is painted in [`Options::highlight_color`].
    Category(Category<'a>),
    /// This node is framed in [`Options::highlight_color`].
    Item(NodeId),
    /// Each of these nodes is framed, as for a multi-selection.
    Items(&'a [NodeId]),
}

/// Maps categories to base colors.
///
/// Tags are ranked by the caller (typically by aggregate size, largest first); the tag at
/// rank `i` receives `palette[i]`. Tags past the end of the palette, and tags that were
/// never ranked, share [`ColorAssigner::other`].
#[derive(Clone, Debug)]
pub struct ColorAssigner {
    palette: Vec<Color>,
    ranks: HashMap<String, usize>,
    /// Color for ranked-out and unranked tags.
    pub other: Color,
    /// Color for [`Category::Unknown`].
    pub unknown: Color,
    /// Color for [`Category::FreeSpace`].
    pub free_space: Color,
    /// Color for [`Category::None`], used when a container is painted as a single cushion.
    pub container: Color,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}

impl ColorAssigner {
    /// Create an assigner with the given palette and no ranking.
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            ranks: HashMap::new(),
            other: Color::rgb(150, 150, 150),
            unknown: Color::rgb(255, 255, 0),
            free_space: Color::rgb(100, 100, 100),
            container: Color::BLACK,
        }
    }

    /// The palette, in rank order.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Replace the tag ranking. The first tag gets the first palette color.
    ///
    /// Duplicate tags keep their first rank.
    pub fn set_ranking<'t>(&mut self, tags: impl IntoIterator<Item = &'t str>) {
        self.ranks.clear();
        for (rank, tag) in tags.into_iter().enumerate() {
            if !self.ranks.contains_key(tag) {
                self.ranks.insert(tag.to_owned(), rank);
            }
        }
    }

    /// Color of a category without any highlight.
    pub fn color(&self, category: Category<'_>) -> Color {
        match category {
            Category::Tag(tag) => self
                .ranks
                .get(tag)
                .and_then(|&rank| self.palette.get(rank))
                .copied()
                .unwrap_or(self.other),
            Category::Unknown => self.unknown,
            Category::FreeSpace => self.free_space,
            Category::None => self.container,
        }
    }

    /// Base color of a leaf in `category` under `highlight`.
    ///
    /// Category highlights replace the color of matching leaves with
    /// [`Options::highlight_color`]. Item highlights do not change base colors; the
    /// rasterizer frames the items instead.
    pub fn base_color(&self, category: Category<'_>, highlight: &Highlight<'_>, options: &Options) -> Color {
        match highlight {
            Highlight::Category(c) if *c == category => options.highlight_color,
            _ => self.color(category),
        }
    }
}
