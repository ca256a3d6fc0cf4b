// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only access to the weighted hierarchy being visualized.

use alloc::string::String;
use alloc::vec::Vec;

/// Coloring category of an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category<'a> {
    /// A caller-defined tag, such as a file extension.
    Tag(&'a str),
    /// Space whose contents are unknown.
    Unknown,
    /// Free space on a volume.
    FreeSpace,
    /// No category; containers use this.
    None,
}

/// Accessor capabilities the layout engine needs from a hierarchy.
///
/// The engine only reads through this trait and never holds on to an item after
/// [`Treemap::layout`](crate::Treemap::layout) returns.
pub trait TreemapItem {
    /// The item's weight. Negative values are treated as zero.
    fn weight(&self) -> i64;

    /// Number of children; zero for leaves.
    fn child_count(&self) -> usize;

    /// The child at `index`, for `index < self.child_count()`.
    fn child(&self, index: usize) -> &Self;

    /// Coloring category. Only consulted for items painted as a single cushion.
    fn category(&self) -> Category<'_> {
        Category::None
    }
}

/// A simple owned hierarchy node.
///
/// Useful for tests and for callers that do not have a model of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Weight of this node.
    pub weight: i64,
    /// Children in caller order.
    pub children: Vec<Node>,
    /// Category of this node.
    pub category: NodeCategory,
}

/// Owned counterpart of [`Category`] stored by [`Node`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// A caller-defined tag.
    Tag(String),
    /// Unknown contents.
    Unknown,
    /// Free space.
    FreeSpace,
    /// No category.
    #[default]
    None,
}

impl Node {
    /// A leaf with a tag category.
    pub fn leaf(weight: i64, tag: impl Into<String>) -> Self {
        Self {
            weight,
            children: Vec::new(),
            category: NodeCategory::Tag(tag.into()),
        }
    }

    /// A leaf with an arbitrary category.
    pub fn leaf_with(weight: i64, category: NodeCategory) -> Self {
        Self {
            weight,
            children: Vec::new(),
            category,
        }
    }

    /// A container whose weight is the sum of its children's positive weights.
    pub fn container(children: Vec<Self>) -> Self {
        let weight = children.iter().map(|c| c.weight.max(0)).sum();
        Self {
            weight,
            children,
            category: NodeCategory::None,
        }
    }

    /// A container with an explicit weight.
    pub fn container_with_weight(weight: i64, children: Vec<Self>) -> Self {
        Self {
            weight,
            children,
            category: NodeCategory::None,
        }
    }
}

impl TreemapItem for Node {
    fn weight(&self) -> i64 {
        self.weight
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &Self {
        &self.children[index]
    }

    fn category(&self) -> Category<'_> {
        match &self.category {
            NodeCategory::Tag(t) => Category::Tag(t),
            NodeCategory::Unknown => Category::Unknown,
            NodeCategory::FreeSpace => Category::FreeSpace,
            NodeCategory::None => Category::None,
        }
    }
}
