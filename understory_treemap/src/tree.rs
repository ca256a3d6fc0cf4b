// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tree: construction from a hierarchy snapshot, accessors, and hit testing.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use smallvec::SmallVec;

use crate::item::{Category, TreemapItem};
use crate::layout;
use crate::options::{Options, Style};
use crate::types::{NodeFlags, NodeId, PixelRect};

/// Interned category of a node painted as a cushion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LeafCategory {
    Tag(u32),
    Unknown,
    FreeSpace,
    None,
}

#[derive(Clone, Debug)]
pub(crate) struct LayoutNode {
    pub(crate) rect: PixelRect,
    pub(crate) depth: u32,
    pub(crate) parent: Option<u32>,
    // Children occupy the contiguous slots `first_child..first_child + child_count`,
    // in the item's own child order.
    pub(crate) first_child: u32,
    pub(crate) child_count: u32,
    pub(crate) item_index: u32,
    pub(crate) weight: u64,
    pub(crate) flags: NodeFlags,
    pub(crate) category: LeafCategory,
}

impl LayoutNode {
    fn new(rect: PixelRect, depth: u32, parent: Option<u32>, item_index: u32, weight: u64) -> Self {
        Self {
            rect,
            depth,
            parent,
            first_child: 0,
            child_count: 0,
            item_index,
            weight,
            flags: if weight == 0 {
                NodeFlags::EMPTY
            } else {
                NodeFlags::empty()
            },
            category: LeafCategory::None,
        }
    }

    pub(crate) fn is_painted(&self) -> bool {
        self.flags.contains(NodeFlags::LEAF) && !self.rect.is_empty()
    }
}

/// Result of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The deepest node whose rectangle contains the point.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// A laid-out treemap.
///
/// Holds the rectangle tree produced by the most recent [`Treemap::layout`] call. The tree
/// mirrors the item hierarchy node for node, so every item stays addressable even when
/// it received no area.
pub struct Treemap {
    pub(crate) nodes: Vec<LayoutNode>,
    pub(crate) bounds: PixelRect,
    pub(crate) epoch: u32,
    pub(crate) tags: Vec<String>,
    tag_ids: HashMap<String, u32>,
}

impl core::fmt::Debug for Treemap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let painted = self.nodes.iter().filter(|n| n.is_painted()).count();
        f.debug_struct("Treemap")
            .field("bounds", &self.bounds)
            .field("epoch", &self.epoch)
            .field("nodes", &self.nodes.len())
            .field("painted", &painted)
            .field("tags", &self.tags.len())
            .finish_non_exhaustive()
    }
}

impl Default for Treemap {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_weight(weight: i64) -> u64 {
    if weight < 0 {
        log::trace!("negative item weight {weight} treated as zero");
    }
    weight.max(0).unsigned_abs()
}

fn to_u32(v: usize) -> u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    let v = v as u32;
    v
}

impl Treemap {
    /// Create an empty treemap.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            bounds: PixelRect::ZERO,
            epoch: 0,
            tags: Vec::new(),
            tag_ids: HashMap::new(),
        }
    }

    /// Lay out `root` inside `bounds` and replace the current layout.
    ///
    /// All [`NodeId`]s handed out before this call become stale. A zero-area `bounds` or
    /// a root with zero weight produces an empty treemap.
    pub fn layout<I: TreemapItem + ?Sized>(&mut self, root: &I, bounds: PixelRect, style: Style) {
        self.epoch = self.epoch.wrapping_add(1);
        self.nodes.clear();
        self.tags.clear();
        self.tag_ids.clear();
        self.bounds = bounds;

        let weight = clamp_weight(root.weight());
        if bounds.is_empty() || weight == 0 {
            log::debug!("treemap layout skipped: bounds {bounds:?}, root weight {weight}");
            return;
        }

        self.nodes.push(LayoutNode::new(bounds, 0, None, 0, weight));
        self.build(root, style);
        log::debug!(
            "treemap layout: {} nodes, {} tags, {style:?} in {}x{}",
            self.nodes.len(),
            self.tags.len(),
            bounds.width(),
            bounds.height()
        );
    }

    /// Lay out `root` inside `bounds` with the packing style stored in `options`.
    pub fn layout_with<I: TreemapItem + ?Sized>(&mut self, root: &I, bounds: PixelRect, options: &Options) {
        self.layout(root, bounds, options.style);
    }

    fn build<I: TreemapItem + ?Sized>(&mut self, root: &I, style: Style) {
        // Explicit work stack; hierarchies can be far deeper than the call stack allows.
        let mut stack: Vec<(&I, u32)> = alloc::vec![(root, 0)];
        while let Some((item, idx)) = stack.pop() {
            let count = item.child_count();
            if count == 0 {
                let category = self.intern(item.category());
                let node = &mut self.nodes[idx as usize];
                node.flags |= NodeFlags::LEAF;
                node.category = category;
                continue;
            }
            let first = self.lay_out_children(item, idx, style);
            // Reversed so children are visited in item order.
            for i in (0..count).rev() {
                stack.push((item.child(i), first + to_u32(i)));
            }
        }
    }

    /// Allocate the child slots of `idx` and assign their rectangles.
    ///
    /// Returns the first child slot.
    fn lay_out_children<I: TreemapItem + ?Sized>(&mut self, item: &I, idx: u32, style: Style) -> u32 {
        let count = item.child_count();
        let (rect, depth) = {
            let node = &self.nodes[idx as usize];
            (node.rect, node.depth)
        };
        let first = to_u32(self.nodes.len());
        for i in 0..count {
            let weight = clamp_weight(item.child(i).weight());
            self.nodes.push(LayoutNode::new(
                rect.collapsed(),
                depth + 1,
                Some(idx),
                to_u32(i),
                weight,
            ));
        }
        {
            let node = &mut self.nodes[idx as usize];
            node.first_child = first;
            node.child_count = to_u32(count);
        }

        let mut order: SmallVec<[u32; 32]> = (0..to_u32(count))
            .filter(|&i| self.nodes[(first + i) as usize].weight > 0)
            .collect();
        // Stable, so equal weights keep item order.
        order.sort_by(|&a, &b| {
            let wa = self.nodes[(first + a) as usize].weight;
            let wb = self.nodes[(first + b) as usize].weight;
            wb.cmp(&wa)
        });

        if order.is_empty() || rect.is_empty() {
            log::trace!("node {idx}: {count} children not laid out in {rect:?}");
            let category = self.intern(item.category());
            let node = &mut self.nodes[idx as usize];
            node.flags |= NodeFlags::LEAF | NodeFlags::COLLAPSED;
            node.category = category;
            return first;
        }

        let weights: SmallVec<[u64; 32]> = order
            .iter()
            .map(|&i| self.nodes[(first + i) as usize].weight)
            .collect();
        let area = rect.to_rect();
        let rects = match style {
            Style::Squarified => layout::squarify(&weights, area),
            Style::Classic => layout::classic(&weights, area, layout::classic_horizontal(area, depth)),
        };
        for (&i, r) in order.iter().zip(rects) {
            self.nodes[(first + i) as usize].rect = PixelRect::from_rect(r);
        }
        first
    }

    fn intern(&mut self, category: Category<'_>) -> LeafCategory {
        match category {
            Category::Tag(tag) => {
                if let Some(&id) = self.tag_ids.get(tag) {
                    return LeafCategory::Tag(id);
                }
                let id = to_u32(self.tags.len());
                self.tags.push(tag.to_owned());
                self.tag_ids.insert(tag.to_owned(), id);
                LeafCategory::Tag(id)
            }
            Category::Unknown => LeafCategory::Unknown,
            Category::FreeSpace => LeafCategory::FreeSpace,
            Category::None => LeafCategory::None,
        }
    }

    /// The bounds passed to the last [`Treemap::layout`] call.
    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Number of nodes in the current layout (one per item).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the current layout has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if the layout is not empty.
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then(|| self.id(0))
    }

    /// Returns true if `id` refers to a node of the current layout.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.1 == self.epoch && id.idx() < self.nodes.len()
    }

    /// Device-pixel rectangle of a node. Items without area have an empty rectangle.
    pub fn rect(&self, id: NodeId) -> Option<PixelRect> {
        self.get(id).map(|n| n.rect)
    }

    /// Nesting depth of a node; the root is at depth zero.
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.get(id).map(|n| n.depth)
    }

    /// Clamped weight of a node's item.
    pub fn weight(&self, id: NodeId) -> Option<u64> {
        self.get(id).map(|n| n.weight)
    }

    /// Layout flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.get(id).map(|n| n.flags)
    }

    /// Parent of a node; `None` for the root and for stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.map(|p| self.id(p))
    }

    /// Children of a node in the item's child order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let range = self
            .get(id)
            .map(|n| n.first_child..n.first_child + n.child_count)
            .unwrap_or(0..0);
        range.map(move |i| self.id(i))
    }

    /// Nodes painted as a single cushion, in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut out = Vec::new();
        if !self.nodes.is_empty() {
            self.collect_painted(0, &mut out);
        }
        out.into_iter().map(move |i| self.id(i))
    }

    pub(crate) fn collect_painted(&self, root: u32, out: &mut Vec<u32>) {
        let mut stack = alloc::vec![root];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if node.rect.is_empty() {
                continue;
            }
            if node.flags.contains(NodeFlags::LEAF) {
                out.push(idx);
                continue;
            }
            stack.extend((node.first_child..node.first_child + node.child_count).rev());
        }
    }

    /// Child-index path from the root item to the node's item.
    ///
    /// Apply it to the hierarchy snapshot with [`TreemapItem::child`] to recover the item.
    pub fn item_path(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut idx = self.get(id).map(|_| id.0)?;
        let mut out = Vec::new();
        while let Some(parent) = self.nodes[idx as usize].parent {
            out.push(self.nodes[idx as usize].item_index as usize);
            idx = parent;
        }
        out.reverse();
        Some(out)
    }

    /// Resolve a child-index path, such as a selection from a tree view, to a node.
    pub fn node_for_item_path(&self, path: &[usize]) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut idx = 0_u32;
        for &i in path {
            let node = &self.nodes[idx as usize];
            if i >= node.child_count as usize {
                return None;
            }
            idx = node.first_child + to_u32(i);
        }
        Some(self.id(idx))
    }

    /// Hit test a device-space point. Returns the deepest node whose rectangle contains it.
    ///
    /// Descends from the root, so the cost is bounded by depth times fan-out. Items with
    /// no area are never returned; the point resolves to their nearest ancestor with area.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        if self.nodes.is_empty() || !pt.x.is_finite() || !pt.y.is_finite() {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "out-of-range coordinates saturate and miss every rectangle"
        )]
        let (x, y) = (pt.x.floor() as i32, pt.y.floor() as i32);
        if !self.nodes[0].rect.contains(x, y) {
            return None;
        }
        let mut path = Vec::new();
        let mut idx = 0_u32;
        loop {
            path.push(self.id(idx));
            let node = &self.nodes[idx as usize];
            if node.flags.contains(NodeFlags::LEAF) {
                break;
            }
            let next = (node.first_child..node.first_child + node.child_count)
                .find(|&c| self.nodes[c as usize].rect.contains(x, y));
            match next {
                Some(c) => idx = c,
                None => break,
            }
        }
        Some(Hit {
            node: self.id(idx),
            path,
        })
    }

    // --- internals ---

    fn id(&self, idx: u32) -> NodeId {
        NodeId::new(idx, self.epoch)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        if id.1 != self.epoch {
            return None;
        }
        self.nodes.get(id.idx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Node, NodeCategory};
    use alloc::vec;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const TAGS: [&str; 4] = ["a", "b", "c", "d"];

    /// Build a hierarchy of at most depth 4 from a flat list of `(shape, weight)` pairs.
    fn gen_node(ops: &mut impl Iterator<Item = (u8, i16)>, depth: u32) -> Node {
        match ops.next() {
            Some((shape, _)) if depth < 4 && shape % 3 == 0 => {
                let n = usize::from(shape % 7) + 1;
                Node::container((0..n).map(|_| gen_node(ops, depth + 1)).collect())
            }
            Some((shape, weight)) => {
                Node::leaf(i64::from(weight), TAGS[usize::from(shape) % TAGS.len()])
            }
            None => Node::leaf(1, "a"),
        }
    }

    /// Check that the children of every laid-out node tile it, and collapsed nodes have
    /// no area below them.
    fn check_tiling(tm: &Treemap) -> Result<(), alloc::string::String> {
        for (idx, node) in tm.nodes.iter().enumerate() {
            let kids = &tm.nodes[node.first_child as usize..(node.first_child + node.child_count) as usize];
            if node.flags.contains(NodeFlags::LEAF) {
                if kids.iter().any(|k| !k.rect.is_empty()) {
                    return Err(alloc::format!("leaf {idx} has a child with area"));
                }
                continue;
            }
            let area: u64 = kids.iter().map(|k| k.rect.area()).sum();
            if area != node.rect.area() {
                return Err(alloc::format!("node {idx}: children cover {area} of {}", node.rect.area()));
            }
            for (i, a) in kids.iter().enumerate() {
                if a.rect.is_empty() {
                    continue;
                }
                if a.rect.intersect(&node.rect) != a.rect {
                    return Err(alloc::format!("node {idx}: child {i} leaves the parent"));
                }
                for b in &kids[i + 1..] {
                    if !a.rect.intersect(&b.rect).is_empty() {
                        return Err(alloc::format!("node {idx}: {:?} overlaps {:?}", a.rect, b.rect));
                    }
                }
            }
        }
        Ok(())
    }

    fn two_children() -> Node {
        Node::container(vec![Node::leaf(60, "txt"), Node::leaf(40, "exe")])
    }

    #[test]
    fn squarified_scenario_splits_at_sixty() {
        let mut tm = Treemap::new();
        tm.layout(&two_children(), PixelRect::from_size(100, 50), Style::Squarified);
        let root = tm.root().unwrap();
        let kids: Vec<_> = tm.children(root).collect();
        assert_eq!(tm.rect(kids[0]), Some(PixelRect::new(0, 0, 60, 50)));
        assert_eq!(tm.rect(kids[1]), Some(PixelRect::new(60, 0, 100, 50)));
    }

    #[test]
    fn empty_root_lays_out_nothing() {
        let mut tm = Treemap::new();
        tm.layout(&Node::container(vec![]), PixelRect::from_size(100, 50), Style::Squarified);
        assert!(tm.is_empty());
        assert_eq!(tm.root(), None);
        assert!(tm.hit_test_point(Point::new(5.0, 5.0)).is_none());
        assert_eq!(tm.leaves().count(), 0);
    }

    #[test]
    fn zero_area_viewport_lays_out_nothing() {
        let mut tm = Treemap::new();
        tm.layout(&two_children(), PixelRect::from_size(0, 50), Style::Classic);
        assert!(tm.is_empty());
    }

    #[test]
    fn single_child_gets_full_rect() {
        for style in [Style::Classic, Style::Squarified] {
            for weight in [1, 7, 1_000_000] {
                let tree = Node::container_with_weight(2_000_000, vec![Node::leaf(weight, "a")]);
                let mut tm = Treemap::new();
                tm.layout(&tree, PixelRect::new(3, 4, 43, 24), style);
                let child = tm.children(tm.root().unwrap()).next().unwrap();
                assert_eq!(tm.rect(child), Some(PixelRect::new(3, 4, 43, 24)));
            }
        }
    }

    #[test]
    fn zero_weight_child_is_excluded_and_indexable() {
        let with_zero = Node::container(vec![
            Node::leaf(50, "a"),
            Node::leaf(0, "z"),
            Node::leaf(30, "b"),
            Node::leaf(20, "c"),
        ]);
        let without = Node::container(vec![
            Node::leaf(50, "a"),
            Node::leaf(30, "b"),
            Node::leaf(20, "c"),
        ]);
        for style in [Style::Classic, Style::Squarified] {
            let mut a = Treemap::new();
            a.layout(&with_zero, PixelRect::from_size(120, 80), style);
            let mut b = Treemap::new();
            b.layout(&without, PixelRect::from_size(120, 80), style);

            let ra: Vec<_> = a.children(a.root().unwrap()).map(|c| a.rect(c).unwrap()).collect();
            let rb: Vec<_> = b.children(b.root().unwrap()).map(|c| b.rect(c).unwrap()).collect();
            assert_eq!(ra[1].area(), 0, "zero-weight child has no area");
            assert_eq!([ra[0], ra[2], ra[3]], [rb[0], rb[1], rb[2]]);

            let zero = a.node_for_item_path(&[1]).unwrap();
            assert!(a.flags(zero).unwrap().contains(NodeFlags::EMPTY));
            assert_eq!(a.item_path(zero), Some(vec![1]));
            assert_eq!(a.parent(zero), a.root());
        }
    }

    #[test]
    fn negative_weight_is_treated_as_zero() {
        let tree = Node::container_with_weight(10, vec![Node::leaf(-5, "neg"), Node::leaf(10, "pos")]);
        let mut tm = Treemap::new();
        tm.layout(&tree, PixelRect::from_size(10, 10), Style::Squarified);
        let neg = tm.node_for_item_path(&[0]).unwrap();
        let pos = tm.node_for_item_path(&[1]).unwrap();
        assert_eq!(tm.weight(neg), Some(0));
        assert_eq!(tm.rect(neg).unwrap().area(), 0);
        assert_eq!(tm.rect(pos), Some(PixelRect::from_size(10, 10)));
    }

    #[test]
    fn children_partition_parent_at_every_level() {
        let tree = Node::container(vec![
            Node::container(vec![Node::leaf(9, "a"), Node::leaf(4, "b"), Node::leaf(4, "c")]),
            Node::leaf(11, "d"),
            Node::container(vec![
                Node::leaf(3, "a"),
                Node::container(vec![Node::leaf(2, "e"), Node::leaf(1, "f")]),
            ]),
            Node::leaf(1, "g"),
        ]);
        for style in [Style::Classic, Style::Squarified] {
            let mut tm = Treemap::new();
            tm.layout(&tree, PixelRect::from_size(317, 211), style);
            for idx in 0..tm.len() {
                let id = tm.id(to_u32(idx));
                let kids: Vec<_> = tm.children(id).collect();
                if kids.is_empty() || tm.flags(id).unwrap().contains(NodeFlags::COLLAPSED) {
                    continue;
                }
                let area: u64 = kids.iter().map(|&k| tm.rect(k).unwrap().area()).sum();
                assert_eq!(area, tm.rect(id).unwrap().area(), "{style:?} node {idx}");
            }
        }
    }

    #[test]
    fn hit_test_descends_to_deepest() {
        let tree = Node::container(vec![
            Node::container(vec![Node::leaf(1, "a"), Node::leaf(1, "b")]),
            Node::leaf(2, "c"),
        ]);
        let mut tm = Treemap::new();
        tm.layout(&tree, PixelRect::from_size(100, 100), Style::Classic);
        let root = tm.root().unwrap();
        for leaf in tm.leaves() {
            let r = tm.rect(leaf).unwrap();
            let pt = Point::new(f64::from(r.left) + 0.5, f64::from(r.top) + 0.5);
            let hit = tm.hit_test_point(pt).unwrap();
            assert_eq!(hit.node, leaf);
            assert_eq!(hit.path.first().copied(), Some(root));
            assert_eq!(hit.path.last().copied(), Some(leaf));
            assert_eq!(hit.path.len() as u32, tm.depth(leaf).unwrap() + 1);
        }
        assert!(tm.hit_test_point(Point::new(100.0, 5.0)).is_none());
        assert!(tm.hit_test_point(Point::new(-0.5, 5.0)).is_none());
        assert!(tm.hit_test_point(Point::new(f64::NAN, 5.0)).is_none());
    }

    #[test]
    fn collapsed_container_is_hit_as_a_whole() {
        let tree = Node::container(vec![
            Node::leaf(1_000_000, "big"),
            Node::container(vec![Node::leaf(1, "x"), Node::leaf(1, "y")]),
        ]);
        let mut tm = Treemap::new();
        tm.layout(&tree, PixelRect::from_size(100, 100), Style::Squarified);
        let small = tm.node_for_item_path(&[1]).unwrap();
        assert!(tm.rect(small).unwrap().is_empty());
        let grandchild = tm.node_for_item_path(&[1, 0]).unwrap();
        assert!(tm.rect(grandchild).unwrap().is_empty());
        assert_eq!(tm.depth(grandchild), Some(2));
    }

    #[test]
    fn categories_are_interned_per_layout() {
        let tree = Node::container(vec![
            Node::leaf(5, "txt"),
            Node::leaf(4, "txt"),
            Node::leaf_with(3, NodeCategory::Unknown),
            Node::leaf(2, "exe"),
        ]);
        let mut tm = Treemap::new();
        tm.layout(&tree, PixelRect::from_size(40, 40), Style::Squarified);
        assert_eq!(tm.tags.len(), 2);
        assert_eq!(tm.tag_ids.get("txt"), Some(&0));
        assert_eq!(tm.tag_ids.get("exe"), Some(&1));
        assert_eq!(tm.tag_ids.get("dll"), None);
    }

    #[test]
    fn relayout_invalidates_ids() {
        let mut tm = Treemap::new();
        tm.layout(&two_children(), PixelRect::from_size(100, 50), Style::Classic);
        let old_root = tm.root().unwrap();
        assert!(tm.is_alive(old_root));
        tm.layout(&two_children(), PixelRect::from_size(100, 50), Style::Classic);
        assert!(!tm.is_alive(old_root));
        assert_eq!(tm.rect(old_root), None);
        assert!(tm.is_alive(tm.root().unwrap()));
        assert_ne!(tm.root(), Some(old_root));
    }

    #[test]
    fn leaf_root_fills_viewport() {
        let mut tm = Treemap::new();
        tm.layout(&Node::leaf(3, "x"), PixelRect::from_size(8, 6), Style::Classic);
        let root = tm.root().unwrap();
        assert!(tm.flags(root).unwrap().contains(NodeFlags::LEAF));
        assert_eq!(tm.leaves().collect::<Vec<_>>(), vec![root]);
        assert_eq!(tm.item_path(root), Some(vec![]));
    }

    #[quickcheck]
    fn layout_tiles_random_hierarchies(
        ops: Vec<(u8, i16)>,
        origin: (i8, i8),
        size: (u8, u8),
        point: (u8, u8),
        squarified: bool,
    ) -> TestResult {
        let root = gen_node(&mut ops.into_iter(), 0);
        let (x0, y0) = (i32::from(origin.0), i32::from(origin.1));
        let bounds = PixelRect::new(x0, y0, x0 + i32::from(size.0), y0 + i32::from(size.1));
        let style = if squarified { Style::Squarified } else { Style::Classic };
        let mut tm = Treemap::new();
        tm.layout(&root, bounds, style);
        if tm.is_empty() {
            return TestResult::discard();
        }
        if let Err(e) = check_tiling(&tm) {
            return TestResult::error(e);
        }

        let x = x0 + i32::from(point.0) % bounds.width().max(1) as i32;
        let y = y0 + i32::from(point.1) % bounds.height().max(1) as i32;
        let Some(hit) = tm.hit_test_point(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)) else {
            return TestResult::error(alloc::format!("({x}, {y}) missed {bounds:?}"));
        };
        let node = tm.get(hit.node).unwrap();
        if !node.flags.contains(NodeFlags::LEAF) || !node.rect.contains(x, y) {
            return TestResult::error(alloc::format!("({x}, {y}) resolved to {node:?}"));
        }
        TestResult::passed()
    }

    #[test]
    fn classic_square_containers_alternate_with_depth() {
        // Depth 0: a square root puts its children side by side.
        let mut tm = Treemap::new();
        tm.layout(
            &Node::container(vec![Node::leaf(1, "a"), Node::leaf(1, "b")]),
            PixelRect::from_size(100, 100),
            Style::Classic,
        );
        let kids: Vec<_> = tm.children(tm.root().unwrap()).map(|c| tm.rect(c).unwrap()).collect();
        assert_eq!(kids, vec![PixelRect::new(0, 0, 50, 100), PixelRect::new(50, 0, 100, 100)]);

        // Depth 1: a square container stacks its children.
        let tree = Node::container(vec![
            Node::container(vec![Node::leaf(1, "a"), Node::leaf(1, "b")]),
            Node::leaf(2, "c"),
        ]);
        tm.layout(&tree, PixelRect::from_size(200, 100), Style::Classic);
        let inner = tm.node_for_item_path(&[0]).unwrap();
        assert_eq!(tm.rect(inner), Some(PixelRect::new(0, 0, 100, 100)));
        let kids: Vec<_> = tm.children(inner).map(|c| tm.rect(c).unwrap()).collect();
        assert_eq!(kids, vec![PixelRect::new(0, 0, 100, 50), PixelRect::new(0, 50, 100, 100)]);
    }

    #[test]
    fn layout_with_reads_style_from_options() {
        let tree = Node::container(vec![
            Node::leaf(6, "a"),
            Node::leaf(6, "b"),
            Node::leaf(4, "c"),
            Node::leaf(3, "d"),
        ]);
        let bounds = PixelRect::from_size(60, 40);
        for style in [Style::Classic, Style::Squarified] {
            let mut direct = Treemap::new();
            direct.layout(&tree, bounds, style);
            let mut via = Treemap::new();
            via.layout_with(&tree, bounds, &Options { style, ..Default::default() });
            let rects = |tm: &Treemap| tm.leaves().map(|l| tm.rect(l)).collect::<Vec<_>>();
            assert_eq!(rects(&direct), rects(&via), "{style:?}");
        }
    }

    #[test]
    fn very_deep_chain_lays_out_and_renders_leaves() {
        const DEPTH: u32 = 20_000;
        let mut tree = Node::leaf(1, "x");
        for _ in 0..DEPTH {
            tree = Node::container(vec![tree]);
        }
        let mut tm = Treemap::new();
        tm.layout(&tree, PixelRect::from_size(800, 600), Style::Squarified);
        assert_eq!(tm.len(), DEPTH as usize + 1);

        let leaf = tm.leaves().collect::<Vec<_>>();
        assert_eq!(leaf.len(), 1);
        assert_eq!(tm.depth(leaf[0]), Some(DEPTH));
        assert_eq!(tm.rect(leaf[0]), Some(PixelRect::from_size(800, 600)));
        let hit = tm.hit_test_point(Point::new(400.0, 300.0)).unwrap();
        assert_eq!(hit.node, leaf[0]);
        assert_eq!(tm.item_path(leaf[0]).map(|p| p.len()), Some(DEPTH as usize));

        // Unwind the owned chain without recursing through `Drop`.
        while let Some(child) = tree.children.pop() {
            tree = child;
        }
    }
}
