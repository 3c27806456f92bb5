use std::cmp::Ordering;

use clap::ValueEnum;
use glam::Vec3;

use crate::core::build_state::BuildState;
use crate::core::object::Object;
use crate::math::AABB;
use crate::types::BvhNodeData;

/// Leaf size cap for splits not forced by the depth limit.
pub const MAX_PRIMS_PER_LEAF: usize = 4;

/// Recursion depth cap; a leaf forced by it may exceed `MAX_PRIMS_PER_LEAF`.
pub const MAX_DEPTH: usize = 16;

const TRAVERSAL_COST: f32 = 0.125;
const INTERSECTION_COST: f32 = 1.0;

/// Partitioning strategy, chosen once per build call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SplitMode {
    /// Sort on the longest axis, split at the midpoint. Ignores the cost
    /// model entirely.
    Median,
    /// SAH sweep that accepts the first axis yielding a split cheaper than
    /// the leaf baseline. The axis try-order starts at the longest axis, so
    /// results depend on that order; this is intentional, traded for speed.
    SahFast,
    /// SAH sweep over all three axes, keeping the global best candidate.
    SahSlow,
}

/// Chosen partition of a node's index slice, which is sorted on `axis` by
/// the time this is produced.
struct Split {
    axis: usize,
    mid: usize,
    left_bounds: AABB,
    right_bounds: AABB,
}

/// Builds one object's subtree into the shared accumulator.
///
/// Per-triangle bounds and centroids are computed once up front; the
/// recursion then only shuffles an index list, sorting subslices in place.
/// All scratch lives in the builder and is dropped when the build call
/// returns.
pub(crate) struct BvhBuilder<'a> {
    object: &'a Object,
    mode: SplitMode,
    bounds: Vec<AABB>,
    centroids: Vec<Vec3>,
}

impl<'a> BvhBuilder<'a> {
    pub fn new(object: &'a Object, mode: SplitMode) -> Self {
        let bounds: Vec<AABB> = object
            .triangles
            .iter()
            .map(|tri| object.triangle_bounds(tri))
            .collect();
        let centroids: Vec<Vec3> = object
            .triangles
            .iter()
            .map(|tri| object.triangle_centroid(tri))
            .collect();
        Self {
            object,
            mode,
            bounds,
            centroids,
        }
    }

    /// Returns the root node's index into the global node buffer.
    pub fn build(self, state: &mut BuildState) -> u32 {
        let n = self.object.triangle_count();
        if n == 0 {
            // An object with no triangles still occupies one root slot: an
            // empty leaf whose inverted box can never be hit.
            return state.push_node(BvhNodeData::leaf(&AABB::empty(), 0, state.triangle_cursor()));
        }

        let mut indices: Vec<u32> = (0..n as u32).collect();
        let bounds = self
            .bounds
            .iter()
            .fold(AABB::empty(), |acc, bb| acc.union(bb));
        self.build_node(state, &mut indices, bounds, 0)
    }

    /// Emits the node for `indices` and its whole subtree, preorder: an
    /// internal node is pushed first, the left recursion lands at the very
    /// next slot, and the second-child field is backpatched with the index
    /// the right recursion returns.
    fn build_node(
        &self,
        state: &mut BuildState,
        indices: &mut [u32],
        bounds: AABB,
        depth: usize,
    ) -> u32 {
        let n = indices.len();
        if n <= MAX_PRIMS_PER_LEAF || depth >= MAX_DEPTH {
            return self.write_leaf(state, indices, &bounds);
        }

        let split = match self.mode {
            SplitMode::Median => Some(self.median_split(indices, &bounds)),
            SplitMode::SahFast => self.sah_split(indices, &bounds, true),
            SplitMode::SahSlow => self.sah_split(indices, &bounds, false),
        };
        let Some(split) = split else {
            // SAH found nothing cheaper than intersecting everything here.
            return self.write_leaf(state, indices, &bounds);
        };

        let node_index = state.push_node(BvhNodeData::internal(&bounds, split.axis as i32));
        let (left, right) = indices.split_at_mut(split.mid);

        let first_child = self.build_node(state, left, split.left_bounds, depth + 1);
        debug_assert_eq!(first_child, node_index + 1);

        let second_child = self.build_node(state, right, split.right_bounds, depth + 1);
        state.patch_second_child(node_index, second_child);

        node_index
    }

    /// Writes a leaf node and materializes its triangles into the global
    /// triangle buffer, remapped by the accumulator's current base counts.
    fn write_leaf(&self, state: &mut BuildState, indices: &[u32], bounds: &AABB) -> u32 {
        let offset = state.triangle_cursor();
        let node_index = state.push_node(BvhNodeData::leaf(bounds, indices.len() as u32, offset));
        for &i in indices {
            state.add_triangle(&self.object.triangles[i as usize]);
        }
        node_index
    }

    fn median_split(&self, indices: &mut [u32], bounds: &AABB) -> Split {
        let axis = bounds.longest_axis();
        self.sort_by_centroid(indices, axis);
        let mid = indices.len() / 2;
        Split {
            axis,
            mid,
            left_bounds: self.enclosing_bounds(&indices[..mid]),
            right_bounds: self.enclosing_bounds(&indices[mid..]),
        }
    }

    /// Sweep-based SAH: per axis, sort by centroid and accumulate prefix and
    /// suffix boxes over the sorted order, giving every one of the `n - 1`
    /// candidate positions its exact left/right bounds in two linear passes.
    ///
    /// Returns `None` when no candidate beats the leaf baseline, or when the
    /// node's box has zero surface area (degenerate geometry would make the
    /// cost division meaningless, so such a node becomes a leaf).
    fn sah_split(
        &self,
        indices: &mut [u32],
        bounds: &AABB,
        stop_at_first_improving: bool,
    ) -> Option<Split> {
        struct Candidate {
            axis: usize,
            mid: usize,
            cost: f32,
            left_bounds: AABB,
            right_bounds: AABB,
        }

        let n = indices.len();
        let leaf_cost = INTERSECTION_COST * n as f32;
        let total_area = bounds.surface_area();
        if total_area <= 0.0 {
            return None;
        }

        let first_axis = bounds.longest_axis();
        let mut prefix = vec![AABB::empty(); n];
        let mut suffix = vec![AABB::empty(); n];
        let mut best: Option<Candidate> = None;
        let mut sorted_axis = first_axis;

        for step in 0..3 {
            let axis = (first_axis + step) % 3;
            self.sort_by_centroid(indices, axis);
            sorted_axis = axis;

            // All centroids coincide on this axis; candidates would be
            // arbitrary cuts through identical positions. Skip the axis.
            let lo = self.centroids[indices[0] as usize][axis];
            let hi = self.centroids[indices[n - 1] as usize][axis];
            if lo == hi {
                continue;
            }

            let mut acc = AABB::empty();
            for i in 0..n {
                acc = acc.union(&self.bounds[indices[i] as usize]);
                prefix[i] = acc;
            }
            acc = AABB::empty();
            for i in (0..n).rev() {
                acc = acc.union(&self.bounds[indices[i] as usize]);
                suffix[i] = acc;
            }

            let mut axis_best: Option<(usize, f32)> = None;
            for mid in 1..n {
                let cost = TRAVERSAL_COST
                    + INTERSECTION_COST / total_area
                        * (mid as f32 * prefix[mid - 1].surface_area()
                            + (n - mid) as f32 * suffix[mid].surface_area());
                if axis_best.map_or(true, |(_, best_cost)| cost < best_cost) {
                    axis_best = Some((mid, cost));
                }
            }

            if let Some((mid, cost)) = axis_best {
                if best.as_ref().map_or(true, |b| cost < b.cost) {
                    best = Some(Candidate {
                        axis,
                        mid,
                        cost,
                        left_bounds: prefix[mid - 1],
                        right_bounds: suffix[mid],
                    });
                }
                if stop_at_first_improving && cost < leaf_cost {
                    break;
                }
            }
        }

        let best = best?;
        if best.cost >= leaf_cost {
            return None;
        }
        // The slow path may have left the slice sorted on a later axis than
        // the winning one; restore the winning order before partitioning.
        if best.axis != sorted_axis {
            self.sort_by_centroid(indices, best.axis);
        }
        Some(Split {
            axis: best.axis,
            mid: best.mid,
            left_bounds: best.left_bounds,
            right_bounds: best.right_bounds,
        })
    }

    /// Centroid sort with index order as the tie-break, so identical
    /// geometry always produces identical trees.
    fn sort_by_centroid(&self, indices: &mut [u32], axis: usize) {
        indices.sort_unstable_by(|&a, &b| {
            let ca = self.centroids[a as usize][axis];
            let cb = self.centroids[b as usize][axis];
            ca.partial_cmp(&cb)
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
    }

    fn enclosing_bounds(&self, indices: &[u32]) -> AABB {
        indices
            .iter()
            .fold(AABB::empty(), |acc, &i| acc.union(&self.bounds[i as usize]))
    }
}

/// Shape statistics of one object's subtree in the flat node buffer.
#[derive(Debug, Clone, Copy)]
pub struct BvhStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub total_prims: usize,
    pub avg_leaf_prims: f32,
}

/// Walks a subtree rooted at `root` using the preorder layout: the first
/// child of an internal node at `i` is `i + 1`, the second child is stored
/// explicitly.
pub fn subtree_stats(nodes: &[BvhNodeData], root: u32) -> BvhStats {
    let mut stats = BvhStats {
        node_count: 0,
        leaf_count: 0,
        max_depth: 0,
        total_prims: 0,
        avg_leaf_prims: 0.0,
    };

    let mut stack = vec![(root, 0usize)];
    while let Some((index, depth)) = stack.pop() {
        let node = &nodes[index as usize];
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(depth);

        if node.is_leaf() {
            stats.leaf_count += 1;
            stats.total_prims += node.prim_count as usize;
        } else {
            stack.push((index + 1, depth + 1));
            stack.push((node.prim_offset_or_child, depth + 1));
        }
    }

    if stats.leaf_count > 0 {
        stats.avg_leaf_prims = stats.total_prims as f32 / stats.leaf_count as f32;
    }
    stats
}
