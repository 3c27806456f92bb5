mod build_state;
mod bvh;
mod object;

pub use build_state::{BuildState, BuildTotals, SceneBuffers};
pub use bvh::{subtree_stats, BvhStats, SplitMode, MAX_DEPTH, MAX_PRIMS_PER_LEAF};
pub use object::Object;
