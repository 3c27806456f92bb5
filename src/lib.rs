pub mod cli;
pub mod core;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod types;

pub use crate::core::{subtree_stats, BvhStats, Object, SceneBuffers, SplitMode};
pub use crate::scene::Scene;
