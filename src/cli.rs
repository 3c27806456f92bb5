// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::core::SplitMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "mesh-bvh")]
#[command(about = "Triangle-mesh BVH build demo", long_about = None)]
pub struct Cli {
    /// Split strategy used for every object
    #[arg(long, value_enum, default_value = "sah-fast")]
    pub split: SplitMode,

    /// Number of procedural objects in the demo scene
    #[arg(long, default_value_t = 8)]
    pub objects: usize,

    /// Triangles per object
    #[arg(long, default_value_t = 1024)]
    pub triangles: usize,

    /// Extra rebuilds of the same scene, for rough timing
    #[arg(long, default_value_t = 0)]
    pub repeat: usize,
}
