use anyhow::{Context, Result};
use clap::Parser;

use mesh_bvh::cli::Cli;
use mesh_bvh::core::subtree_stats;
use mesh_bvh::scenes::create_demo_scene;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!(
        "Building {} objects x {} triangles ({:?})",
        cli.objects, cli.triangles, cli.split
    );

    let mut scene = create_demo_scene(cli.objects, cli.triangles);
    scene.build(cli.split);
    for _ in 0..cli.repeat {
        scene.build(cli.split);
    }

    let buffers = scene
        .buffers()
        .context("scene build produced no buffers")?;

    println!(
        "Output: {} vertices, {} triangles, {} nodes, {} materials",
        buffers.vertices.len(),
        buffers.triangles.len(),
        buffers.nodes.len(),
        buffers.materials.len()
    );

    for (id, &root) in buffers.object_roots.iter().enumerate() {
        let stats = subtree_stats(&buffers.nodes, root);
        println!(
            "  object {:>3}: root {:>6}, {} nodes, {} leaves, depth {}, avg leaf {:.2}",
            id, root, stats.node_count, stats.leaf_count, stats.max_depth, stats.avg_leaf_prims
        );
    }

    Ok(())
}
